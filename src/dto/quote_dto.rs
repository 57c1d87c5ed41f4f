use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::parcel::{Parcel, ParcelType, QuoteOption, SenderKind};
use crate::util::error::ServiceError;

// --- Incoming request ---

/// Body of a quote request. Every group is optional at the wire level so a
/// missing or `null` group is reported as a validation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub sender: Option<SenderInfo>,
    pub pickup: Option<AddressInfo>,
    pub delivery: Option<AddressInfo>,
    pub parcel: Option<ParcelRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenderInfo {
    #[serde(default)]
    pub kind: SenderKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParcelRequest {
    #[serde(rename = "type")]
    pub parcel_type: String,

    #[validate(range(min = 0.0))]
    pub weight_kg: f64,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub declared_value: f64,

    #[serde(default)]
    pub options: Vec<String>,
}

/// A request whose four groups are present and whose parcel is typed
#[derive(Debug, Clone)]
pub struct ValidatedQuoteRequest {
    pub sender: SenderInfo,
    pub pickup: AddressInfo,
    pub delivery: AddressInfo,
    pub parcel: Parcel,
}

impl QuoteRequest {
    pub fn into_validated(self) -> Result<ValidatedQuoteRequest, ServiceError> {
        let (sender, pickup, delivery, parcel) = match (self.sender, self.pickup, self.delivery, self.parcel) {
            (Some(sender), Some(pickup), Some(delivery), Some(parcel)) => (sender, pickup, delivery, parcel),
            (sender, pickup, delivery, parcel) => {
                let missing: Vec<&str> = [
                    ("sender", sender.is_none()),
                    ("pickup", pickup.is_none()),
                    ("delivery", delivery.is_none()),
                    ("parcel", parcel.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| name)
                .collect();
                return Err(ServiceError::InvalidInput(format!("missing groups: {}", missing.join(", "))));
            }
        };

        Ok(ValidatedQuoteRequest {
            sender,
            pickup,
            delivery,
            parcel: parcel.into_parcel()?,
        })
    }
}

impl ParcelRequest {
    pub fn into_parcel(self) -> Result<Parcel, ServiceError> {
        self.validate()
            .map_err(|e| ServiceError::InvalidInput(format!("parcel validation error: {}", e)))?;

        let parcel_type: ParcelType = self
            .parcel_type
            .parse()
            .map_err(|e| ServiceError::InvalidInput(format!("{}", e)))?;

        let mut options: Vec<QuoteOption> = Vec::with_capacity(self.options.len());
        for raw in &self.options {
            let option: QuoteOption = raw
                .parse()
                .map_err(|e| ServiceError::InvalidInput(format!("{}", e)))?;
            if !options.contains(&option) {
                options.push(option);
            }
        }

        Ok(Parcel {
            parcel_type,
            weight_kg: self.weight_kg,
            declared_value: self.declared_value,
            options,
        })
    }
}

// --- Outgoing response ---

/// Itemized inputs of the price, echoed back for transparency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_fee: f64,
    pub weight_fee: f64,
    pub type_multiplier: f64,
    pub options: Vec<QuoteOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponseDto {
    pub quote_id: String,
    /// Always exactly two fractional digits
    pub price: String,
    pub currency: String,
    /// RFC 3339, UTC
    pub estimated_delivery: String,
    pub breakdown: PriceBreakdown,
}
