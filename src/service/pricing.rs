use chrono::{DateTime, TimeDelta, Utc};

use crate::config::PricingConfig;
use crate::dto::quote_dto::PriceBreakdown;
use crate::model::parcel::{Parcel, ParcelType, QuoteOption};

/// Outcome of pricing one parcel
#[derive(Debug, Clone, PartialEq)]
pub struct PricedParcel {
    /// Unrounded total, use [`format_amount`] for display
    pub total: f64,
    pub delivery_days: i64,
    pub breakdown: PriceBreakdown,
}

impl PricedParcel {
    pub fn rounded_total(&self) -> f64 {
        round_to_cents(self.total)
    }
}

#[derive(Debug, Clone)]
pub struct PriceCalculator {
    config: PricingConfig,
}

impl PriceCalculator {
    pub fn new(config: PricingConfig) -> Self {
        PriceCalculator { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn type_multiplier(&self, parcel_type: ParcelType) -> f64 {
        match parcel_type {
            ParcelType::Document => self.config.document_multiplier,
            ParcelType::Standard => self.config.standard_multiplier,
            ParcelType::Fragile => self.config.fragile_multiplier,
            ParcelType::Express => self.config.express_multiplier,
        }
    }

    /// Price a parcel.
    ///
    /// Order matters: the type multiplier applies to base plus weight only,
    /// insurance is added after it, the express option multiplies everything
    /// accumulated so far (including insurance, and on top of an `express`
    /// parcel type), and the signature fee is added last.
    pub fn calculate(&self, parcel: &Parcel) -> PricedParcel {
        let base_fee = self.config.base_fee;
        let weight_fee = parcel.weight_kg * self.config.per_kg_rate;
        let type_multiplier = self.type_multiplier(parcel.parcel_type);

        let mut total = (base_fee + weight_fee) * type_multiplier;
        if parcel.has_option(QuoteOption::Insurance) {
            total += parcel.declared_value * self.config.insurance_rate;
        }
        if parcel.has_option(QuoteOption::Express) {
            total *= self.config.express_option_multiplier;
        }
        if parcel.has_option(QuoteOption::Signature) {
            total += self.config.signature_fee;
        }

        PricedParcel {
            total,
            delivery_days: self.delivery_days(parcel),
            breakdown: PriceBreakdown {
                base_fee,
                weight_fee,
                type_multiplier,
                options: parcel.options.clone(),
            },
        }
    }

    pub fn delivery_days(&self, parcel: &Parcel) -> i64 {
        if parcel.has_option(QuoteOption::Express) {
            self.config.express_delivery_days
        } else {
            self.config.standard_delivery_days
        }
    }
}

/// Calendar days, not business days. `None` when the date leaves chrono's range.
pub fn estimated_delivery(from: DateTime<Utc>, delivery_days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(delivery_days).and_then(|delta| from.checked_add_signed(delta))
}

pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", round_to_cents(amount))
}
