use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::dto::quote_dto::{QuoteRequest, QuoteResponseDto, ValidatedQuoteRequest};
use crate::model::quote::{QuoteRecord, PAYMENT_STATUS_UNPAID, STATUS_RECEIVED};
use crate::repository::quote_repo::QuoteRepository;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::service::pricing::{estimated_delivery, format_amount, PriceCalculator, PricedParcel};
use crate::util::error::ServiceError;
use crate::util::jwt::AuthenticatedCaller;

#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Validate, price, record (best effort) and format a quote request.
    async fn request_quote(
        &self,
        request: QuoteRequest,
        caller: &AuthenticatedCaller,
    ) -> Result<QuoteResponseDto, ServiceError>;
}

pub struct QuoteServiceImpl {
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub calculator: PriceCalculator,
    /// Bound on the single insert attempt
    pub write_timeout: Duration,
}

impl QuoteServiceImpl {
    pub fn new(quote_repo: Arc<dyn QuoteRepository>, calculator: PriceCalculator, write_timeout: Duration) -> Self {
        QuoteServiceImpl {
            quote_repo,
            calculator,
            write_timeout,
        }
    }

    fn build_record(
        &self,
        quote_id: &str,
        request: &ValidatedQuoteRequest,
        priced: &PricedParcel,
        caller: &AuthenticatedCaller,
        created_at: &str,
    ) -> QuoteRecord {
        QuoteRecord {
            id: quote_id.to_string(),
            user_id: caller.user_id.clone(),
            contact_email: request.sender.email.clone(),
            contact_name: request.sender.name.clone(),
            parcel_type: request.parcel.parcel_type,
            volume: request.parcel.volume_label(),
            price: priced.rounded_total(),
            currency: self.calculator.config().currency.clone(),
            status: STATUS_RECEIVED.to_string(),
            payment_status: PAYMENT_STATUS_UNPAID.to_string(),
            payable_online: true,
            created_at: created_at.to_string(),
        }
    }

    async fn try_persist(&self, record: QuoteRecord) -> RepositoryResult<QuoteRecord> {
        match tokio::time::timeout(self.write_timeout, self.quote_repo.create(record)).await {
            Ok(result) => result,
            Err(_) => Err(RepositoryError::timeout(format!(
                "quote insert exceeded {} ms",
                self.write_timeout.as_millis()
            ))),
        }
    }

    /// A failed write is logged and otherwise ignored: the caller still gets the quote.
    async fn persist_best_effort(&self, record: QuoteRecord) {
        let quote_id = record.id.clone();
        match self.try_persist(record).await {
            Ok(_) => info!(quote_id = %quote_id, "Quote recorded"),
            Err(e) => error!(quote_id = %quote_id, "Failed to record quote, returning it anyway: {e}"),
        }
    }
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
    #[instrument(skip(self, request, caller), fields(user_id = %caller.user_id))]
    async fn request_quote(
        &self,
        request: QuoteRequest,
        caller: &AuthenticatedCaller,
    ) -> Result<QuoteResponseDto, ServiceError> {
        let request = request.into_validated().map_err(|e| {
            warn!("Rejected quote request: {e}");
            e
        })?;

        let priced = self.calculator.calculate(&request.parcel);
        if !priced.total.is_finite() {
            error!(weight_kg = request.parcel.weight_kg, "Computed price is not a finite number");
            return Err(ServiceError::InternalError(format!(
                "non-finite price for weight {}",
                request.parcel.weight_kg
            )));
        }

        let now = Utc::now();
        let quote_id = Uuid::new_v4().to_string();
        let delivery_date = estimated_delivery(now, priced.delivery_days).ok_or_else(|| {
            error!(delivery_days = priced.delivery_days, "Delivery estimate is out of range");
            ServiceError::InternalError(format!("delivery date out of range for {} days", priced.delivery_days))
        })?;
        info!(
            quote_id = %quote_id,
            parcel_type = %request.parcel.parcel_type,
            total = priced.rounded_total(),
            delivery_days = priced.delivery_days,
            "Quote priced"
        );

        let created_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let record = self.build_record(&quote_id, &request, &priced, caller, &created_at);
        self.persist_best_effort(record).await;

        Ok(QuoteResponseDto {
            quote_id,
            price: format_amount(priced.total),
            currency: self.calculator.config().currency.clone(),
            estimated_delivery: delivery_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            breakdown: priced.breakdown,
        })
    }
}
