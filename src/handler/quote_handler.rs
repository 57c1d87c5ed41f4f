use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::dto::quote_dto::QuoteRequest;
use crate::service::quote_service::QuoteService;
use crate::util::error::HandlerError;
use crate::util::jwt::AuthenticatedCaller;

// Handler: Request a quote (authenticated)
pub async fn create_quote_request_handler(
    State(service): State<Arc<dyn QuoteService>>,
    Extension(caller): Extension<AuthenticatedCaller>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    info!(user_id = %caller.user_id, "[create_quote_request_handler] Handler called");

    let Json(request) = payload.map_err(|rejection| {
        warn!("[create_quote_request_handler] Unreadable body: {}", rejection.body_text());
        HandlerError::invalid_request()
    })?;

    let quote = service.request_quote(request, &caller).await?;
    info!(quote_id = %quote.quote_id, price = %quote.price, "[create_quote_request_handler] Quote returned");
    Ok(Json(quote))
}
