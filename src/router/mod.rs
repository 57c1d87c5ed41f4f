pub mod quote_router;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any as PanicPayload;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::middlewares::auth_middleware::AuthState;
use crate::service::quote_service::QuoteService;
use crate::util::error::HandlerError;

/// Full HTTP surface: quote routes, health check, panic guard, CORS and request tracing
pub fn api_router(service: Arc<dyn QuoteService>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .merge(quote_router::quote_router(service, auth_state))
        .route("/health", get(|| async { "OK" }))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Any origin; preflight answered with a fixed header allow-list
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

/// A panicking handler still answers with the fixed 500 body
fn handle_panic(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!(panic = detail, "Request handler panicked");
    HandlerError::unavailable().into_response()
}
