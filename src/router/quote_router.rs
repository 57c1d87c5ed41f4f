use axum::{middleware, routing::post, Router};
use std::sync::Arc;

use crate::handler::quote_handler::create_quote_request_handler;
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::quote_service::QuoteService;

pub fn quote_router(service: Arc<dyn QuoteService>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/quote-requests", post(create_quote_request_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(service)
}
