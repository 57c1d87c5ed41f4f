use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::warn;

use crate::util::error::HandlerError;
use crate::util::jwt::{extract_bearer_token, AuthVerifier};

pub struct AuthState {
    pub verifier: Arc<dyn AuthVerifier>,
}

/// Rejects the request unless it carries a valid bearer token, and attaches
/// the resolved `AuthenticatedCaller` to the request extensions.
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .ok_or_else(HandlerError::missing_authorization)?
        .to_str()
        .map_err(|_| HandlerError::unauthorized())?;

    let token = extract_bearer_token(auth_header).map_err(|e| {
        warn!("Rejected authorization header: {e}");
        HandlerError::unauthorized()
    })?;

    let caller = state.verifier.verify(token).await.map_err(|e| {
        warn!("Token verification failed: {e}");
        HandlerError::unauthorized()
    })?;

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
