use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// User-facing messages. Details never leave the server.
pub const INVALID_REQUEST_MESSAGE: &str = "Informations incorrectes.";
pub const UNAVAILABLE_MESSAGE: &str = "Service indisponible.";
pub const MISSING_AUTHORIZATION_MESSAGE: &str = "No authorization header";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerErrorKind {
    BadRequest,
    Unauthorized,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: &'static str,
}

impl HandlerError {
    pub fn invalid_request() -> Self {
        HandlerError { error: HandlerErrorKind::BadRequest, message: INVALID_REQUEST_MESSAGE }
    }

    pub fn missing_authorization() -> Self {
        HandlerError { error: HandlerErrorKind::Unauthorized, message: MISSING_AUTHORIZATION_MESSAGE }
    }

    pub fn unauthorized() -> Self {
        HandlerError { error: HandlerErrorKind::Unauthorized, message: UNAUTHORIZED_MESSAGE }
    }

    pub fn unavailable() -> Self {
        HandlerError { error: HandlerErrorKind::Internal, message: UNAVAILABLE_MESSAGE }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Clone)]
pub enum ServiceError {
    InvalidInput(String),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

// Only the fixed public message survives the conversion.
impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(_) => HandlerError::invalid_request(),
            ServiceError::InternalError(_) => HandlerError::unavailable(),
        }
    }
}
