use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::AuthConfig;

/// Access token claims as issued by the backend's auth service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Identity of the caller, attached to the request once the token checks out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    pub user_id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl From<Claims> for AuthenticatedCaller {
    fn from(claims: Claims) -> Self {
        AuthenticatedCaller {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid authorization header format")]
    InvalidHeader,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Verifies a bearer token and resolves the caller behind it.
#[async_trait]
pub trait AuthVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthenticatedCaller, AuthError>;
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AuthError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidHeader)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::InvalidHeader);
    }
    Ok(token)
}

#[derive(Debug, Clone)]
pub struct JwtAuthVerifier {
    pub config: AuthConfig,
}

impl JwtAuthVerifier {
    pub fn new(config: AuthConfig) -> Self {
        JwtAuthVerifier { config }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        match &self.config.jwt_audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        if let Some(issuer) = &self.config.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }

    /// Sign a token the same way the auth service does. `expires_in_minutes`
    /// may be negative to produce an already expired token.
    pub fn issue_token(
        &self,
        user_id: &str,
        email: Option<&str>,
        role: Option<&str>,
        expires_in_minutes: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            role: role.map(str::to_string),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expires_in_minutes)).timestamp(),
            aud: self.config.jwt_audience.clone(),
            iss: self.config.jwt_issuer.clone(),
        };
        let key = EncodingKey::from_secret(self.config.jwt_secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(|err| {
            error!("Failed to encode token: {}", err);
            AuthError::EncodingFailed(err.to_string())
        })
    }

    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let key = DecodingKey::from_secret(self.config.jwt_secret.as_bytes());
        match decode::<Claims>(token, &key, &self.validation()) {
            Ok(data) => {
                debug!("Token validation successful for user: {}", data.claims.sub);
                Ok(data.claims)
            }
            Err(err) if matches!(err.kind(), ErrorKind::ExpiredSignature) => {
                warn!("Rejected expired token");
                Err(AuthError::TokenExpired)
            }
            Err(err) => {
                warn!("Failed to decode token: {}", err);
                Err(AuthError::DecodingFailed(err.to_string()))
            }
        }
    }
}

#[async_trait]
impl AuthVerifier for JwtAuthVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedCaller, AuthError> {
        self.decode_claims(token).map(AuthenticatedCaller::from)
    }
}
