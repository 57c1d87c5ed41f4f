use std::env;
use tracing::{debug, error, info};

use crate::config::ConfigError;

/// Settings used to verify bearer tokens issued by the backend's auth service
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret the auth service signs access tokens with (HS256)
    pub jwt_secret: String,
    /// Expected `aud` claim, if the auth service sets one
    pub jwt_audience: Option<String>,
    /// Expected `iss` claim, if the auth service sets one
    pub jwt_issuer: Option<String>,
}

impl AuthConfig {
    /// Load auth configuration from environment variables
    ///
    /// Expected environment variables:
    /// - AUTH_JWT_SECRET: token signing secret (required, at least 32 characters)
    /// - AUTH_JWT_AUDIENCE: expected audience (optional)
    /// - AUTH_JWT_ISSUER: expected issuer (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading auth configuration from environment variables");

        let jwt_secret = env::var("AUTH_JWT_SECRET").map_err(|_| {
            error!("AUTH_JWT_SECRET environment variable not found");
            ConfigError::EnvVarNotFound("AUTH_JWT_SECRET".to_string())
        })?;
        debug!("Auth secret loaded (length: {} chars)", jwt_secret.len());

        let jwt_audience = env::var("AUTH_JWT_AUDIENCE").ok();
        if let Some(ref audience) = jwt_audience {
            debug!("Auth audience: {}", audience);
        }

        let jwt_issuer = env::var("AUTH_JWT_ISSUER").ok();
        if let Some(ref issuer) = jwt_issuer {
            debug!("Auth issuer: {}", issuer);
        }

        let config = AuthConfig {
            jwt_secret,
            jwt_audience,
            jwt_issuer,
        };
        config.validate()?;

        info!("Auth configuration loaded successfully");
        Ok(config)
    }

    /// Fixed configuration for tests and local tooling
    pub fn from_test_env() -> Self {
        AuthConfig {
            jwt_secret: "test_secret_key_for_quote_requests_only_0123456789".to_string(),
            jwt_audience: Some("authenticated".to_string()),
            jwt_issuer: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            error!("Auth secret cannot be empty");
            return Err(ConfigError::ValidationError("AUTH_JWT_SECRET cannot be empty".to_string()));
        }
        if self.jwt_secret.len() < 32 {
            error!("AUTH_JWT_SECRET is too short (minimum 32 characters required)");
            return Err(ConfigError::ValidationError(
                "AUTH_JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }
        if matches!(self.jwt_audience.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError("AUTH_JWT_AUDIENCE cannot be empty if set".to_string()));
        }
        if matches!(self.jwt_issuer.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError("AUTH_JWT_ISSUER cannot be empty if set".to_string()));
        }
        Ok(())
    }
}
