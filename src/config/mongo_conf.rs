use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Where priced quotes are recorded, and how long a write may take
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub quote_collection: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
    /// Upper bound for the single quote insert attempt, in milliseconds
    pub write_timeout_ms: u64,
}

impl MongoConfig {
    /// Reads `MONGO_URI` and `MONGO_DATABASE` (required), `MONGO_USERNAME` /
    /// `MONGO_PASSWORD` (optional pair), and the tuning knobs
    /// `MONGO_QUOTE_COLLECTION`, `MONGO_POOL_SIZE`, `MONGO_CONNECTION_TIMEOUT`
    /// (seconds) and `MONGO_WRITE_TIMEOUT_MS`, falling back to [`MongoConfig::default`].
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading quote store configuration");
        let defaults = MongoConfig::default();

        let config = MongoConfig {
            uri: required_var("MONGO_URI")?,
            database: required_var("MONGO_DATABASE")?,
            username: env::var("MONGO_USERNAME").ok(),
            password: env::var("MONGO_PASSWORD").ok(),
            quote_collection: env::var("MONGO_QUOTE_COLLECTION").unwrap_or(defaults.quote_collection),
            pool_size: parse_or_default("MONGO_POOL_SIZE", defaults.pool_size)?,
            connection_timeout_secs: parse_or_default("MONGO_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?,
            write_timeout_ms: parse_or_default("MONGO_WRITE_TIMEOUT_MS", defaults.write_timeout_ms)?,
        };
        debug!(
            database = %config.database,
            collection = %config.quote_collection,
            pool_size = config.pool_size,
            write_timeout_ms = config.write_timeout_ms,
            authenticated = config.password.is_some(),
            "Quote store settings"
        );

        config.validate()?;
        info!("Quote store configuration loaded");
        Ok(config)
    }

    /// Local store with a short write budget
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "test_db".to_string(),
            username: None,
            password: None,
            quote_collection: "test_quote_requests".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
            write_timeout_ms: 500,
        }
    }

    /// Reject settings that would only fail once the first quote is written
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("uri", self.uri.as_str()),
            ("database", self.database.as_str()),
            ("quote collection", self.quote_collection.as_str()),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            error!("MongoDB {} is empty", name);
            return Err(ConfigError::ValidationError(format!("MongoDB {} cannot be empty", name)));
        }

        let limits = [
            ("pool size", u64::from(self.pool_size)),
            ("connection timeout", self.connection_timeout_secs),
            ("write timeout", self.write_timeout_ms),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            error!("MongoDB {} is 0", name);
            return Err(ConfigError::ValidationError(format!("MongoDB {} must be greater than 0", name)));
        }

        // Credentials are all-or-nothing and never blank
        match (self.username.as_deref(), self.password.as_deref()) {
            (None, None) => Ok(()),
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Ok(()),
            _ => {
                error!("MongoDB credentials are incomplete");
                Err(ConfigError::ValidationError(
                    "MongoDB username and password must both be set and non-empty".to_string(),
                ))
            }
        }
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| {
        error!("{} environment variable not found", var);
        ConfigError::EnvVarNotFound(var.to_string())
    })
}

fn parse_or_default<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            error!("Invalid {} value: {}", var, raw);
            ConfigError::InvalidValue(format!("Invalid {} value", var))
        }),
        Err(_) => {
            warn!("{} not set, using default: {}", var, default);
            Ok(default)
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "freight".to_string(),
            username: None,
            password: None,
            quote_collection: "quote_requests".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
            write_timeout_ms: 2000,
        }
    }
}
