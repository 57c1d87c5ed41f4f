pub mod app_conf;
pub mod auth_conf;
pub mod mongo_conf;
pub mod pricing_conf;

pub use app_conf::AppConfig;
pub use auth_conf::AuthConfig;
pub use mongo_conf::MongoConfig;
pub use pricing_conf::PricingConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
