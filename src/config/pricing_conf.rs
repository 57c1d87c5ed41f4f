use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info};

use crate::config::ConfigError;

/// Longest delivery estimate a tariff may promise, express days are bounded by standard days
pub const MAX_DELIVERY_DAYS: i64 = 365;

/// Rate table driving the quote price calculation.
///
/// Defaults reproduce the published tariff: 50 EUR base fee, 5 EUR per kg,
/// type multipliers 1.0 / 1.2 / 1.5 / 2.0, 2% insurance on declared value,
/// x1.5 for express handling, 10 EUR for signature confirmation,
/// 7 calendar days delivery (3 with express handling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub base_fee: f64,
    pub per_kg_rate: f64,
    pub document_multiplier: f64,
    pub standard_multiplier: f64,
    pub fragile_multiplier: f64,
    pub express_multiplier: f64,
    /// Share of the declared value charged when insurance is selected
    pub insurance_rate: f64,
    /// Applied on top of the parcel type multiplier when express handling is selected
    pub express_option_multiplier: f64,
    pub signature_fee: f64,
    pub standard_delivery_days: i64,
    pub express_delivery_days: i64,
    /// ISO 4217 code
    pub currency: String,
}

impl PricingConfig {
    /// Load the rate table, falling back to the default tariff for every unset variable
    ///
    /// Recognised environment variables:
    /// - PRICING_BASE_FEE, PRICING_PER_KG_RATE
    /// - PRICING_DOCUMENT_MULTIPLIER, PRICING_STANDARD_MULTIPLIER,
    ///   PRICING_FRAGILE_MULTIPLIER, PRICING_EXPRESS_MULTIPLIER
    /// - PRICING_INSURANCE_RATE, PRICING_EXPRESS_OPTION_MULTIPLIER, PRICING_SIGNATURE_FEE
    /// - PRICING_STANDARD_DELIVERY_DAYS, PRICING_EXPRESS_DELIVERY_DAYS
    /// - PRICING_CURRENCY
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading pricing configuration from environment variables");
        let defaults = PricingConfig::default();

        let config = PricingConfig {
            base_fee: env_or("PRICING_BASE_FEE", defaults.base_fee)?,
            per_kg_rate: env_or("PRICING_PER_KG_RATE", defaults.per_kg_rate)?,
            document_multiplier: env_or("PRICING_DOCUMENT_MULTIPLIER", defaults.document_multiplier)?,
            standard_multiplier: env_or("PRICING_STANDARD_MULTIPLIER", defaults.standard_multiplier)?,
            fragile_multiplier: env_or("PRICING_FRAGILE_MULTIPLIER", defaults.fragile_multiplier)?,
            express_multiplier: env_or("PRICING_EXPRESS_MULTIPLIER", defaults.express_multiplier)?,
            insurance_rate: env_or("PRICING_INSURANCE_RATE", defaults.insurance_rate)?,
            express_option_multiplier: env_or(
                "PRICING_EXPRESS_OPTION_MULTIPLIER",
                defaults.express_option_multiplier,
            )?,
            signature_fee: env_or("PRICING_SIGNATURE_FEE", defaults.signature_fee)?,
            standard_delivery_days: env_or("PRICING_STANDARD_DELIVERY_DAYS", defaults.standard_delivery_days)?,
            express_delivery_days: env_or("PRICING_EXPRESS_DELIVERY_DAYS", defaults.express_delivery_days)?,
            currency: env::var("PRICING_CURRENCY").unwrap_or(defaults.currency),
        };

        config.validate()?;
        info!(currency = %config.currency, "Pricing configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let amounts = [
            ("base_fee", self.base_fee),
            ("per_kg_rate", self.per_kg_rate),
            ("insurance_rate", self.insurance_rate),
            ("signature_fee", self.signature_fee),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                error!("Pricing value {} must be a non-negative number, got {}", name, value);
                return Err(ConfigError::ValidationError(format!("{} must be non-negative", name)));
            }
        }

        let multipliers = [
            ("document_multiplier", self.document_multiplier),
            ("standard_multiplier", self.standard_multiplier),
            ("fragile_multiplier", self.fragile_multiplier),
            ("express_multiplier", self.express_multiplier),
            ("express_option_multiplier", self.express_option_multiplier),
        ];
        for (name, value) in multipliers {
            if !value.is_finite() || value < 1.0 {
                error!("Pricing multiplier {} must be at least 1.0, got {}", name, value);
                return Err(ConfigError::ValidationError(format!("{} must be at least 1.0", name)));
            }
        }

        // document <= standard <= fragile <= express
        if !(self.document_multiplier <= self.standard_multiplier
            && self.standard_multiplier <= self.fragile_multiplier
            && self.fragile_multiplier <= self.express_multiplier)
        {
            error!("Parcel type multipliers are not ordered");
            return Err(ConfigError::ValidationError(
                "parcel type multipliers must be ordered document <= standard <= fragile <= express".to_string(),
            ));
        }

        if self.express_delivery_days <= 0 || self.standard_delivery_days <= 0 {
            return Err(ConfigError::ValidationError("delivery days must be greater than 0".to_string()));
        }
        if self.standard_delivery_days > MAX_DELIVERY_DAYS {
            error!("Standard delivery days out of range: {}", self.standard_delivery_days);
            return Err(ConfigError::ValidationError(format!(
                "delivery days cannot exceed {}",
                MAX_DELIVERY_DAYS
            )));
        }
        if self.express_delivery_days > self.standard_delivery_days {
            return Err(ConfigError::ValidationError(
                "express delivery cannot take longer than standard delivery".to_string(),
            ));
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            error!("Invalid currency code: {}", self.currency);
            return Err(ConfigError::InvalidValue(format!("Invalid currency code: {}", self.currency)));
        }

        Ok(())
    }
}

fn env_or<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => {
            let value = raw.trim().parse::<T>().map_err(|_| {
                error!("Invalid {} value: {}", var, raw);
                ConfigError::InvalidValue(format!("Invalid {} value", var))
            })?;
            debug!("{} overridden: {}", var, value);
            Ok(value)
        }
        Err(_) => Ok(default),
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            base_fee: 50.0,
            per_kg_rate: 5.0,
            document_multiplier: 1.0,
            standard_multiplier: 1.2,
            fragile_multiplier: 1.5,
            express_multiplier: 2.0,
            insurance_rate: 0.02,
            express_option_multiplier: 1.5,
            signature_fee: 10.0,
            standard_delivery_days: 7,
            express_delivery_days: 3,
            currency: "EUR".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tariff() {
        let config = PricingConfig::default();
        assert_eq!(config.base_fee, 50.0);
        assert_eq!(config.per_kg_rate, 5.0);
        assert_eq!(config.express_multiplier, 2.0);
        assert_eq!(config.express_delivery_days, 3);
        assert_eq!(config.standard_delivery_days, 7);
        assert_eq!(config.currency, "EUR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_fee_rejected() {
        let config = PricingConfig {
            signature_fee: -1.0,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discount_multiplier_rejected() {
        let config = PricingConfig {
            express_option_multiplier: 0.5,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unordered_multipliers_rejected() {
        let config = PricingConfig {
            standard_multiplier: 1.8,
            ..PricingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_express_slower_than_standard_rejected() {
        let config = PricingConfig {
            express_delivery_days: 10,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_delivery_days_upper_bound() {
        let at_bound = PricingConfig {
            standard_delivery_days: MAX_DELIVERY_DAYS,
            ..PricingConfig::default()
        };
        assert!(at_bound.validate().is_ok());

        let beyond = PricingConfig {
            standard_delivery_days: 1_000_000_000_000,
            ..PricingConfig::default()
        };
        assert!(matches!(beyond.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_lowercase_currency_rejected() {
        let config = PricingConfig {
            currency: "eur".to_string(),
            ..PricingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }
}
