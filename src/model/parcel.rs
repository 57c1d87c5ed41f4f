use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parcel category, drives the pricing multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelType {
    Document,
    Standard,
    Fragile,
    Express,
}

impl ParcelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParcelType::Document => "document",
            ParcelType::Standard => "standard",
            ParcelType::Fragile => "fragile",
            ParcelType::Express => "express",
        }
    }
}

impl fmt::Display for ParcelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParcelType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(ParcelType::Document),
            "standard" => Ok(ParcelType::Standard),
            "fragile" => Ok(ParcelType::Fragile),
            "express" => Ok(ParcelType::Express),
            other => Err(UnknownValue::ParcelType(other.to_string())),
        }
    }
}

/// Add-on service selected for a parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteOption {
    Insurance,
    Express,
    Signature,
}

impl QuoteOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteOption::Insurance => "insurance",
            QuoteOption::Express => "express",
            QuoteOption::Signature => "signature",
        }
    }
}

impl FromStr for QuoteOption {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insurance" => Ok(QuoteOption::Insurance),
            "express" => Ok(QuoteOption::Express),
            "signature" => Ok(QuoteOption::Signature),
            other => Err(UnknownValue::Option(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderKind {
    #[default]
    Individual,
    Company,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownValue {
    #[error("unknown parcel type: {0}")]
    ParcelType(String),
    #[error("unknown option: {0}")]
    Option(String),
}

/// Parcel data once every field has been checked and typed
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    pub parcel_type: ParcelType,
    pub weight_kg: f64,
    pub declared_value: f64,
    /// Selected options, duplicates removed, in request order
    pub options: Vec<QuoteOption>,
}

impl Parcel {
    pub fn has_option(&self, option: QuoteOption) -> bool {
        self.options.contains(&option)
    }

    /// Human readable volume stored alongside the quote
    pub fn volume_label(&self) -> String {
        format!("{} kg", self.weight_kg)
    }
}
