use serde::{Deserialize, Serialize};

use crate::model::parcel::ParcelType;

pub const STATUS_RECEIVED: &str = "received";
pub const PAYMENT_STATUS_UNPAID: &str = "unpaid";

/// Quote request summary as stored in the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub contact_email: String,
    pub contact_name: String,
    pub parcel_type: ParcelType,
    pub volume: String,
    pub price: f64,
    pub currency: String,
    pub status: String,
    pub payment_status: String,
    pub payable_online: bool,
    pub created_at: String,
}
