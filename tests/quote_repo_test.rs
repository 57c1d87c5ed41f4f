use chrono::Utc;
use freight_quote_backend::config::mongo_conf::MongoConfig;
use freight_quote_backend::model::parcel::ParcelType;
use freight_quote_backend::model::quote::{QuoteRecord, PAYMENT_STATUS_UNPAID, STATUS_RECEIVED};
use freight_quote_backend::repository::quote_repo::{MongoQuoteRepository, QuoteRepository};
use freight_quote_backend::repository::repository_error::RepositoryError;

async fn setup_quote_repository() -> MongoQuoteRepository {
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env().expect("MONGO_URI and MONGO_DATABASE must be set");
    MongoQuoteRepository::new(&config).await.expect("Failed to setup MongoQuoteRepository")
}

// Needs a running MongoDB: cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_quote_record_roundtrip() {
    let repo = setup_quote_repository().await;
    let record = QuoteRecord {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: "user-42".to_string(),
        contact_email: "camille@example.com".to_string(),
        contact_name: "Camille Martin".to_string(),
        parcel_type: ParcelType::Fragile,
        volume: "3.5 kg".to_string(),
        price: 101.25,
        currency: "EUR".to_string(),
        status: STATUS_RECEIVED.to_string(),
        payment_status: PAYMENT_STATUS_UNPAID.to_string(),
        payable_online: true,
        created_at: Utc::now().to_rfc3339(),
    };

    let created = repo.create(record.clone()).await.expect("insert failed");
    assert_eq!(created, record);

    let fetched = repo.get_by_id(&record.id).await.expect("fetch failed");
    assert_eq!(fetched, record);

    let duplicate = repo.create(record).await;
    assert!(matches!(duplicate, Err(RepositoryError::AlreadyExists(_))));
}

#[tokio::test]
#[ignore]
async fn test_unknown_quote_not_found() {
    let repo = setup_quote_repository().await;
    let result = repo.get_by_id("does-not-exist").await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}
