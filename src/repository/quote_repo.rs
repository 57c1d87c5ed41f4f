use async_trait::async_trait;
use bson::doc;
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::model::quote::QuoteRecord;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, record: QuoteRecord) -> RepositoryResult<QuoteRecord>;
    async fn get_by_id(&self, id: &str) -> RepositoryResult<QuoteRecord>;
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<QuoteRecord>,
}

impl MongoQuoteRepository {
    /// Create a new MongoQuoteRepository using MongoConfig.
    /// The driver connects lazily, so an unreachable server only shows up on the first write.
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{
            options::{ClientOptions, Credential},
            Client,
        };

        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("FreightQuoteBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
        client_options.server_selection_timeout = Some(config.write_timeout());

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let collection = client
            .database(&config.database)
            .collection::<QuoteRecord>(&config.quote_collection);
        Ok(MongoQuoteRepository { collection })
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, record), fields(quote_id = %record.id))]
    async fn create(&self, record: QuoteRecord) -> RepositoryResult<QuoteRecord> {
        info!("Inserting quote record");
        match self.collection.insert_one(&record, None).await {
            Ok(_) => {
                info!("Quote record inserted");
                Ok(record)
            }
            Err(e) => {
                error!("Failed to insert quote record: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<QuoteRecord> {
        match self.collection.find_one(doc! { "_id": id }, None).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(RepositoryError::not_found(format!("Quote not found for ID: {}", id))),
            Err(e) => {
                error!("Failed to fetch quote record: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }
}
