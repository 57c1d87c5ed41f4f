#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower::ServiceExt;

use freight_quote_backend::config::{AuthConfig, PricingConfig};
use freight_quote_backend::dto::quote_dto::{QuoteRequest, QuoteResponseDto};
use freight_quote_backend::middlewares::auth_middleware::AuthState;
use freight_quote_backend::model::quote::QuoteRecord;
use freight_quote_backend::repository::quote_repo::QuoteRepository;
use freight_quote_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use freight_quote_backend::router::api_router;
use freight_quote_backend::service::pricing::PriceCalculator;
use freight_quote_backend::service::quote_service::{QuoteService, QuoteServiceImpl};
use freight_quote_backend::util::error::ServiceError;
use freight_quote_backend::util::jwt::{AuthenticatedCaller, JwtAuthVerifier};

/// Keeps inserted records in memory
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    pub records: Mutex<Vec<QuoteRecord>>,
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn create(&self, record: QuoteRecord) -> RepositoryResult<QuoteRecord> {
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<QuoteRecord> {
        self.records
            .lock()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(id.to_string()))
    }
}

/// Every write fails, as if the store were down
pub struct FailingQuoteRepository;

#[async_trait]
impl QuoteRepository for FailingQuoteRepository {
    async fn create(&self, _record: QuoteRecord) -> RepositoryResult<QuoteRecord> {
        Err(RepositoryError::database("connection refused"))
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<QuoteRecord> {
        Err(RepositoryError::not_found(id.to_string()))
    }
}

/// Never answers within the write timeout
pub struct StalledQuoteRepository;

#[async_trait]
impl QuoteRepository for StalledQuoteRepository {
    async fn create(&self, record: QuoteRecord) -> RepositoryResult<QuoteRecord> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(record)
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<QuoteRecord> {
        Err(RepositoryError::not_found(id.to_string()))
    }
}

/// Panics on every call, standing in for any bug below the handler
pub struct PanickingQuoteService;

#[async_trait]
impl QuoteService for PanickingQuoteService {
    async fn request_quote(
        &self,
        _request: QuoteRequest,
        _caller: &AuthenticatedCaller,
    ) -> Result<QuoteResponseDto, ServiceError> {
        panic!("pricing table corrupted")
    }
}

pub const WRITE_TIMEOUT: Duration = Duration::from_millis(100);

pub fn verifier() -> JwtAuthVerifier {
    JwtAuthVerifier::new(AuthConfig::from_test_env())
}

pub fn valid_token() -> String {
    verifier()
        .issue_token("user-42", Some("client@example.com"), Some("authenticated"), 15)
        .unwrap()
}

pub fn quote_service(repo: Arc<dyn QuoteRepository>) -> Arc<dyn QuoteService> {
    quote_service_with_tariff(repo, PricingConfig::default())
}

/// The tariff is taken as given, without `validate()`
pub fn quote_service_with_tariff(repo: Arc<dyn QuoteRepository>, tariff: PricingConfig) -> Arc<dyn QuoteService> {
    Arc::new(QuoteServiceImpl::new(repo, PriceCalculator::new(tariff), WRITE_TIMEOUT))
}

pub fn app_with(repo: Arc<dyn QuoteRepository>) -> Router {
    app_with_service(quote_service(repo))
}

pub fn app_with_service(service: Arc<dyn QuoteService>) -> Router {
    let auth_state = Arc::new(AuthState {
        verifier: Arc::new(verifier()),
    });
    api_router(service, auth_state)
}

pub fn quote_request(parcel: Value) -> Value {
    json!({
        "sender": {
            "kind": "individual",
            "name": "Camille Martin",
            "phone": "+33612345678",
            "email": "camille@example.com"
        },
        "pickup": { "address": "12 quai de la Joliette", "city": "Marseille", "country": "FR" },
        "delivery": { "address": "4 Rue du Rhône", "city": "Genève", "country": "CH" },
        "parcel": parcel
    })
}

pub fn post_quote(body: String, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/quote-requests")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
