use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, AuthConfig, MongoConfig, PricingConfig};
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::quote_repo::MongoQuoteRepository;
use crate::router::api_router;
use crate::service::pricing::PriceCalculator;
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::jwt::JwtAuthVerifier;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;
        let auth_config = AuthConfig::from_env()?;
        let pricing_config = PricingConfig::from_env()?;

        let quote_repo = Arc::new(MongoQuoteRepository::new(&mongo_config).await?);
        let quote_service: Arc<dyn QuoteService> = Arc::new(QuoteServiceImpl::new(
            quote_repo,
            PriceCalculator::new(pricing_config),
            mongo_config.write_timeout(),
        ));

        let auth_state = Arc::new(AuthState {
            verifier: Arc::new(JwtAuthVerifier::new(auth_config)),
        });

        Ok(App {
            config,
            router: api_router(quote_service, auth_state),
        })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
