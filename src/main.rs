use dotenv::dotenv;
use tracing::{error, info, warn};

use freight_quote_backend::app::app::App;
use freight_quote_backend::util::logger::Logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before the logger so .env can set RUST_LOG and the file levels
    let env_loaded = dotenv();

    let _logger = Logger::new()?;
    info!("🚀 Starting freight quote backend");

    match env_loaded {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialise application: {e}");
            return Err(e);
        }
    };
    app.start().await
}
