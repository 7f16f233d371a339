//! kemasd entry point.

use anyhow::Result;
use kemasd::config::Config;
use kemasd::server::{self, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("kemasd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    info!(
        "  Table: {}  Upstream: {}",
        config.table_id, config.api_url
    );
    if config.credentials().is_none() {
        warn!("JAMAI_BASE_API_KEY / JAMAI_BASE_PROJECT_ID not set - normalization requests will fail until configured");
    }

    server::run(AppState::new(config)).await
}
