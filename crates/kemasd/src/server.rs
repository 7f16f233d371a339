//! HTTP server for kemasd.

use crate::config::Config;
use crate::jamai::JamaiClient;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    pub config: Config,
    /// Present only when both upstream credentials are configured.
    pub jamai: Option<JamaiClient>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let jamai = config.credentials().map(|(api_key, project_id)| {
            JamaiClient::new(&config.api_url, api_key, project_id, &config.table_id)
        });
        Self {
            config,
            jamai,
            start_time: Instant::now(),
        }
    }
}

/// Assemble the router. Split out of `run` so tests can drive it
/// without binding a socket.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::normalize_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until ctrl_c.
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down gracefully");
}
