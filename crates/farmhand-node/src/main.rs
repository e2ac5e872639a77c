//! # Farmhand Node
//!
//! HTTP server exposing build planning and item search.

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod state;

use config::NodeConfig;
use state::AppState;

/// Run the Farmhand node server.
pub async fn run_server(config: NodeConfig) -> anyhow::Result<()> {
    info!("🚀 Farmhand Node starting...");
    info!("📚 Catalog at {}", config.catalog.base_url);

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    info!("🌐 Listening on http://{}", config.addr);

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router.
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health::health_check))
        .route("/api/v1/build/:route", get(api::plan::build_from_route))
        .route("/api/v1/plan", post(api::plan::plan_items))
        .route("/api/v1/search", get(api::search::search))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = NodeConfig::from_env()?;
    run_server(config).await
}
