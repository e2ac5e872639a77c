//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Where catalog records are fetched from.
    pub catalog: String,
    pub max_chain_depth: usize,
    pub max_concurrent_lookups: usize,
}

/// Report liveness along with the catalog and planner limits in effect.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.planner.config();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog: state.catalog.source(),
        max_chain_depth: config.max_chain_depth,
        max_concurrent_lookups: config.max_concurrent_lookups,
    })
}
