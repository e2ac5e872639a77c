//! Search endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use farmhand_catalog::{search_all, SearchHit};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Name prefix.
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

/// Search weapons, armor and charms by name prefix.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let hits = search_all(state.catalog.as_ref(), &params.q)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, format!("unable to search: {}", e)))?;

    Ok(Json(SearchResponse {
        query: params.q,
        hits,
    }))
}
