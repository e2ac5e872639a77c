//! Plan API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use farmhand_core::{
    encode_route, parse_route, BuildRequest, CraftItem, DetailedPlan, FarmhandError,
    GatheredMaterial, ItemId, ItemKind, Rank, Rarity,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Request body for computing a plan.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Requested items; repeats are planned separately.
    #[serde(default)]
    pub items: Vec<BuildRequest>,
}

/// A computed plan.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan_id: Uuid,
    pub computed_at: String,
    /// Route encoding of the request, for sharing.
    pub route: String,
    pub steps: Vec<StepView>,
    /// Everything to gather over the whole plan.
    pub totals: Vec<GatheredMaterial>,
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub step: usize,
    pub gather: Vec<GatheredMaterial>,
    pub build: Vec<BuildItemView>,
}

#[derive(Debug, Serialize)]
pub struct BuildItemView {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub rank: Rank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl From<CraftItem> for BuildItemView {
    fn from(item: CraftItem) -> Self {
        Self {
            rank: item.rank(),
            id: item.id,
            name: item.name,
            kind: item.kind,
            rarity: item.rarity,
            level: item.level,
        }
    }
}

/// Compute a plan for a route such as `w1203+a87+c14`.
pub async fn build_from_route(
    State(state): State<AppState>,
    Path(route): Path<String>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let requests = parse_route(&route).map_err(plan_error)?;
    compute(&state, &requests).await.map(Json)
}

/// Compute a plan for a JSON list of items.
pub async fn plan_items(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    compute(&state, &req.items).await.map(Json)
}

async fn compute(
    state: &AppState,
    requests: &[BuildRequest],
) -> Result<PlanResponse, (StatusCode, String)> {
    let plan = state
        .planner
        .detailed_plan(requests)
        .await
        .map_err(plan_error)?;

    let response = to_response(requests, plan);
    info!(
        "📋 Plan {} for '{}' has {} steps",
        response.plan_id,
        response.route,
        response.steps.len()
    );

    Ok(response)
}

fn to_response(requests: &[BuildRequest], plan: DetailedPlan) -> PlanResponse {
    let totals = plan.totals();
    let steps = plan
        .steps
        .into_iter()
        .enumerate()
        .map(|(step, detailed)| StepView {
            step,
            gather: detailed.gather,
            build: detailed.build.into_iter().map(BuildItemView::from).collect(),
        })
        .collect();

    PlanResponse {
        plan_id: Uuid::new_v4(),
        computed_at: Utc::now().to_rfc3339(),
        route: encode_route(requests),
        steps,
        totals,
    }
}

fn plan_error(err: FarmhandError) -> (StatusCode, String) {
    warn!("❌ {}", err);

    let status = match err {
        FarmhandError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        FarmhandError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };

    (status, format!("unable to compute plan: {}", err))
}
