//! Build planner and configuration.

use std::sync::Arc;
use std::time::Instant;

use farmhand_catalog::Catalog;
use farmhand_core::{
    BuildPlan, BuildRequest, CatalogKind, CraftItem, DetailedPlan, FarmhandError, Result,
};
use futures::{stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, verify_plan};
use crate::ancestry::expand_ancestry;
use crate::materialize::materialize;
use crate::normalize::{normalize, normalize_weapon};

/// Configuration for the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum number of links followed in one weapon's ancestry.
    pub max_chain_depth: usize,

    /// Maximum number of requested items resolved concurrently.
    pub max_concurrent_lookups: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: 32,
            max_concurrent_lookups: 8,
        }
    }
}

/// Items resolved for a request and the plan computed over them.
///
/// Plan handles index into `items`.
#[derive(Debug, Clone)]
pub struct ComputedPlan {
    pub items: Vec<CraftItem>,
    pub plan: BuildPlan,
}

impl ComputedPlan {
    /// Resolve handles to full items.
    pub fn detailed(&self) -> Result<DetailedPlan> {
        materialize(&self.plan, &self.items)
    }
}

/// Resolves requested items through a catalog and plans their construction.
pub struct BuildPlanner<C: ?Sized = dyn Catalog> {
    catalog: Arc<C>,
    config: PlannerConfig,
}

impl<C: Catalog + ?Sized> BuildPlanner<C> {
    /// Create a planner with default configuration.
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_config(catalog, PlannerConfig::default())
    }

    /// Create a planner with custom configuration.
    pub fn with_config(catalog: Arc<C>, config: PlannerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PlannerConfig) {
        self.config = config;
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    /// Fetch and normalize every requested item.
    ///
    /// Requests resolve concurrently. Results arrive grouped by kind
    /// (weapons with their ancestry, then armor, then charm ranks), keeping
    /// request order within a kind. The first failure aborts the rest.
    pub async fn resolve_items(&self, requests: &[BuildRequest]) -> Result<Vec<CraftItem>> {
        let mut ordered = requests.to_vec();
        ordered.sort_by_key(|r| r.kind);

        let mut lookups = Vec::with_capacity(ordered.len());
        for request in ordered {
            lookups.push(self.resolve_request(request));
        }

        let groups: Vec<Vec<CraftItem>> = stream::iter(lookups)
            .buffered(self.config.max_concurrent_lookups.max(1))
            .try_collect()
            .await?;

        Ok(groups.into_iter().flatten().collect())
    }

    async fn resolve_request(&self, request: BuildRequest) -> Result<Vec<CraftItem>> {
        debug!("Resolving {} {}", request.kind, request.id);

        if request.kind == CatalogKind::Weapon {
            let chain = expand_ancestry(self.catalog.as_ref(), request.id, self.config.max_chain_depth).await?;
            return chain.iter().map(normalize_weapon).collect();
        }

        let record = self.catalog.fetch_item(request.kind, request.id).await?;
        if record.kind() != request.kind {
            return Err(FarmhandError::malformed(
                request.kind,
                request.id,
                format!("expected a {} record for {}, got {}", request.kind, request.id, record.kind()),
            ));
        }

        normalize(&record)
    }

    /// Resolve the request and aggregate it into a plan.
    pub async fn plan(&self, requests: &[BuildRequest]) -> Result<ComputedPlan> {
        let start_time = Instant::now();
        info!("Planning {} requested items", requests.len());

        let items = match self.resolve_items(requests).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Unable to compute plan: {}", e);
                return Err(e);
            }
        };

        let plan = aggregate(&items);
        verify_plan(&plan, &items)?;

        info!(
            "Planned {} items into {} steps in {}ms",
            items.len(),
            plan.len(),
            start_time.elapsed().as_millis()
        );

        Ok(ComputedPlan { items, plan })
    }

    /// Resolve, aggregate and materialize in one go.
    pub async fn detailed_plan(&self, requests: &[BuildRequest]) -> Result<DetailedPlan> {
        self.plan(requests).await?.detailed()
    }
}
