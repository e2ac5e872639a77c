//! Application state.

use std::sync::Arc;

use farmhand_catalog::{Catalog, MhwDbCatalog};
use farmhand_core::Result;
use farmhand_planner::{BuildPlanner, PlannerConfig};

use crate::config::NodeConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The item catalog.
    pub catalog: Arc<dyn Catalog>,

    /// The planner, resolving through `catalog`.
    pub planner: Arc<BuildPlanner>,
}

impl AppState {
    /// Create state over any catalog.
    pub fn new(catalog: Arc<dyn Catalog>, config: PlannerConfig) -> Self {
        Self {
            planner: Arc::new(BuildPlanner::with_config(catalog.clone(), config)),
            catalog,
        }
    }

    /// Create state backed by the mhw-db catalog.
    pub fn from_config(config: &NodeConfig) -> Result<Self> {
        let catalog = MhwDbCatalog::new(&config.catalog)?;
        Ok(Self::new(Arc::new(catalog), config.planner.clone()))
    }
}
