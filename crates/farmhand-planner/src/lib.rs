//! # Farmhand Planner
//!
//! Turns a list of requested weapons, armor pieces and charms into an ordered
//! gather-then-build plan.
//!
//! - [`ancestry`] walks a weapon's upgrade chain back to a craftable root
//! - [`normalize`] flattens catalog records into [`farmhand_core::CraftItem`]s
//! - [`aggregate`] greedily merges requirement lists into build steps
//! - [`materialize`] resolves step handles back to full items
//! - [`BuildPlanner`] runs the whole pipeline against a catalog

pub mod aggregate;
pub mod ancestry;
pub mod materialize;
pub mod normalize;
pub mod planner;

pub use aggregate::{aggregate, order_items, verify_plan};
pub use ancestry::expand_ancestry;
pub use materialize::materialize;
pub use normalize::normalize;
pub use planner::{BuildPlanner, ComputedPlan, PlannerConfig};
