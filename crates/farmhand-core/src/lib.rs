//! # Farmhand Core
//!
//! Core primitives and types for Farmhand build planning.
//!
//! This crate provides the fundamental building blocks:
//! - [`CraftItem`] - A uniform craftable record with a flat requirement list
//! - [`CatalogRecord`] - Tagged union over raw weapon, armor and charm records
//! - [`BuildPlan`] - Ordered sequence of gather-then-build steps
//! - [`BuildRequest`] - A requested (kind, id) pair and its route encoding
//! - [`FarmhandError`] - Error types

pub mod catalog;
pub mod error;
pub mod item;
pub mod plan;
pub mod request;
pub mod types;

// Re-exports for convenience
pub use catalog::{ArmorPiece, CatalogRecord, Charm, CharmRank, WeaponNode};
pub use error::{FarmhandError, Result};
pub use item::{CraftItem, GatheredMaterial, MaterialRequirement};
pub use plan::{BuildPlan, BuildStep, DetailedPlan, DetailedStep, ItemHandle};
pub use request::{encode_route, parse_route, BuildRequest};
pub use types::*;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::catalog::{ArmorPiece, CatalogRecord, Charm, CharmRank, WeaponNode};
    pub use crate::error::{FarmhandError, Result};
    pub use crate::item::{CraftItem, GatheredMaterial, MaterialRequirement};
    pub use crate::plan::{BuildPlan, BuildStep, DetailedPlan, DetailedStep, ItemHandle};
    pub use crate::request::BuildRequest;
    pub use crate::types::{CatalogKind, ItemId, ItemKind, MaterialId, Rank};
}
