//! Normalized craft items and their material requirements.
//!
//! A [`CraftItem`] is the uniform record every weapon chain node, armor piece
//! and charm rank is turned into before aggregation. It is immutable once
//! built.

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, ItemKind, MaterialId, Rank, Rarity};

/// A quantity of one material needed to craft an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// Merge key.
    pub material_id: MaterialId,

    /// Display name of the material.
    pub material_name: String,

    /// How many are needed. Always positive for normalized items.
    pub quantity: u32,
}

impl MaterialRequirement {
    /// Create a new requirement.
    pub fn new(material_id: MaterialId, material_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            material_id,
            material_name: material_name.into(),
            quantity,
        }
    }
}

/// A summed quantity of one material to gather.
///
/// Sums run over many requirements, so the quantity is wider than a single
/// requirement's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatheredMaterial {
    pub material_id: MaterialId,
    pub material_name: String,
    pub quantity: u64,
}

impl GatheredMaterial {
    pub fn new(material_id: MaterialId, material_name: impl Into<String>, quantity: u64) -> Self {
        Self {
            material_id,
            material_name: material_name.into(),
            quantity,
        }
    }

    /// Add one more requirement for the same material.
    pub fn add(&mut self, requirement: &MaterialRequirement) {
        self.quantity += u64::from(requirement.quantity);
    }
}

impl From<&MaterialRequirement> for GatheredMaterial {
    fn from(requirement: &MaterialRequirement) -> Self {
        Self::new(
            requirement.material_id,
            requirement.material_name.clone(),
            u64::from(requirement.quantity),
        )
    }
}

/// A craftable item in uniform shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftItem {
    /// Catalog identifier. Charm ranks share their charm's identifier.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Weapon, armor or charm rank.
    pub kind: ItemKind,

    /// Rarity; only used to break ordering ties.
    pub rarity: Rarity,

    /// Rank level, for charm ranks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    /// Materials needed, in catalog order.
    pub requirements: Vec<MaterialRequirement>,
}

impl CraftItem {
    /// Create an item with no requirements.
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            rarity,
            level: None,
            requirements: Vec::new(),
        }
    }

    /// Set the charm rank level.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    /// Append a requirement.
    pub fn require(
        mut self,
        material_id: MaterialId,
        material_name: impl Into<String>,
        quantity: u32,
    ) -> Self {
        self.requirements
            .push(MaterialRequirement::new(material_id, material_name, quantity));
        self
    }

    /// Replace the requirement list.
    pub fn with_requirements(mut self, requirements: Vec<MaterialRequirement>) -> Self {
        self.requirements = requirements;
        self
    }

    /// Number of entries in the requirement list.
    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
    }

    /// Rank band of this item.
    pub fn rank(&self) -> Rank {
        Rank::from_rarity(self.rarity)
    }

    /// Total quantity of one material this item needs.
    pub fn quantity_of(&self, material_id: MaterialId) -> u64 {
        self.requirements
            .iter()
            .filter(|r| r.material_id == material_id)
            .map(|r| u64::from(r.quantity))
            .sum()
    }
}
