//! Raw catalog records.
//!
//! The catalog serves three differently shaped payloads. They are modelled as
//! a tagged union so the normalizer can match exhaustively. Requirement lists
//! stay optional here: a missing list is a malformed record, and deciding
//! that is the normalizer's job.

use serde::{Deserialize, Serialize};

use crate::item::MaterialRequirement;
use crate::types::{CatalogKind, ItemId, Rarity};

/// A record fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogRecord {
    Weapon(WeaponNode),
    Armor(ArmorPiece),
    Charm(Charm),
}

/// One node of a weapon upgrade tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponNode {
    pub id: ItemId,
    pub name: String,
    /// Weapon class, e.g. "great-sword".
    pub weapon_type: String,
    pub rarity: Rarity,
    /// Buildable from raw materials without an upgrade predecessor.
    pub craftable: bool,
    /// Upgrade predecessor.
    pub previous: Option<ItemId>,
    /// Upgrade successors.
    #[serde(default)]
    pub branches: Vec<ItemId>,
    /// Cost when crafted directly.
    pub crafting_materials: Option<Vec<MaterialRequirement>>,
    /// Cost when upgraded from `previous`.
    pub upgrade_materials: Option<Vec<MaterialRequirement>>,
}

/// A single armor piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorPiece {
    pub id: ItemId,
    pub name: String,
    /// Slot, e.g. "head" or "chest".
    pub armor_type: String,
    pub rarity: Rarity,
    pub materials: Option<Vec<MaterialRequirement>>,
}

/// A charm and all of its ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charm {
    pub id: ItemId,
    pub name: String,
    pub ranks: Vec<CharmRank>,
}

/// One rank of a charm, crafted independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharmRank {
    pub level: u8,
    pub rarity: Rarity,
    pub materials: Option<Vec<MaterialRequirement>>,
}

impl CatalogRecord {
    /// The catalog this record belongs to.
    pub fn kind(&self) -> CatalogKind {
        match self {
            CatalogRecord::Weapon(_) => CatalogKind::Weapon,
            CatalogRecord::Armor(_) => CatalogKind::Armor,
            CatalogRecord::Charm(_) => CatalogKind::Charm,
        }
    }

    pub fn id(&self) -> ItemId {
        match self {
            CatalogRecord::Weapon(w) => w.id,
            CatalogRecord::Armor(a) => a.id,
            CatalogRecord::Charm(c) => c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogRecord::Weapon(w) => &w.name,
            CatalogRecord::Armor(a) => &a.name,
            CatalogRecord::Charm(c) => &c.name,
        }
    }

    /// Type label shown next to search hits.
    pub fn type_label(&self) -> &str {
        match self {
            CatalogRecord::Weapon(w) => &w.weapon_type,
            CatalogRecord::Armor(a) => &a.armor_type,
            CatalogRecord::Charm(_) => "charm",
        }
    }

    /// Display rarity. A charm reports its highest rank's rarity.
    pub fn display_rarity(&self) -> Rarity {
        match self {
            CatalogRecord::Weapon(w) => w.rarity,
            CatalogRecord::Armor(a) => a.rarity,
            CatalogRecord::Charm(c) => c.ranks.iter().map(|r| r.rarity).max().unwrap_or(0),
        }
    }
}
