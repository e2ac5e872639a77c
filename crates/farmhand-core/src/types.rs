//! Common types used across Farmhand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog identifier of a weapon, armor piece or charm.
pub type ItemId = u32;

/// Catalog identifier of a crafting material. Materials merge on this key.
pub type MaterialId = u32;

/// Rarity as reported by the catalog (1 to 12).
pub type Rarity = u8;

/// The catalog a record is looked up in.
///
/// Ordering follows the order requested items arrive at the aggregator:
/// weapons, then armor, then charms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Weapon,
    Armor,
    Charm,
}

impl CatalogKind {
    /// All catalog kinds, in arrival order.
    pub const ALL: [CatalogKind; 3] = [CatalogKind::Weapon, CatalogKind::Armor, CatalogKind::Charm];

    /// Single-letter prefix used in route encoding.
    pub fn route_prefix(self) -> char {
        match self {
            CatalogKind::Weapon => 'w',
            CatalogKind::Armor => 'a',
            CatalogKind::Charm => 'c',
        }
    }

    /// Inverse of [`CatalogKind::route_prefix`].
    pub fn from_route_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'w' => Some(CatalogKind::Weapon),
            'a' => Some(CatalogKind::Armor),
            'c' => Some(CatalogKind::Charm),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogKind::Weapon => "weapon",
            CatalogKind::Armor => "armor",
            CatalogKind::Charm => "charm",
        };
        f.write_str(name)
    }
}

/// Kind of a normalized craft item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    CharmRank,
}

impl ItemKind {
    /// The catalog this kind of item comes from.
    pub fn catalog_kind(self) -> CatalogKind {
        match self {
            ItemKind::Weapon => CatalogKind::Weapon,
            ItemKind::Armor => CatalogKind::Armor,
            ItemKind::CharmRank => CatalogKind::Charm,
        }
    }
}

/// Hunter rank band an item belongs to, derived from rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// Rarity 1 to 4.
    Low,
    /// Rarity 5 to 8.
    High,
    /// Rarity 9 and above.
    Master,
}

impl Rank {
    /// Classify a rarity into its rank band.
    pub fn from_rarity(rarity: Rarity) -> Self {
        match rarity {
            0..=4 => Rank::Low,
            5..=8 => Rank::High,
            _ => Rank::Master,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_bands() {
        assert_eq!(Rank::from_rarity(1), Rank::Low);
        assert_eq!(Rank::from_rarity(4), Rank::Low);
        assert_eq!(Rank::from_rarity(5), Rank::High);
        assert_eq!(Rank::from_rarity(8), Rank::High);
        assert_eq!(Rank::from_rarity(9), Rank::Master);
        assert_eq!(Rank::from_rarity(12), Rank::Master);
    }

    #[test]
    fn test_route_prefix() {
        for kind in CatalogKind::ALL {
            assert_eq!(CatalogKind::from_route_prefix(kind.route_prefix()), Some(kind));
        }
        assert_eq!(CatalogKind::from_route_prefix('x'), None);
    }

    #[test]
    fn test_catalog_kind_arrival_order() {
        assert!(CatalogKind::Weapon < CatalogKind::Armor);
        assert!(CatalogKind::Armor < CatalogKind::Charm);
    }
}
