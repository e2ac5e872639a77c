//! Aggregate search across all catalogs.

use farmhand_core::{CatalogKind, CatalogRecord, ItemId, Rank, Rarity, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::Catalog;

/// A search result, flattened for display and selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: CatalogKind,
    pub id: ItemId,
    pub name: String,
    /// Weapon class, armor slot, or "charm".
    pub type_label: String,
    pub rarity: Rarity,
    pub rank: Rank,
}

impl From<&CatalogRecord> for SearchHit {
    fn from(record: &CatalogRecord) -> Self {
        let rarity = record.display_rarity();
        Self {
            kind: record.kind(),
            id: record.id(),
            name: record.name().to_string(),
            type_label: record.type_label().to_string(),
            rarity,
            rank: Rank::from_rarity(rarity),
        }
    }
}

/// Search weapons, armor and charms by name prefix concurrently.
///
/// Hits are ordered by ascending rarity, then kind. A blank query returns
/// nothing without touching the catalog.
pub async fn search_all<C>(catalog: &C, query: &str) -> Result<Vec<SearchHit>>
where
    C: Catalog + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let (weapons, armor, charms) = futures::try_join!(
        catalog.search_items(CatalogKind::Weapon, query),
        catalog.search_items(CatalogKind::Armor, query),
        catalog.search_items(CatalogKind::Charm, query),
    )?;

    let mut hits: Vec<SearchHit> = weapons
        .iter()
        .chain(armor.iter())
        .chain(charms.iter())
        .map(SearchHit::from)
        .collect();
    hits.sort_by_key(|h| h.rarity);

    info!("Search '{}' matched {} items", query, hits.len());

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalog;
    use farmhand_core::{ArmorPiece, Charm, CharmRank, WeaponNode};

    fn fixture() -> InMemoryCatalog {
        InMemoryCatalog::with_records([
            CatalogRecord::Weapon(WeaponNode {
                id: 10,
                name: "Jagras Blade".to_string(),
                weapon_type: "long-sword".to_string(),
                rarity: 3,
                craftable: true,
                previous: None,
                branches: vec![],
                crafting_materials: Some(vec![]),
                upgrade_materials: None,
            }),
            CatalogRecord::Armor(ArmorPiece {
                id: 20,
                name: "Jagras Helm".to_string(),
                armor_type: "head".to_string(),
                rarity: 2,
                materials: Some(vec![]),
            }),
            CatalogRecord::Charm(Charm {
                id: 30,
                name: "Jagras Charm".to_string(),
                ranks: vec![
                    CharmRank { level: 1, rarity: 5, materials: Some(vec![]) },
                    CharmRank { level: 2, rarity: 9, materials: Some(vec![]) },
                ],
            }),
            CatalogRecord::Armor(ArmorPiece {
                id: 21,
                name: "Kulu Headpiece".to_string(),
                armor_type: "head".to_string(),
                rarity: 2,
                materials: Some(vec![]),
            }),
        ])
    }

    #[tokio::test]
    async fn test_search_all_sorted_by_rarity() {
        let catalog = fixture();
        let hits = search_all(&catalog, "jagras").await.unwrap();

        let ids: Vec<ItemId> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![20, 10, 30]);

        let charm = &hits[2];
        assert_eq!(charm.rarity, 9);
        assert_eq!(charm.rank, Rank::Master);
        assert_eq!(charm.type_label, "charm");
    }

    #[tokio::test]
    async fn test_blank_query_skips_catalog() {
        let catalog = fixture();
        assert!(search_all(&catalog, "   ").await.unwrap().is_empty());
        assert!(search_all(&catalog, "").await.unwrap().is_empty());
        assert_eq!(catalog.search_count(), 0);
        assert_eq!(catalog.lookup_count(), 0);

        search_all(&catalog, "jagras").await.unwrap();
        assert_eq!(catalog.search_count(), 3);
    }
}
