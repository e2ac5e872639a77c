//! Weapon ancestry expansion.

use farmhand_catalog::Catalog;
use farmhand_core::{CatalogKind, CatalogRecord, FarmhandError, ItemId, Result, WeaponNode};
use tracing::debug;

/// Follow a weapon's upgrade predecessors until a craftable node or a node
/// without a predecessor.
///
/// Returns the chain from the requested weapon to its earliest ancestor.
/// Links are fetched one after another since each predecessor id is only
/// known once the previous fetch returns. Any failed fetch fails the whole
/// chain, and a chain longer than `max_depth` links is treated as malformed
/// catalog data.
pub async fn expand_ancestry<C>(catalog: &C, id: ItemId, max_depth: usize) -> Result<Vec<WeaponNode>>
where
    C: Catalog + ?Sized,
{
    let mut chain: Vec<WeaponNode> = Vec::new();
    let mut current = id;

    loop {
        if chain.len() >= max_depth {
            return Err(FarmhandError::malformed(
                CatalogKind::Weapon,
                id,
                format!("ancestry of weapon {} exceeds {} links", id, max_depth),
            ));
        }

        let node = match catalog.fetch_item(CatalogKind::Weapon, current).await? {
            CatalogRecord::Weapon(node) => node,
            other => {
                return Err(FarmhandError::malformed(
                    CatalogKind::Weapon,
                    current,
                    format!("expected a weapon record for {}, got {}", current, other.kind()),
                ))
            }
        };

        let next = if node.craftable { None } else { node.previous };
        debug!(
            "Ancestry of weapon {}: link {} '{}' (next: {:?})",
            id,
            chain.len(),
            node.name,
            next
        );
        chain.push(node);

        match next {
            Some(previous) => current = previous,
            None => break,
        }
    }

    Ok(chain)
}
