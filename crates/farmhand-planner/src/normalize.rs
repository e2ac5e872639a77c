//! Item normalization.
//!
//! Each catalog shape becomes one or more [`CraftItem`]s with a flat,
//! validated requirement list. Every rank of a charm is its own item.

use farmhand_core::{
    ArmorPiece, CatalogKind, CatalogRecord, Charm, CraftItem, FarmhandError, ItemId, ItemKind,
    MaterialRequirement, Result, WeaponNode,
};

/// Normalize any catalog record.
pub fn normalize(record: &CatalogRecord) -> Result<Vec<CraftItem>> {
    match record {
        CatalogRecord::Weapon(node) => normalize_weapon(node).map(|item| vec![item]),
        CatalogRecord::Armor(piece) => normalize_armor(piece).map(|item| vec![item]),
        CatalogRecord::Charm(charm) => normalize_charm(charm),
    }
}

/// A weapon node costs its crafting materials when directly craftable and
/// its upgrade materials otherwise.
pub fn normalize_weapon(node: &WeaponNode) -> Result<CraftItem> {
    let (list, label) = if node.craftable {
        (&node.crafting_materials, "crafting materials")
    } else {
        (&node.upgrade_materials, "upgrade materials")
    };
    let requirements = checked(CatalogKind::Weapon, node.id, list.as_deref(), label)?;

    Ok(CraftItem::new(node.id, &node.name, ItemKind::Weapon, node.rarity).with_requirements(requirements))
}

pub fn normalize_armor(piece: &ArmorPiece) -> Result<CraftItem> {
    let requirements = checked(CatalogKind::Armor, piece.id, piece.materials.as_deref(), "materials")?;

    Ok(CraftItem::new(piece.id, &piece.name, ItemKind::Armor, piece.rarity).with_requirements(requirements))
}

/// One item per rank, in rank order.
pub fn normalize_charm(charm: &Charm) -> Result<Vec<CraftItem>> {
    if charm.ranks.is_empty() {
        return Err(FarmhandError::malformed(
            CatalogKind::Charm,
            charm.id,
            format!("charm {} has no ranks", charm.id),
        ));
    }

    charm
        .ranks
        .iter()
        .map(|rank| {
            let label = format!("rank {} materials", rank.level);
            let requirements = checked(CatalogKind::Charm, charm.id, rank.materials.as_deref(), &label)?;

            Ok(CraftItem::new(charm.id, &charm.name, ItemKind::CharmRank, rank.rarity)
                .with_level(rank.level)
                .with_requirements(requirements))
        })
        .collect()
}

fn checked(
    kind: CatalogKind,
    id: ItemId,
    list: Option<&[MaterialRequirement]>,
    label: &str,
) -> Result<Vec<MaterialRequirement>> {
    let list = list.ok_or_else(|| {
        FarmhandError::malformed(kind, id, format!("{} {} has no {}", kind, id, label))
    })?;

    if let Some(zero) = list.iter().find(|r| r.quantity == 0) {
        return Err(FarmhandError::malformed(
            kind,
            id,
            format!("{} {} needs zero of material {}", kind, id, zero.material_id),
        ));
    }

    Ok(list.to_vec())
}
