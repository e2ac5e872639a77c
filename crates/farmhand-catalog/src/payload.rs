//! mhw-db payload parsing.
//!
//! The REST API nests costs as `{ quantity, item: { id, name } }` and keeps
//! weapon costs under `crafting.craftingMaterials` / `crafting.upgradeMaterials`.
//! Missing lists are carried through as `None`; a cost entry without an item
//! or quantity makes the whole record malformed.

use farmhand_core::{
    ArmorPiece, CatalogKind, CatalogRecord, Charm, CharmRank, FarmhandError, ItemId,
    MaterialRequirement, Rarity, Result, WeaponNode,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawCost {
    quantity: Option<u32>,
    item: Option<RawMaterial>,
}

#[derive(Debug, Deserialize)]
struct RawMaterial {
    id: u32,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeaponCrafting {
    #[serde(default)]
    craftable: bool,
    previous: Option<ItemId>,
    #[serde(default)]
    branches: Vec<ItemId>,
    crafting_materials: Option<Vec<RawCost>>,
    upgrade_materials: Option<Vec<RawCost>>,
}

#[derive(Debug, Deserialize)]
struct RawWeapon {
    id: ItemId,
    name: String,
    #[serde(rename = "type", default)]
    weapon_type: String,
    rarity: Rarity,
    crafting: Option<RawWeaponCrafting>,
}

#[derive(Debug, Deserialize)]
struct RawMaterialList {
    materials: Option<Vec<RawCost>>,
}

#[derive(Debug, Deserialize)]
struct RawArmor {
    id: ItemId,
    name: String,
    #[serde(rename = "type", default)]
    armor_type: String,
    rarity: Rarity,
    crafting: Option<RawMaterialList>,
}

#[derive(Debug, Deserialize)]
struct RawCharmRank {
    level: u8,
    rarity: Rarity,
    crafting: Option<RawMaterialList>,
}

#[derive(Debug, Deserialize)]
struct RawCharm {
    id: ItemId,
    name: String,
    #[serde(default)]
    ranks: Vec<RawCharmRank>,
}

/// Parse one catalog payload of the given kind.
pub fn parse_record(kind: CatalogKind, value: Value) -> Result<CatalogRecord> {
    let id = value.get("id").and_then(Value::as_u64).map(|id| id as ItemId);
    let shape_error = |err: serde_json::Error| FarmhandError::MalformedRecord {
        kind,
        id,
        reason: err.to_string(),
    };

    match kind {
        CatalogKind::Weapon => {
            let raw: RawWeapon = serde_json::from_value(value).map_err(shape_error)?;
            parse_weapon(raw).map(CatalogRecord::Weapon)
        }
        CatalogKind::Armor => {
            let raw: RawArmor = serde_json::from_value(value).map_err(shape_error)?;
            parse_armor(raw).map(CatalogRecord::Armor)
        }
        CatalogKind::Charm => {
            let raw: RawCharm = serde_json::from_value(value).map_err(shape_error)?;
            parse_charm(raw).map(CatalogRecord::Charm)
        }
    }
}

/// Parse a search response body: a JSON array of payloads.
pub fn parse_records(kind: CatalogKind, value: Value) -> Result<Vec<CatalogRecord>> {
    match value {
        Value::Array(items) => items.into_iter().map(|v| parse_record(kind, v)).collect(),
        other => Err(FarmhandError::LookupFailed {
            kind,
            message: format!("expected a list of records, got {}", json_type(&other)),
        }),
    }
}

fn parse_weapon(raw: RawWeapon) -> Result<WeaponNode> {
    let kind = CatalogKind::Weapon;
    let crafting = raw.crafting.ok_or_else(|| {
        FarmhandError::malformed(kind, raw.id, format!("weapon {} has no crafting data", raw.id))
    })?;

    Ok(WeaponNode {
        id: raw.id,
        name: raw.name,
        weapon_type: raw.weapon_type,
        rarity: raw.rarity,
        craftable: crafting.craftable,
        previous: crafting.previous,
        branches: crafting.branches,
        crafting_materials: convert_costs(kind, raw.id, crafting.crafting_materials)?,
        upgrade_materials: convert_costs(kind, raw.id, crafting.upgrade_materials)?,
    })
}

fn parse_armor(raw: RawArmor) -> Result<ArmorPiece> {
    let materials = raw.crafting.and_then(|c| c.materials);

    Ok(ArmorPiece {
        id: raw.id,
        materials: convert_costs(CatalogKind::Armor, raw.id, materials)?,
        name: raw.name,
        armor_type: raw.armor_type,
        rarity: raw.rarity,
    })
}

fn parse_charm(raw: RawCharm) -> Result<Charm> {
    let ranks = raw
        .ranks
        .into_iter()
        .map(|rank| {
            Ok(CharmRank {
                level: rank.level,
                rarity: rank.rarity,
                materials: convert_costs(
                    CatalogKind::Charm,
                    raw.id,
                    rank.crafting.and_then(|c| c.materials),
                )?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Charm {
        id: raw.id,
        name: raw.name,
        ranks,
    })
}

fn convert_costs(
    kind: CatalogKind,
    id: ItemId,
    costs: Option<Vec<RawCost>>,
) -> Result<Option<Vec<MaterialRequirement>>> {
    let Some(costs) = costs else {
        return Ok(None);
    };

    costs
        .into_iter()
        .map(|cost| {
            let item = cost.item.ok_or_else(|| {
                FarmhandError::malformed(kind, id, format!("{} {} has a cost without an item", kind, id))
            })?;
            let quantity = cost.quantity.ok_or_else(|| {
                FarmhandError::malformed(
                    kind,
                    id,
                    format!("{} {} has no quantity for material {}", kind, id, item.id),
                )
            })?;

            Ok(MaterialRequirement {
                material_id: item.id,
                material_name: item.name.unwrap_or_default(),
                quantity,
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
