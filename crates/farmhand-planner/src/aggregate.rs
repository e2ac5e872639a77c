//! Step aggregation.
//!
//! Items are ordered by ascending requirement count (fewest distinct
//! materials first), ties broken by descending rarity, arrival order kept
//! beyond that. Construction then walks the ordered items:
//!
//! 1. The next unprocessed item anchors a new step; its pending requirements
//!    seed the step's gather table.
//! 2. Every later item hands over each pending requirement whose material is
//!    already in the table; the quantity is added to the table entry.
//! 3. A later item with nothing left pending is built in this step.
//! 4. Other later items keep only their unmatched requirements.
//!
//! This is a greedy heuristic. It does not search for the plan with the
//! fewest steps.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use farmhand_core::{
    BuildPlan, BuildStep, CraftItem, FarmhandError, GatheredMaterial, ItemHandle, MaterialId,
    MaterialRequirement, Result,
};
use tracing::debug;

/// An item still waiting for a step, with the requirements not yet covered.
#[derive(Debug)]
struct PendingItem {
    handle: ItemHandle,
    remaining: Vec<MaterialRequirement>,
}

/// Gather list for the step under construction, keyed by material.
#[derive(Debug, Default)]
struct GatherTable {
    entries: BTreeMap<MaterialId, GatheredMaterial>,
}

impl GatherTable {
    fn seed(requirements: &[MaterialRequirement]) -> Self {
        let mut table = Self::default();
        for requirement in requirements {
            table
                .entries
                .entry(requirement.material_id)
                .and_modify(|entry| entry.add(requirement))
                .or_insert_with(|| GatheredMaterial::from(requirement));
        }
        table
    }

    /// Adds the requirement's quantity if its material is already being
    /// gathered. Returns whether it was covered.
    fn absorb(&mut self, requirement: &MaterialRequirement) -> bool {
        match self.entries.get_mut(&requirement.material_id) {
            Some(entry) => {
                entry.add(requirement);
                true
            }
            None => false,
        }
    }

    fn into_gather(self) -> Vec<GatheredMaterial> {
        self.entries.into_values().collect()
    }
}

/// Processing order of the items, as handles into `items`.
pub fn order_items(items: &[CraftItem]) -> Vec<ItemHandle> {
    let mut order: Vec<ItemHandle> = (0..items.len()).map(ItemHandle).collect();

    // Stable: equal keys keep arrival order.
    order.sort_by(|a, b| {
        let (a, b) = (&items[a.index()], &items[b.index()]);
        a.requirement_count()
            .cmp(&b.requirement_count())
            .then_with(|| b.rarity.cmp(&a.rarity))
    });

    order
}

/// Merge the items' requirement lists into build steps.
pub fn aggregate(items: &[CraftItem]) -> BuildPlan {
    let mut pending: VecDeque<PendingItem> = order_items(items)
        .into_iter()
        .map(|handle| PendingItem {
            handle,
            remaining: items[handle.index()].requirements.clone(),
        })
        .collect();

    let mut plan = BuildPlan::new();

    while let Some(anchor) = pending.pop_front() {
        let mut table = GatherTable::seed(&anchor.remaining);
        let mut build = vec![anchor.handle];

        pending.retain_mut(|later| {
            later.remaining.retain(|requirement| !table.absorb(requirement));
            if later.remaining.is_empty() {
                build.push(later.handle);
                false
            } else {
                true
            }
        });

        debug!(
            "Step {}: anchor {:?}, {} materials, {} items built, {} items pending",
            plan.len(),
            anchor.handle,
            table.entries.len(),
            build.len(),
            pending.len()
        );

        plan.steps.push(BuildStep {
            gather: table.into_gather(),
            build,
        });
    }

    plan
}

/// Check a plan against the items it was built from.
///
/// Every item must be built in exactly one step, every material must be
/// gathered in exactly the total quantity the items need, and an item built
/// in a step must have every one of its materials gathered in that step or an
/// earlier one. No item may be built in a step whose anchor needs more
/// distinct materials than it does.
pub fn verify_plan(plan: &BuildPlan, items: &[CraftItem]) -> Result<()> {
    let mut placements = vec![0usize; items.len()];
    let mut covered: HashSet<MaterialId> = HashSet::new();

    for (index, step) in plan.iter().enumerate() {
        let anchor = step
            .anchor()
            .ok_or_else(|| FarmhandError::Internal(format!("step {} builds nothing", index)))?;
        let anchor_count = item_at(items, anchor)?.requirement_count();

        covered.extend(step.gather.iter().map(|m| m.material_id));

        for &handle in &step.build {
            let item = item_at(items, handle)?;
            placements[handle.index()] += 1;

            if item.requirement_count() < anchor_count {
                return Err(FarmhandError::Internal(format!(
                    "step {} builds {:?} with {} requirements under an anchor with {}",
                    index,
                    handle,
                    item.requirement_count(),
                    anchor_count
                )));
            }

            if let Some(missing) = item.requirements.iter().find(|r| !covered.contains(&r.material_id)) {
                return Err(FarmhandError::Internal(format!(
                    "step {} builds {:?} before material {} is gathered",
                    index, handle, missing.material_id
                )));
            }
        }
    }

    if let Some(index) = placements.iter().position(|&count| count != 1) {
        return Err(FarmhandError::Internal(format!(
            "item {} is built {} times",
            index, placements[index]
        )));
    }

    let mut required: HashMap<MaterialId, u64> = HashMap::new();
    for requirement in items.iter().flat_map(|i| i.requirements.iter()) {
        *required.entry(requirement.material_id).or_insert(0) += u64::from(requirement.quantity);
    }

    let gathered = plan.total_gathered();
    let all_materials = required.keys().chain(gathered.keys()).copied().collect::<Vec<_>>();
    for material in all_materials {
        let need = required.get(&material).copied().unwrap_or(0);
        let got = gathered.get(&material).copied().unwrap_or(0);
        if need != got {
            return Err(FarmhandError::Internal(format!(
                "material {} gathered {} times but needed {}",
                material, got, need
            )));
        }
    }

    Ok(())
}

fn item_at(items: &[CraftItem], handle: ItemHandle) -> Result<&CraftItem> {
    items
        .get(handle.index())
        .ok_or_else(|| FarmhandError::Internal(format!("unknown item handle {:?}", handle)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmhand_core::ItemKind;

    const IRON: MaterialId = 1;
    const BONE: MaterialId = 2;
    const SCALE: MaterialId = 3;
    const SAC: MaterialId = 4;

    fn armor(id: u32, rarity: u8) -> CraftItem {
        CraftItem::new(id, format!("Armor {}", id), ItemKind::Armor, rarity)
    }

    fn handles(ids: &[usize]) -> Vec<ItemHandle> {
        ids.iter().copied().map(ItemHandle).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_plan() {
        let plan = aggregate(&[]);
        assert!(plan.is_empty());
        assert!(verify_plan(&plan, &[]).is_ok());
    }

    #[test]
    fn test_merge_scenario() {
        // A needs Iron x2 + Bone x1, B needs Iron x3.
        let items = vec![
            armor(1, 1).require(IRON, "Iron Ore", 2).require(BONE, "Monster Bone S", 1),
            armor(2, 1).require(IRON, "Iron Ore", 3),
        ];

        let plan = aggregate(&items);
        assert_eq!(plan.len(), 2);

        assert_eq!(plan.steps[0].build, handles(&[1]));
        assert_eq!(plan.steps[0].gather, vec![GatheredMaterial::new(IRON, "Iron Ore", 5)]);

        assert_eq!(plan.steps[1].build, handles(&[0]));
        assert_eq!(plan.steps[1].gather, vec![GatheredMaterial::new(BONE, "Monster Bone S", 1)]);

        let totals = plan.total_gathered();
        assert_eq!(totals[&IRON], 5);
        assert_eq!(totals[&BONE], 1);
        assert!(verify_plan(&plan, &items).is_ok());
    }

    #[test]
    fn test_fully_covered_item_is_absorbed() {
        let items = vec![
            armor(1, 1).require(IRON, "Iron Ore", 1).require(BONE, "Monster Bone S", 2),
            armor(2, 1).require(IRON, "Iron Ore", 4),
            armor(3, 1).require(BONE, "Monster Bone S", 1).require(IRON, "Iron Ore", 1),
        ];

        // Order: [1] then [0, 2]. Item 1 covers only the Iron of 0 and 2.
        // Item 0 then anchors with Bone and absorbs 2's remaining Bone.
        let plan = aggregate(&items);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.steps[0].build, handles(&[1]));
        assert_eq!(plan.steps[0].gathered(IRON), 6);
        assert_eq!(plan.steps[1].build, handles(&[0, 2]));
        assert_eq!(plan.steps[1].gathered(BONE), 3);
        assert_eq!(plan.steps[1].gathered(IRON), 0);
        assert!(verify_plan(&plan, &items).is_ok());
    }

    #[test]
    fn test_absorption_within_first_step() {
        let items = vec![
            armor(1, 1).require(IRON, "Iron Ore", 1),
            armor(2, 1).require(IRON, "Iron Ore", 2),
        ];

        let plan = aggregate(&items);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps[0].build, handles(&[0, 1]));
        assert_eq!(plan.steps[0].gathered(IRON), 3);
    }

    #[test]
    fn test_ordering_by_count_then_rarity_then_arrival() {
        let items = vec![
            armor(1, 2).require(IRON, "Iron Ore", 1).require(BONE, "Monster Bone S", 1),
            armor(2, 1).require(SCALE, "Scale", 1),
            armor(3, 6).require(SAC, "Sac", 1),
            armor(4, 1).require(BONE, "Monster Bone S", 1),
            armor(5, 1),
        ];

        assert_eq!(order_items(&items), handles(&[4, 2, 1, 3, 0]));
    }

    #[test]
    fn test_zero_requirement_item_forms_empty_step() {
        let items = vec![armor(1, 1).require(IRON, "Iron Ore", 1), armor(2, 1)];

        let plan = aggregate(&items);
        assert_eq!(plan.len(), 2);
        assert!(plan.steps[0].gather.is_empty());
        assert_eq!(plan.steps[0].build, handles(&[1]));
        assert_eq!(plan.steps[1].build, handles(&[0]));
    }

    #[test]
    fn test_duplicate_requests_merge_by_material_not_identity() {
        let helm = armor(7, 1).require(IRON, "Iron Ore", 2).require(BONE, "Monster Bone S", 1);
        let items = vec![helm.clone(), helm];

        let plan = aggregate(&items);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps[0].build, handles(&[0, 1]));
        assert_eq!(plan.steps[0].gathered(IRON), 4);
        assert_eq!(plan.steps[0].gathered(BONE), 2);
    }

    #[test]
    fn test_repeated_material_in_anchor_is_summed() {
        let items = vec![armor(1, 1).require(IRON, "Iron Ore", 2).require(IRON, "Iron Ore", 3)];

        let plan = aggregate(&items);
        assert_eq!(plan.steps[0].gather, vec![GatheredMaterial::new(IRON, "Iron Ore", 5)]);
        assert!(verify_plan(&plan, &items).is_ok());
    }

    #[test]
    fn test_gather_list_is_ordered_by_material_id() {
        let items = vec![armor(1, 1)
            .require(SAC, "Sac", 1)
            .require(IRON, "Iron Ore", 1)
            .require(SCALE, "Scale", 1)];

        let plan = aggregate(&items);
        let ids: Vec<MaterialId> = plan.steps[0].gather.iter().map(|m| m.material_id).collect();
        assert_eq!(ids, vec![IRON, SCALE, SAC]);
    }

    #[test]
    fn test_properties_hold_on_mixed_set() {
        let mut items = Vec::new();
        for n in 0..24u32 {
            let mut item = armor(n, (n % 12) as u8 + 1);
            for material in 0..(n % 5) {
                item = item.require((n + material) % 7, format!("Material {}", (n + material) % 7), material + 1);
            }
            items.push(item);
        }

        let plan = aggregate(&items);
        verify_plan(&plan, &items).unwrap();

        let placed: usize = plan.iter().map(|s| s.build.len()).sum();
        assert_eq!(placed, items.len());

        // Each item's materials are all gathered by the step that builds it.
        let mut covered = HashSet::new();
        for step in plan.iter() {
            covered.extend(step.gather.iter().map(|m| m.material_id));
            for handle in &step.build {
                for requirement in &items[handle.index()].requirements {
                    assert!(covered.contains(&requirement.material_id));
                }
            }
        }
    }

    #[test]
    fn test_large_quantities_do_not_overflow() {
        let items = vec![
            armor(1, 1).require(IRON, "Iron Ore", 3_000_000_000),
            armor(2, 1).require(IRON, "Iron Ore", 3_000_000_000),
        ];

        let plan = aggregate(&items);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps[0].gathered(IRON), 6_000_000_000);
        assert_eq!(plan.total_gathered()[&IRON], 6_000_000_000);
        assert!(verify_plan(&plan, &items).is_ok());
    }

    #[test]
    fn test_verify_rejects_double_placement() {
        let items = vec![armor(1, 1).require(IRON, "Iron Ore", 1)];
        let plan = BuildPlan {
            steps: vec![
                BuildStep {
                    gather: vec![GatheredMaterial::new(IRON, "Iron Ore", 1)],
                    build: handles(&[0]),
                },
                BuildStep {
                    gather: vec![],
                    build: handles(&[0]),
                },
            ],
        };

        assert!(verify_plan(&plan, &items).is_err());
    }

    #[test]
    fn test_verify_rejects_uncovered_material() {
        // Bone for item 1 is only gathered in the step after it is built.
        let items = vec![
            armor(1, 1).require(IRON, "Iron Ore", 1),
            armor(2, 1).require(BONE, "Monster Bone S", 1),
            armor(3, 1),
        ];
        let plan = BuildPlan {
            steps: vec![
                BuildStep {
                    gather: vec![GatheredMaterial::new(IRON, "Iron Ore", 1)],
                    build: handles(&[0, 1]),
                },
                BuildStep {
                    gather: vec![GatheredMaterial::new(BONE, "Monster Bone S", 1)],
                    build: handles(&[2]),
                },
            ],
        };

        let err = verify_plan(&plan, &items).unwrap_err();
        assert!(err.to_string().contains("before material 2 is gathered"));
    }

    #[test]
    fn test_verify_rejects_lost_quantity() {
        let items = vec![armor(1, 1).require(IRON, "Iron Ore", 3)];
        let plan = BuildPlan {
            steps: vec![BuildStep {
                gather: vec![GatheredMaterial::new(IRON, "Iron Ore", 2)],
                build: handles(&[0]),
            }],
        };

        assert!(verify_plan(&plan, &items).is_err());
    }
}
