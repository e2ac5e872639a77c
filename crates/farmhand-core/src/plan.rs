//! Build plan types.
//!
//! A [`BuildPlan`] is the aggregator's output: ordered steps, each naming the
//! materials to gather and the items that become buildable once they are in
//! hand. Items are referenced by [`ItemHandle`], their position in the item
//! set the plan was computed from, since catalog identifiers repeat (charm
//! ranks share an id, and the same item may be requested twice).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::{CraftItem, GatheredMaterial};
use crate::types::MaterialId;

/// Position of a [`CraftItem`] in the item set a plan was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemHandle(pub usize);

impl ItemHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One gather-then-build step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildStep {
    /// Materials to gather, quantities summed over every item built here.
    pub gather: Vec<GatheredMaterial>,

    /// Items completing at this step. The first entry is the anchor.
    pub build: Vec<ItemHandle>,
}

impl BuildStep {
    /// The item whose requirements seeded this step.
    pub fn anchor(&self) -> Option<ItemHandle> {
        self.build.first().copied()
    }

    /// Quantity of a material gathered in this step.
    pub fn gathered(&self, material_id: MaterialId) -> u64 {
        self.gather
            .iter()
            .filter(|m| m.material_id == material_id)
            .map(|m| m.quantity)
            .sum()
    }
}

/// Ordered sequence of build steps, earliest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildPlan {
    pub steps: Vec<BuildStep>,
}

impl BuildPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildStep> {
        self.steps.iter()
    }

    /// Index of the step that builds the given item.
    pub fn step_of(&self, handle: ItemHandle) -> Option<usize> {
        self.steps.iter().position(|s| s.build.contains(&handle))
    }

    /// Total gathered quantity per material across all steps.
    pub fn total_gathered(&self) -> BTreeMap<MaterialId, u64> {
        total_of(self.steps.iter().flat_map(|s| s.gather.iter()))
    }
}

/// A build step with its items resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedStep {
    pub gather: Vec<GatheredMaterial>,
    pub build: Vec<CraftItem>,
}

/// A build plan with its items resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailedPlan {
    pub steps: Vec<DetailedStep>,
}

impl DetailedPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total gathered quantity per material, keeping material names.
    pub fn totals(&self) -> Vec<GatheredMaterial> {
        let mut names: BTreeMap<MaterialId, &str> = BTreeMap::new();
        for material in self.steps.iter().flat_map(|s| s.gather.iter()) {
            names.entry(material.material_id).or_insert(material.material_name.as_str());
        }

        total_of(self.steps.iter().flat_map(|s| s.gather.iter()))
            .into_iter()
            .map(|(id, quantity)| {
                let name = names.get(&id).copied().unwrap_or_default();
                GatheredMaterial::new(id, name, quantity)
            })
            .collect()
    }
}

fn total_of<'a>(materials: impl Iterator<Item = &'a GatheredMaterial>) -> BTreeMap<MaterialId, u64> {
    let mut totals = BTreeMap::new();
    for material in materials {
        *totals.entry(material.material_id).or_insert(0) += material.quantity;
    }
    totals
}
