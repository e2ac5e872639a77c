//! Plan materialization.

use farmhand_core::{BuildPlan, CraftItem, DetailedPlan, DetailedStep, FarmhandError, Result};

/// Resolve every build handle to its full item. No merging happens here.
pub fn materialize(plan: &BuildPlan, items: &[CraftItem]) -> Result<DetailedPlan> {
    let steps = plan
        .iter()
        .map(|step| {
            let build = step
                .build
                .iter()
                .map(|handle| {
                    items.get(handle.index()).cloned().ok_or_else(|| {
                        FarmhandError::Internal(format!("plan references unknown item {:?}", handle))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(DetailedStep {
                gather: step.gather.clone(),
                build,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DetailedPlan { steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use farmhand_core::{BuildStep, ItemHandle, ItemKind};

    #[test]
    fn test_materialize_resolves_items_in_step_order() {
        let items = vec![
            CraftItem::new(1, "Bone Helm", ItemKind::Armor, 1)
                .require(1, "Iron Ore", 2)
                .require(2, "Monster Bone S", 1),
            CraftItem::new(2, "Iron Mail", ItemKind::Armor, 1).require(1, "Iron Ore", 3),
        ];

        let plan = aggregate(&items);
        let detailed = materialize(&plan, &items).unwrap();

        assert_eq!(detailed.len(), 2);
        assert_eq!(detailed.steps[0].build[0].name, "Iron Mail");
        assert_eq!(detailed.steps[1].build[0].name, "Bone Helm");
        assert_eq!(detailed.steps[0].gather, plan.steps[0].gather);
    }

    #[test]
    fn test_materialize_empty_plan() {
        let detailed = materialize(&BuildPlan::new(), &[]).unwrap();
        assert!(detailed.is_empty());
    }

    #[test]
    fn test_unknown_handle_is_internal_error() {
        let plan = BuildPlan {
            steps: vec![BuildStep {
                gather: vec![],
                build: vec![ItemHandle(3)],
            }],
        };

        let err = materialize(&plan, &[]).unwrap_err();
        assert!(matches!(err, FarmhandError::Internal(_)));
    }
}
