//! Census tree construction: the "do nothing" tree and the modified tree
//! with each affected category expanded into retained-vs-changed cells.

use std::collections::BTreeMap;

use crate::cell::CellKey;
use crate::census::arith;
use crate::census::{Census, CensusNode};
use crate::error::{Error, Result};

/// The unmodified scenario: the base census as a one-level tree, with the
/// modification list discarded.
pub fn create_unmodified_census(census: &Census) -> CensusNode {
    CensusNode {
        cell_count: census.cell_count,
        distribution: Some(
            census
                .distribution
                .iter()
                .map(|(key, pop)| (key.clone(), CensusNode::leaf(pop.cell_count)))
                .collect(),
        ),
        bmp_inventory: census.bmp_inventory.clone(),
        ..CensusNode::default()
    }
}

/// The modified scenario: every category is first seeded with an identity
/// sub-distribution (fully mapped to itself), then each modification's
/// delta subtree (−n retained original, +n changed) is merged in via tree
/// addition. Overlapping modifications accumulate.
pub fn create_modified_census(census: &Census) -> CensusNode {
    let mut root = CensusNode {
        cell_count: census.cell_count,
        distribution: Some(
            census
                .distribution
                .iter()
                .map(|(key, pop)| {
                    let identity =
                        BTreeMap::from([(key.clone(), CensusNode::leaf(pop.cell_count))]);
                    let category = CensusNode {
                        cell_count: pop.cell_count,
                        distribution: Some(identity),
                        ..CensusNode::default()
                    };
                    (key.clone(), category)
                })
                .collect(),
        ),
        bmp_inventory: census.bmp_inventory.clone(),
        ..CensusNode::default()
    };

    for modification in &census.modifications {
        for (original, pop) in &modification.distribution {
            let n = pop.cell_count;
            let changed = modification.change.apply(original);

            let mut split: BTreeMap<CellKey, CensusNode> = BTreeMap::new();
            split
                .entry(original.clone())
                .or_insert_with(|| CensusNode::leaf(0))
                .cell_count -= n;
            split
                .entry(changed)
                .or_insert_with(|| CensusNode::leaf(0))
                .cell_count += n;

            let category_delta = CensusNode {
                cell_count: 0,
                distribution: Some(split),
                ..CensusNode::default()
            };
            let delta = CensusNode {
                cell_count: 0,
                distribution: Some(BTreeMap::from([(original.clone(), category_delta)])),
                ..CensusNode::default()
            };
            root = arith::add(&root, &delta);
        }
    }

    root
}

/// Check a modification scenario against its base census. Every cell type
/// a modification touches must exist in the base distribution, counts must
/// be non-negative, and modifications may not cumulatively move more cells
/// out of a category than it holds.
pub fn verify_census(census: &Census) -> Result<()> {
    let mut moved: BTreeMap<&CellKey, i64> = BTreeMap::new();
    for modification in &census.modifications {
        for (key, pop) in &modification.distribution {
            let base = census.distribution.get(key).ok_or_else(|| {
                Error::InvalidScenario(format!(
                    "modification references cell type {key} absent from the base census"
                ))
            })?;
            if pop.cell_count < 0 {
                return Err(Error::InvalidScenario(format!(
                    "modification moves a negative cell count ({}) of {key}",
                    pop.cell_count
                )));
            }
            let total = moved.entry(key).or_insert(0);
            *total += pop.cell_count;
            if *total > base.cell_count {
                return Err(Error::InvalidScenario(format!(
                    "modifications move {total} cells of {key} but the census holds only {}",
                    base.cell_count
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::Population;

    fn base_census() -> Census {
        let distribution = BTreeMap::from([
            (
                "a:pasture".parse().unwrap(),
                Population { cell_count: 12 },
            ),
            (
                "d:developed_med".parse().unwrap(),
                Population { cell_count: 8 },
            ),
        ]);
        Census {
            cell_count: 20,
            distribution,
            modifications: Vec::new(),
            bmp_inventory: None,
        }
    }

    fn modification(change: &str, key: &str, count: i64) -> crate::census::Modification {
        crate::census::Modification {
            change: change.parse().unwrap(),
            cell_count: count,
            distribution: BTreeMap::from([(
                key.parse().unwrap(),
                Population { cell_count: count },
            )]),
        }
    }

    fn subtree_counts(node: &CensusNode) -> i64 {
        match &node.distribution {
            None => node.cell_count,
            Some(children) => children.values().map(subtree_counts).sum(),
        }
    }

    #[test]
    fn unmodified_round_trips_the_distribution() {
        let mut census = base_census();
        census.modifications = vec![modification("::no_till", "a:pasture", 0)];
        let tree = create_unmodified_census(&census);
        assert_eq!(tree.cell_count, 20);
        let children = tree.distribution.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(
            children[&"a:pasture".parse::<CellKey>().unwrap()].cell_count,
            12
        );
        assert!(children
            .values()
            .all(|child| child.distribution.is_none()));
    }

    #[test]
    fn modified_seeds_identity_partitions() {
        let census = base_census();
        let tree = create_modified_census(&census);
        let children = tree.distribution.unwrap();
        for (key, category) in &children {
            let split = category.distribution.as_ref().unwrap();
            assert_eq!(split.len(), 1);
            assert_eq!(split[key].cell_count, category.cell_count);
        }
    }

    #[test]
    fn modification_splits_category_into_retained_and_changed() {
        let mut census = base_census();
        census.modifications = vec![modification("d:developed_low:", "a:pasture", 5)];
        let tree = create_modified_census(&census);
        let children = tree.distribution.unwrap();
        let category = &children[&"a:pasture".parse::<CellKey>().unwrap()];
        assert_eq!(category.cell_count, 12);
        let split = category.distribution.as_ref().unwrap();
        assert_eq!(
            split[&"a:pasture".parse::<CellKey>().unwrap()].cell_count,
            7
        );
        assert_eq!(
            split[&"d:developed_low".parse::<CellKey>().unwrap()].cell_count,
            5
        );
    }

    #[test]
    fn overlapping_modifications_accumulate() {
        let mut census = base_census();
        census.modifications = vec![
            modification("::no_till", "a:pasture", 4),
            modification("d:developed_low:", "a:pasture", 3),
        ];
        let tree = create_modified_census(&census);
        let children = tree.distribution.unwrap();
        let split = children[&"a:pasture".parse::<CellKey>().unwrap()]
            .distribution
            .as_ref()
            .unwrap();
        assert_eq!(
            split[&"a:pasture".parse::<CellKey>().unwrap()].cell_count,
            5
        );
        assert_eq!(
            split[&"a:pasture:no_till".parse::<CellKey>().unwrap()].cell_count,
            4
        );
        assert_eq!(
            split[&"d:developed_low".parse::<CellKey>().unwrap()].cell_count,
            3
        );
    }

    #[test]
    fn cell_counts_are_conserved_at_every_level() {
        let mut census = base_census();
        census.modifications = vec![
            modification("::cluster_housing", "d:developed_med", 6),
            modification("b:mixed_forest:", "a:pasture", 9),
        ];
        let tree = create_modified_census(&census);
        assert_eq!(tree.cell_count, 20);
        assert_eq!(subtree_counts(&tree), 20);
        for category in tree.distribution.unwrap().values() {
            assert_eq!(subtree_counts(category), category.cell_count);
        }
    }

    #[test]
    fn verify_rejects_unknown_category() {
        let mut census = base_census();
        census.modifications = vec![modification("::no_till", "b:grassland", 1)];
        assert!(matches!(
            verify_census(&census),
            Err(Error::InvalidScenario(_))
        ));
    }

    #[test]
    fn verify_rejects_overdrawn_category() {
        let mut census = base_census();
        census.modifications = vec![
            modification("::no_till", "a:pasture", 10),
            modification("d:developed_low:", "a:pasture", 3),
        ];
        assert!(matches!(
            verify_census(&census),
            Err(Error::InvalidScenario(_))
        ));
    }

    #[test]
    fn verify_accepts_well_formed_scenarios() {
        let mut census = base_census();
        census.modifications = vec![
            modification("::no_till", "a:pasture", 10),
            modification("d:developed_low:", "d:developed_med", 3),
        ];
        assert!(verify_census(&census).is_ok());
    }
}
