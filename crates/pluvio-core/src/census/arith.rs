//! Tree arithmetic: pairwise combination of two same-shaped census trees.
//!
//! A structural fold over the closed set of numeric fields on a node,
//! parameterized by an add/subtract combinator. Where a key exists on only
//! one side, the other side is treated as zero; an absent branch is the
//! identity. The fold never interprets counts or results — callers decide
//! which trees to feed it.

use std::collections::{BTreeMap, BTreeSet};

use crate::cell::CellKey;
use crate::census::CensusNode;

/// The numeric combinator applied at every field.
#[derive(Debug, Clone, Copy)]
pub enum Combine {
    Add,
    Sub,
}

impl Combine {
    #[inline]
    fn count(self, left: i64, right: i64) -> i64 {
        match self {
            Combine::Add => left + right,
            Combine::Sub => left - right,
        }
    }

    #[inline]
    fn value(self, left: f64, right: f64) -> f64 {
        match self {
            Combine::Add => left + right,
            Combine::Sub => left - right,
        }
    }
}

/// Sum of two census trees.
pub fn add(left: &CensusNode, right: &CensusNode) -> CensusNode {
    merge(Some(left), Some(right), Combine::Add).unwrap_or_default()
}

/// Difference of two census trees.
pub fn subtract(left: &CensusNode, right: &CensusNode) -> CensusNode {
    merge(Some(left), Some(right), Combine::Sub).unwrap_or_default()
}

fn merge(
    left: Option<&CensusNode>,
    right: Option<&CensusNode>,
    op: Combine,
) -> Option<CensusNode> {
    if left.is_none() && right.is_none() {
        return None;
    }

    let cell_count = op.count(
        left.map_or(0, |n| n.cell_count),
        right.map_or(0, |n| n.cell_count),
    );

    let distribution = merge_children(
        left.and_then(|n| n.distribution.as_ref()),
        right.and_then(|n| n.distribution.as_ref()),
        op,
    );

    let bmp_inventory = merge_value_maps(
        left.and_then(|n| n.bmp_inventory.as_ref()),
        right.and_then(|n| n.bmp_inventory.as_ref()),
        op,
    );

    let field = |get: fn(&CensusNode) -> Option<f64>| {
        merge_values(left.and_then(get), right.and_then(get), op)
    };

    let loads = merge_value_maps(
        left.map(|n| &n.loads),
        right.map(|n| &n.loads),
        op,
    )
    .unwrap_or_default();

    Some(CensusNode {
        cell_count,
        distribution,
        bmp_inventory,
        runoff_vol: field(|n| n.runoff_vol),
        et_vol: field(|n| n.et_vol),
        inf_vol: field(|n| n.inf_vol),
        runoff: field(|n| n.runoff),
        et: field(|n| n.et),
        inf: field(|n| n.inf),
        loads,
    })
}

fn merge_children(
    left: Option<&BTreeMap<CellKey, CensusNode>>,
    right: Option<&BTreeMap<CellKey, CensusNode>>,
    op: Combine,
) -> Option<BTreeMap<CellKey, CensusNode>> {
    if left.is_none() && right.is_none() {
        return None;
    }
    let keys: BTreeSet<&CellKey> = left
        .into_iter()
        .chain(right)
        .flat_map(|m| m.keys())
        .collect();
    let mut merged = BTreeMap::new();
    for key in keys {
        if let Some(child) = merge(
            left.and_then(|m| m.get(key)),
            right.and_then(|m| m.get(key)),
            op,
        ) {
            merged.insert(key.clone(), child);
        }
    }
    Some(merged)
}

fn merge_value_maps(
    left: Option<&BTreeMap<String, f64>>,
    right: Option<&BTreeMap<String, f64>>,
    op: Combine,
) -> Option<BTreeMap<String, f64>> {
    if left.is_none() && right.is_none() {
        return None;
    }
    let keys: BTreeSet<&String> = left
        .into_iter()
        .chain(right)
        .flat_map(|m| m.keys())
        .collect();
    Some(
        keys.into_iter()
            .map(|key| {
                let l = left.and_then(|m| m.get(key)).copied().unwrap_or(0.0);
                let r = right.and_then(|m| m.get(key)).copied().unwrap_or(0.0);
                (key.clone(), op.value(l, r))
            })
            .collect(),
    )
}

#[inline]
fn merge_values(left: Option<f64>, right: Option<f64>, op: Combine) -> Option<f64> {
    if left.is_none() && right.is_none() {
        None
    } else {
        Some(op.value(left.unwrap_or(0.0), right.unwrap_or(0.0)))
    }
}

/// Fold a child's result fields into an ancestor, leaving the ancestor's
/// population count, children, and BMP inventory alone. This is the tally
/// step of the simulation walk.
pub(crate) fn accumulate_results(dst: &mut CensusNode, src: &CensusNode) {
    dst.runoff_vol = merge_values(dst.runoff_vol, src.runoff_vol, Combine::Add);
    dst.et_vol = merge_values(dst.et_vol, src.et_vol, Combine::Add);
    dst.inf_vol = merge_values(dst.inf_vol, src.inf_vol, Combine::Add);
    for (pollutant, load) in &src.loads {
        *dst.loads.entry(pollutant.clone()).or_insert(0.0) += load;
    }
}

/// Drop a node's result fields before a fresh tally.
pub(crate) fn clear_results(node: &mut CensusNode) {
    node.runoff_vol = None;
    node.et_vol = None;
    node.inf_vol = None;
    node.runoff = None;
    node.et = None;
    node.inf = None;
    node.loads.clear();
}
