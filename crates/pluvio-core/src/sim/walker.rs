//! Recursive simulation over census trees.
//!
//! The walker visits a tree bottom-up: leaves are handed to a caller
//! supplied simulation function and get volumes, retention adjustment,
//! and pollutant loads attached; interior nodes get the tallied sums of
//! their children. A later pass converts the accumulated volumes into
//! per-cell depths for the wire format.

use crate::cell::CellKey;
use crate::census::arith;
use crate::census::CensusNode;
use crate::error::{Error, Result};
use crate::reference::ReferenceData;
use crate::sim::quality::{pollutant_load, runoff_liters};
use crate::sim::runoff::CellVolumes;

/// Walk a census tree, simulating each leaf with `leaf_fn` and tallying
/// results upward.
///
/// `retention_fraction` is the share of leaf runoff that remains as
/// runoff; the rest is credited to infiltration (1.0 applies no credit).
/// `current_key` carries the child key of the subtree being walked and is
/// `None` at the root. With `precolumbian` set, every leaf's land cover is
/// projected to its pre-development equivalent before simulation.
pub fn simulate_water_quality<F>(
    node: &mut CensusNode,
    reference: &ReferenceData,
    cell_resolution: f64,
    leaf_fn: &F,
    retention_fraction: f64,
    current_key: Option<&CellKey>,
    precolumbian: bool,
) -> Result<()>
where
    F: Fn(&CellKey, i64) -> Result<CellVolumes>,
{
    match node.distribution.take() {
        Some(mut children) => {
            let outcome = simulate_interior(
                node,
                &mut children,
                reference,
                cell_resolution,
                leaf_fn,
                retention_fraction,
                precolumbian,
            );
            node.distribution = Some(children);
            outcome
        }
        None => simulate_leaf(
            node,
            reference,
            cell_resolution,
            leaf_fn,
            retention_fraction,
            current_key,
            precolumbian,
        ),
    }
}

fn simulate_interior<F>(
    node: &mut CensusNode,
    children: &mut std::collections::BTreeMap<CellKey, CensusNode>,
    reference: &ReferenceData,
    cell_resolution: f64,
    leaf_fn: &F,
    retention_fraction: f64,
    precolumbian: bool,
) -> Result<()>
where
    F: Fn(&CellKey, i64) -> Result<CellVolumes>,
{
    // An empty population contributes nothing; its subtree is skipped.
    if node.cell_count == 0 {
        zero_results(node, reference);
        return Ok(());
    }
    for (key, child) in children.iter_mut() {
        simulate_water_quality(
            child,
            reference,
            cell_resolution,
            leaf_fn,
            retention_fraction,
            Some(key),
            precolumbian,
        )?;
    }
    arith::clear_results(node);
    for child in children.values() {
        arith::accumulate_results(node, child);
    }
    Ok(())
}

fn simulate_leaf<F>(
    node: &mut CensusNode,
    reference: &ReferenceData,
    cell_resolution: f64,
    leaf_fn: &F,
    retention_fraction: f64,
    current_key: Option<&CellKey>,
    precolumbian: bool,
) -> Result<()>
where
    F: Fn(&CellKey, i64) -> Result<CellVolumes>,
{
    let key = current_key.ok_or_else(|| {
        Error::InvalidScenario("leaf node without a cell type key".to_string())
    })?;
    let mut key = key.clone();
    if precolumbian {
        key.cover = reference.make_precolumbian(&key.cover).to_string();
    }

    let volumes = leaf_fn(&key, node.cell_count)?;
    let retained = volumes.runoff_vol * (1.0 - retention_fraction);
    let runoff_vol = volumes.runoff_vol - retained;
    node.runoff_vol = Some(runoff_vol);
    node.et_vol = Some(volumes.et_vol);
    node.inf_vol = Some(volumes.inf_vol + retained);

    if node.cell_count > 0 {
        let depth = runoff_vol / node.cell_count as f64;
        let liters = runoff_liters(depth, node.cell_count, cell_resolution);
        let land_cover = reference.effective_cover(&key);
        for &pollutant in reference.tracked_pollutants() {
            let load = pollutant_load(reference, land_cover, pollutant, liters)?;
            node.loads.insert(pollutant.to_string(), load);
        }
    } else {
        for &pollutant in reference.tracked_pollutants() {
            node.loads.insert(pollutant.to_string(), 0.0);
        }
    }
    Ok(())
}

fn zero_results(node: &mut CensusNode, reference: &ReferenceData) {
    node.runoff_vol = Some(0.0);
    node.et_vol = Some(0.0);
    node.inf_vol = Some(0.0);
    for &pollutant in reference.tracked_pollutants() {
        node.loads.insert(pollutant.to_string(), 0.0);
    }
}

/// Convert accumulated volumes into per-cell depths, recursively, and
/// drop the volume fields. Depths on empty populations are zero.
pub fn postpass(node: &mut CensusNode) {
    if node.cell_count > 0 {
        let n = node.cell_count as f64;
        node.runoff = Some(node.runoff_vol.unwrap_or(0.0) / n);
        node.et = Some(node.et_vol.unwrap_or(0.0) / n);
        node.inf = Some(node.inf_vol.unwrap_or(0.0) / n);
    } else {
        node.runoff = Some(0.0);
        node.et = Some(0.0);
        node.inf = Some(0.0);
    }
    node.runoff_vol = None;
    node.et_vol = None;
    node.inf_vol = None;
    if let Some(children) = node.distribution.as_mut() {
        for child in children.values_mut() {
            postpass(child);
        }
    }
}
