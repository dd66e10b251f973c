//! The daily simulation entry point: both scenarios of a census,
//! including the two-pass BMP retention credit for the modified tree.

use crate::cell::CellKey;
use crate::census::builder::{create_modified_census, create_unmodified_census, verify_census};
use crate::census::{Census, CensusNode};
use crate::error::Result;
use crate::reference::{ReferenceData, ET_MAX};
use crate::sim::bmp::compute_bmp_effect;
use crate::sim::runoff::{simulate_cell_day, CellVolumes};
use crate::sim::walker::{postpass, simulate_water_quality};

/// Default cell footprint in m² (NLCD-style 30 m rasters resampled to a
/// tenth of a cell are common upstream, but any resolution works).
pub const DEFAULT_CELL_RESOLUTION: f64 = 10.0;

/// Both scenarios of one simulated day, as wire-ready trees.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// The base census simulated as-is.
    pub unmodified: CensusNode,
    /// The census with its modifications and BMP credits applied. Equal in
    /// shape to a one-level tree when there are no modifications.
    pub modified: CensusNode,
}

/// Simulate one day of rainfall over a census, producing the unmodified
/// and modified scenario trees with per-cell water depths and pollutant
/// loads attached.
///
/// With `precolumbian` set, every land cover except water and wetlands is
/// simulated as mixed forest, giving a pre-development baseline.
pub fn simulate_day(
    reference: &ReferenceData,
    census: &Census,
    precip: f64,
    cell_resolution: f64,
    precolumbian: bool,
) -> Result<SimulationResult> {
    if !census.modifications.is_empty() {
        verify_census(census)?;
    }

    let leaf = |key: &CellKey, cell_count: i64| -> Result<CellVolumes> {
        // Any modifier's Ki drives evapotranspiration, structural BMPs
        // included; runoff selection is handled inside the cell model.
        let ki_source = if key.has_modifier() {
            key.modifier.as_str()
        } else {
            key.cover.as_str()
        };
        let evaptrans = ET_MAX * reference.lookup_ki(ki_source)?;
        simulate_cell_day(reference, precip, evaptrans, key, cell_count)
    };

    let modified = simulate_modified(
        reference,
        census,
        &leaf,
        precip,
        cell_resolution,
        precolumbian,
    )?;

    let mut unmodified = create_unmodified_census(census);
    simulate_water_quality(
        &mut unmodified,
        reference,
        cell_resolution,
        &leaf,
        1.0,
        None,
        precolumbian,
    )?;
    postpass(&mut unmodified);

    Ok(SimulationResult {
        unmodified,
        modified,
    })
}

fn simulate_modified<F>(
    reference: &ReferenceData,
    census: &Census,
    leaf: &F,
    precip: f64,
    cell_resolution: f64,
    precolumbian: bool,
) -> Result<CensusNode>
where
    F: Fn(&CellKey, i64) -> Result<CellVolumes>,
{
    // First pass with no credit, to measure the runoff the BMPs see.
    let mut probe = create_modified_census(census);
    simulate_water_quality(
        &mut probe,
        reference,
        cell_resolution,
        leaf,
        1.0,
        None,
        precolumbian,
    )?;
    let retention_fraction = compute_bmp_effect(&probe, reference, cell_resolution, precip);

    // Second pass on a fresh tree, so the credit is applied exactly once.
    let mut modified = create_modified_census(census);
    simulate_water_quality(
        &mut modified,
        reference,
        cell_resolution,
        leaf,
        retention_fraction,
        None,
        precolumbian,
    )?;
    postpass(&mut modified);
    Ok(modified)
}
