//! The two empirical runoff models and the single-cell daily simulation.
//!
//! Variable names follow the TR-55 document: `precip` is P, the runoff is
//! Q, `evaptrans` is ET, `inf` is the depth infiltrating into the soil,
//! and the initial abstraction Ia is a second form of infiltration. All
//! depths are in inches.

use crate::cell::{CellKey, SoilGroup};
use crate::error::Result;
use crate::reference::{ReferenceData, RunoffPolicy};

/// Water volumes of one simulated cell population (depth × cell count).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVolumes {
    pub runoff_vol: f64,
    pub et_vol: f64,
    pub inf_vol: f64,
}

impl CellVolumes {
    pub const ZERO: CellVolumes = CellVolumes {
        runoff_vol: 0.0,
        et_vol: 0.0,
        inf_vol: 0.0,
    };
}

/// The NRCS curve-number runoff equation.
pub fn runoff_nrcs(
    reference: &ReferenceData,
    precip: f64,
    evaptrans: f64,
    soil: SoilGroup,
    land_cover: &str,
) -> Result<f64> {
    let curve_number = reference.lookup_cn(soil, land_cover)?;
    // Below this precipitation the quadratic form would go negative:
    // zero runoff by definition.
    if precip <= -2.0 * (curve_number - 100.0) / curve_number {
        return Ok(0.0);
    }
    let potential_retention = 1000.0 / curve_number - 10.0;
    let initial_abs = 0.2 * potential_retention;
    let precip_minus_initial_abs = precip - initial_abs;
    let runoff =
        precip_minus_initial_abs.powi(2) / (precip_minus_initial_abs + potential_retention);
    // Runoff cannot consume more water than remains after ET.
    Ok(runoff.min(precip - evaptrans))
}

/// The Pitt Small Storm Hydrology method: precipitation times a runoff
/// ratio interpolated from monitoring curves for engineered surfaces.
/// Fails for land covers with no tabulated curve.
pub fn runoff_pitt(
    reference: &ReferenceData,
    precip: f64,
    evaptrans: f64,
    soil: SoilGroup,
    land_cover: &str,
) -> Result<f64> {
    let (steps, ratios) = reference.lookup_pitt_runoff_curve(soil, land_cover)?;
    let ratio = interpolate(precip, steps, ratios);
    let runoff = precip * ratio;
    Ok(runoff.min(precip - evaptrans))
}

/// Piecewise-linear interpolation, clamped to the table's domain at both
/// extremes (no extrapolation).
fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(!xs.is_empty());
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    for i in 0..xs.len() - 1 {
        if x <= xs[i + 1] {
            let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
            return ys[i] + t * (ys[i + 1] - ys[i]);
        }
    }
    ys[ys.len() - 1]
}

/// Simulate one day of rainfall on a uniform cell population, partitioning
/// precipitation into runoff, evapotranspiration, and infiltration.
///
/// Model selection: built covers take the more conservative (higher) of
/// the small-storm and curve-number results; every other cover uses the
/// curve-number method alone. A land-cover-like modifier on the key
/// replaces the effective cover; a structural BMP modifier does not (its
/// credit is applied globally, outside this function).
pub fn simulate_cell_day(
    reference: &ReferenceData,
    precip: f64,
    evaptrans: f64,
    key: &CellKey,
    cell_count: i64,
) -> Result<CellVolumes> {
    // No precipitation means nothing to partition.
    if precip <= 0.0 {
        return Ok(CellVolumes::ZERO);
    }

    let land_cover = reference.effective_cover(key);
    let descriptor = reference.descriptor(land_cover)?;
    let evaptrans = evaptrans.min(precip);

    let runoff = match descriptor.policy {
        RunoffPolicy::NrcsOnly => {
            runoff_nrcs(reference, precip, evaptrans, key.soil, land_cover)?
        }
        RunoffPolicy::MaxOfModels => {
            let pitt = runoff_pitt(reference, precip, evaptrans, key.soil, land_cover)?;
            let nrcs = runoff_nrcs(reference, precip, evaptrans, key.soil, land_cover)?;
            pitt.max(nrcs)
        }
    };
    let runoff = runoff.max(0.0);
    let inf = (precip - (evaptrans + runoff)).max(0.0);

    let n = cell_count as f64;
    Ok(CellVolumes {
        runoff_vol: runoff * n,
        et_vol: evaptrans * n,
        inf_vol: inf * n,
    })
}
