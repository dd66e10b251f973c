//! Distributed-BMP retention credit.
//!
//! Structural practices recorded in a tree's BMP inventory retain part of
//! the day's runoff. Each practice's credit is the lesser of its storage
//! capacity and the water actually delivered to it by its contributing
//! area; the summed credit yields the fraction of total runoff that still
//! leaves the site.

use crate::census::CensusNode;
use crate::reference::ReferenceData;
use crate::sim::quality::METERS_PER_INCH;

/// Fraction of the tree's runoff volume remaining after BMP retention,
/// in [0, 1]. A tree with no runoff or no inventory retains nothing
/// (fraction 1.0). `cell_resolution` is the area of one cell in m².
pub fn compute_bmp_effect(
    tree: &CensusNode,
    reference: &ReferenceData,
    cell_resolution: f64,
    precip: f64,
) -> f64 {
    // runoff_vol is a depth-sum in inches over all cells; scale by one
    // cell's footprint to get m³.
    let total_m3 = tree.runoff_vol.unwrap_or(0.0) * METERS_PER_INCH * cell_resolution;
    if total_m3 <= 0.0 {
        return 1.0;
    }

    let mut credit_m3 = 0.0;
    if let Some(inventory) = &tree.bmp_inventory {
        for (name, constants) in reference.recognized_bmps() {
            if let Some(&area_m2) = inventory.get(name) {
                let storage = constants.unit_storage_m * area_m2;
                let delivered =
                    constants.drainage_ratio * area_m2 * precip * METERS_PER_INCH;
                credit_m3 += storage.min(delivered);
            }
        }
    }

    (total_m3 - credit_m3).max(0.0) / total_m3
}
