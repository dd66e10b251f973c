//! Pollutant loading: event-mean-concentration loads from runoff depths.

use crate::error::Result;
use crate::reference::ReferenceData;

pub(crate) const METERS_PER_INCH: f64 = 0.0254;
const LITERS_PER_M3: f64 = 1000.0;
const MG_PER_KG: f64 = 1.0e6;
const LBS_PER_KG: f64 = 2.205;

/// Convert a per-cell runoff depth (inches) over a cell population into a
/// runoff volume in liters. `cell_resolution` is the area of one cell
/// in m².
pub fn runoff_liters(runoff_depth: f64, cell_count: i64, cell_resolution: f64) -> f64 {
    runoff_depth * METERS_PER_INCH * cell_count as f64 * cell_resolution * LITERS_PER_M3
}

/// Pollutant load in pounds carried by a runoff volume off a land cover,
/// via that cover's event mean concentration (mg/L).
pub fn pollutant_load(
    reference: &ReferenceData,
    land_cover: &str,
    pollutant: &str,
    runoff_liters: f64,
) -> Result<f64> {
    let class = reference.lookup_reference_class(land_cover)?;
    let emc = reference.lookup_pollutant_concentration(class, pollutant)?;
    Ok(emc * runoff_liters / MG_PER_KG * LBS_PER_KG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn liters_spot_check() {
        // 0.4 in over 100 cells of 30 m² is 30.48 m³.
        let liters = runoff_liters(0.4, 100, 30.0);
        assert_relative_eq!(liters, 30_480.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_depth_means_zero_volume() {
        assert_eq!(runoff_liters(0.0, 1000, 10.0), 0.0);
    }

    #[test]
    fn load_scales_with_concentration_and_volume() {
        let reference = ReferenceData::builtin();
        // developed_med maps to NLCD 23 with TSS at 94.6 mg/L.
        let load = pollutant_load(&reference, "developed_med", "tss", 30_480.0).unwrap();
        assert_relative_eq!(load, 94.6 * 30_480.0 / 1.0e6 * 2.205, epsilon = 1e-9);

        let double = pollutant_load(&reference, "developed_med", "tss", 60_960.0).unwrap();
        assert_relative_eq!(double, 2.0 * load, epsilon = 1e-9);
    }

    #[test]
    fn open_water_loads_are_zero() {
        let reference = ReferenceData::builtin();
        for pollutant in ["tn", "tp", "bod", "tss"] {
            let load = pollutant_load(&reference, "open_water", pollutant, 1.0e6).unwrap();
            assert_eq!(load, 0.0, "{pollutant}");
        }
    }

    #[test]
    fn unknown_pollutant_is_rejected() {
        let reference = ReferenceData::builtin();
        assert!(pollutant_load(&reference, "pasture", "lead", 1.0).is_err());
    }
}
