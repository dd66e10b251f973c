//! Structural retention/infiltration BMP constants.
//!
//! These are the practices eligible for the global retention credit.
//! `cluster_housing` and `no_till` are deliberately absent: they modify a
//! cell's land cover rather than actively retaining water.

/// Physical constants of one structural BMP.
#[derive(Debug, Clone, Copy)]
pub struct BmpConstants {
    /// Water storage per square meter of practice footprint (meters).
    pub unit_storage_m: f64,
    /// Maximum contributing-area ratio the practice can drain in a day.
    pub drainage_ratio: f64,
}

pub(crate) const BMPS: &[(&str, BmpConstants)] = &[
    (
        "green_roof",
        BmpConstants {
            unit_storage_m: 0.020,
            drainage_ratio: 1.0,
        },
    ),
    (
        "porous_paving",
        BmpConstants {
            unit_storage_m: 0.267,
            drainage_ratio: 2.0,
        },
    ),
    (
        "rain_garden",
        BmpConstants {
            unit_storage_m: 0.194,
            drainage_ratio: 5.0,
        },
    ),
    (
        "infiltration_basin",
        BmpConstants {
            unit_storage_m: 0.610,
            drainage_ratio: 8.0,
        },
    ),
];
