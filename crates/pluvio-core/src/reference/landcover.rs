//! Land-cover reference dataset.
//!
//! Each cover carries an explicit capability descriptor instead of living
//! in loose name sets: its landscape coefficient, NRCS curve numbers per
//! soil group, NLCD reference class for pollutant concentrations, and the
//! runoff-model policy that decides whether the small-storm model competes
//! with the curve-number model.

/// Which empirical runoff model(s) apply to a land cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunoffPolicy {
    /// Curve-number method only (natural and agricultural covers).
    NrcsOnly,
    /// Engineered surfaces: the higher of the small-storm (Pitt) and
    /// curve-number results is used.
    MaxOfModels,
}

/// Static descriptor for one land cover.
#[derive(Debug, Clone, Copy)]
pub struct LandCover {
    /// Landscape coefficient Ki: scales reference evapotranspiration.
    pub ki: f64,
    /// NRCS curve numbers indexed by soil group a..d, if tabulated.
    pub curve_numbers: Option<[f64; 4]>,
    /// NLCD class used as the reference class for pollutant EMC lookups.
    pub nlcd_class: u8,
    pub policy: RunoffPolicy,
    /// Impervious share of the cover; blends the small-storm runoff-ratio
    /// curves for covers under `MaxOfModels`.
    pub impervious_fraction: f64,
}

const fn natural(ki: f64, cn: [f64; 4], nlcd: u8) -> LandCover {
    LandCover {
        ki,
        curve_numbers: Some(cn),
        nlcd_class: nlcd,
        policy: RunoffPolicy::NrcsOnly,
        impervious_fraction: 0.0,
    }
}

const fn built(ki: f64, cn: [f64; 4], nlcd: u8, impervious: f64) -> LandCover {
    LandCover {
        ki,
        curve_numbers: Some(cn),
        nlcd_class: nlcd,
        policy: RunoffPolicy::MaxOfModels,
        impervious_fraction: impervious,
    }
}

/// Structural practices also appear here: when one occupies the modifier
/// slot of a cell key its Ki drives evapotranspiration, so it needs a
/// descriptor even though it has no curve number of its own.
const fn practice(ki: f64, nlcd: u8) -> LandCover {
    LandCover {
        ki,
        curve_numbers: None,
        nlcd_class: nlcd,
        policy: RunoffPolicy::NrcsOnly,
        impervious_fraction: 0.0,
    }
}

/// The built-in land-cover table (NLCD 2011 vocabulary).
pub(crate) const LAND_COVERS: &[(&str, LandCover)] = &[
    ("open_water", natural(0.0, [100.0, 100.0, 100.0, 100.0], 11)),
    ("developed_open", built(0.70, [68.0, 79.0, 86.0, 89.0], 21, 0.10)),
    ("developed_low", built(0.42, [51.0, 68.0, 79.0, 84.0], 22, 0.30)),
    ("developed_med", built(0.18, [68.0, 81.0, 88.0, 91.0], 23, 0.55)),
    ("developed_high", built(0.06, [77.0, 85.0, 90.0, 92.0], 24, 0.85)),
    ("barren_land", natural(0.0, [77.0, 86.0, 86.0, 91.0], 31)),
    ("deciduous_forest", natural(0.7, [30.0, 55.0, 70.0, 77.0], 41)),
    ("evergreen_forest", natural(0.7, [30.0, 55.0, 70.0, 77.0], 42)),
    ("mixed_forest", natural(0.7, [30.0, 55.0, 70.0, 77.0], 43)),
    ("shrub", natural(0.6, [35.0, 56.0, 70.0, 77.0], 52)),
    ("grassland", natural(0.6, [30.0, 58.0, 71.0, 78.0], 71)),
    ("pasture", natural(0.6, [39.0, 61.0, 74.0, 80.0], 81)),
    ("cultivated_crops", natural(0.9, [67.0, 78.0, 85.0, 89.0], 82)),
    ("woody_wetlands", natural(1.0, [98.0, 98.0, 98.0, 98.0], 90)),
    ("herbaceous_wetlands", natural(1.0, [98.0, 98.0, 98.0, 98.0], 95)),
    // Land-cover-like modifiers.
    ("cluster_housing", built(0.42, [62.0, 74.0, 81.0, 85.0], 22, 0.20)),
    ("no_till", natural(0.9, [57.0, 73.0, 82.0, 86.0], 82)),
    // Structural practices (modifier slot / BMP inventory only).
    ("green_roof", practice(0.40, 21)),
    ("porous_paving", practice(0.0, 21)),
    ("rain_garden", practice(0.08, 21)),
    ("infiltration_basin", practice(0.0, 11)),
];

/// Land covers whose Pre-Columbian projection is themselves; everything
/// else projects to `mixed_forest`.
pub(crate) const PRECOLUMBIAN_EXEMPT: &[&str] =
    &["open_water", "woody_wetlands", "herbaceous_wetlands"];

pub(crate) const PRECOLUMBIAN_COVER: &str = "mixed_forest";

// ── Small-storm (Pitt) monitoring curves ─────────────────────────────────────
//
// Runoff ratio Rv tabulated against precipitation depth. A built cover's
// curve for a given soil group is the impervious curve and the soil
// group's pervious curve blended by the cover's impervious fraction.

/// Precipitation steps (inches) shared by all runoff-ratio curves.
pub(crate) const PITT_PRECIP_STEPS: [f64; 12] = [
    0.04, 0.12, 0.20, 0.39, 0.59, 0.79, 0.98, 1.18, 1.57, 1.97, 2.96, 3.94,
];

/// Runoff ratio of fully impervious surface at each precipitation step.
pub(crate) const PITT_IMPERVIOUS_RV: [f64; 12] = [
    0.47, 0.56, 0.62, 0.70, 0.75, 0.79, 0.82, 0.84, 0.87, 0.89, 0.93, 0.95,
];

/// Runoff ratio of pervious urban surface, indexed by soil group a..d.
pub(crate) const PITT_PERVIOUS_RV: [[f64; 12]; 4] = [
    [0.02, 0.02, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08, 0.09, 0.10, 0.12, 0.14],
    [0.03, 0.04, 0.05, 0.07, 0.08, 0.10, 0.11, 0.12, 0.14, 0.16, 0.19, 0.22],
    [0.04, 0.05, 0.07, 0.09, 0.11, 0.13, 0.15, 0.17, 0.20, 0.22, 0.26, 0.30],
    [0.05, 0.07, 0.09, 0.12, 0.14, 0.17, 0.19, 0.21, 0.24, 0.27, 0.32, 0.36],
];
