//! Reference Data Provider: curve numbers, landscape coefficients,
//! small-storm runoff curves, BMP constants, and pollutant concentrations.
//!
//! All tables are loaded once into an immutable [`ReferenceData`] value
//! that is passed explicitly to the simulation functions; nothing here is
//! ambient global state.

mod bmps;
mod landcover;
mod pollutants;

use std::collections::BTreeMap;

pub use bmps::BmpConstants;
pub use landcover::{LandCover, RunoffPolicy};
pub use pollutants::POLLUTANTS;

use crate::cell::{CellKey, SoilGroup};
use crate::error::{Error, Result};
use landcover::{
    LAND_COVERS, PITT_IMPERVIOUS_RV, PITT_PERVIOUS_RV, PITT_PRECIP_STEPS, PRECOLUMBIAN_COVER,
    PRECOLUMBIAN_EXEMPT,
};
use pollutants::{EmcRecord, POLLUTION_LOADS};

/// Reference daily evapotranspiration maximum (inches/day), taken at the
/// growing-season peak. Scaled per cover by its landscape coefficient.
pub const ET_MAX: f64 = 0.207;

/// Immutable reference dataset consumed by the simulation.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    covers: BTreeMap<&'static str, LandCover>,
    bmps: BTreeMap<&'static str, BmpConstants>,
    emc_by_class: BTreeMap<u8, EmcRecord>,
    /// Blended small-storm runoff-ratio curves, per built cover and soil
    /// group, precomputed at construction.
    pitt_curves: BTreeMap<&'static str, [Vec<f64>; 4]>,
}

impl ReferenceData {
    /// The built-in dataset.
    pub fn builtin() -> Self {
        let covers: BTreeMap<_, _> = LAND_COVERS.iter().copied().collect();
        let bmps: BTreeMap<_, _> = bmps::BMPS.iter().copied().collect();
        let emc_by_class: BTreeMap<_, _> = POLLUTION_LOADS.iter().copied().collect();

        let mut pitt_curves = BTreeMap::new();
        for (name, cover) in &covers {
            if cover.policy != RunoffPolicy::MaxOfModels {
                continue;
            }
            let f = cover.impervious_fraction;
            let blended = PITT_PERVIOUS_RV.map(|pervious| {
                PITT_IMPERVIOUS_RV
                    .iter()
                    .zip(pervious.iter())
                    .map(|(imp, per)| f * imp + (1.0 - f) * per)
                    .collect::<Vec<f64>>()
            });
            pitt_curves.insert(*name, blended);
        }

        ReferenceData {
            covers,
            bmps,
            emc_by_class,
            pitt_curves,
        }
    }

    fn cover(&self, land_cover: &str) -> Result<&LandCover> {
        self.covers
            .get(land_cover)
            .ok_or_else(|| Error::UnknownLandCover(land_cover.to_string()))
    }

    /// Full capability descriptor for a land cover.
    pub fn descriptor(&self, land_cover: &str) -> Result<&LandCover> {
        self.cover(land_cover)
    }

    /// NRCS curve number for a soil group / land cover pair.
    pub fn lookup_cn(&self, soil: SoilGroup, land_cover: &str) -> Result<f64> {
        let cover = self.cover(land_cover)?;
        let cn = cover
            .curve_numbers
            .ok_or_else(|| Error::NoCurveNumber(land_cover.to_string()))?;
        Ok(cn[soil.index()])
    }

    /// Landscape coefficient Ki for a land cover.
    pub fn lookup_ki(&self, land_cover: &str) -> Result<f64> {
        Ok(self.cover(land_cover)?.ki)
    }

    /// Small-storm runoff-ratio curve for a soil group / land cover pair:
    /// parallel slices of precipitation steps (inches) and runoff ratios.
    pub fn lookup_pitt_runoff_curve(
        &self,
        soil: SoilGroup,
        land_cover: &str,
    ) -> Result<(&[f64], &[f64])> {
        // Distinguish an unknown cover from a known cover with no curve.
        self.cover(land_cover)?;
        let curves = self
            .pitt_curves
            .get(land_cover)
            .ok_or_else(|| Error::NoPittCurve(land_cover.to_string()))?;
        Ok((&PITT_PRECIP_STEPS, &curves[soil.index()]))
    }

    /// Unit storage (meters of water per m² of footprint) of a BMP.
    pub fn lookup_bmp_storage(&self, bmp: &str) -> Result<f64> {
        self.bmp_constants(bmp).map(|c| c.unit_storage_m)
    }

    /// Daily contributing-area drainage ratio of a BMP.
    pub fn lookup_bmp_drainage_ratio(&self, bmp: &str) -> Result<f64> {
        self.bmp_constants(bmp).map(|c| c.drainage_ratio)
    }

    fn bmp_constants(&self, bmp: &str) -> Result<BmpConstants> {
        self.bmps
            .get(bmp)
            .copied()
            .ok_or_else(|| Error::UnknownBmp(bmp.to_string()))
    }

    /// Is this the name of a recognized structural BMP?
    pub fn is_bmp(&self, name: &str) -> bool {
        self.bmps.contains_key(name)
    }

    /// Is this land cover an engineered/"built" type?
    pub fn is_built_type(&self, land_cover: &str) -> bool {
        self.covers
            .get(land_cover)
            .map(|c| c.policy == RunoffPolicy::MaxOfModels)
            .unwrap_or(false)
    }

    /// The recognized structural BMPs and their constants.
    pub fn recognized_bmps(&self) -> impl Iterator<Item = (&'static str, BmpConstants)> + '_ {
        self.bmps.iter().map(|(name, c)| (*name, *c))
    }

    /// Pre-Columbian projection of a land cover: wetlands and open water
    /// keep themselves, everything else becomes natural forest.
    pub fn make_precolumbian<'a>(&self, land_cover: &'a str) -> &'a str {
        if PRECOLUMBIAN_EXEMPT.contains(&land_cover) {
            land_cover
        } else {
            PRECOLUMBIAN_COVER
        }
    }

    /// NLCD reference class of a land cover, used for EMC lookups.
    pub fn lookup_reference_class(&self, land_cover: &str) -> Result<u8> {
        Ok(self.cover(land_cover)?.nlcd_class)
    }

    /// Event-mean concentration (mg/L) of a pollutant for a reference class.
    pub fn lookup_pollutant_concentration(&self, class: u8, pollutant: &str) -> Result<f64> {
        let record = self
            .emc_by_class
            .get(&class)
            .ok_or_else(|| Error::UnknownLandCover(format!("nlcd class {class}")))?;
        record
            .concentration(pollutant)
            .ok_or_else(|| Error::UnknownPollutant(pollutant.to_string()))
    }

    /// Names of the tracked pollutants.
    pub fn tracked_pollutants(&self) -> &'static [&'static str] {
        &POLLUTANTS
    }

    /// The land cover a cell effectively behaves as: a land-cover-like
    /// modifier (e.g. `cluster_housing`, `no_till`) replaces the cover
    /// outright, while a structural BMP modifier leaves it alone.
    pub fn effective_cover<'a>(&self, key: &'a CellKey) -> &'a str {
        if key.has_modifier() && !self.is_bmp(&key.modifier) {
            &key.modifier
        } else {
            &key.cover
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn curve_number_spot_checks() {
        let reference = ReferenceData::builtin();
        assert_eq!(
            reference.lookup_cn(SoilGroup::A, "open_water").unwrap(),
            100.0
        );
        assert_eq!(
            reference
                .lookup_cn(SoilGroup::B, "deciduous_forest")
                .unwrap(),
            55.0
        );
        assert_eq!(
            reference
                .lookup_cn(SoilGroup::C, "evergreen_forest")
                .unwrap(),
            70.0
        );
        assert_eq!(reference.lookup_cn(SoilGroup::D, "pasture").unwrap(), 80.0);
        assert_eq!(
            reference.lookup_cn(SoilGroup::C, "developed_high").unwrap(),
            90.0
        );
    }

    #[test]
    fn unknown_lookups_fail() {
        let reference = ReferenceData::builtin();
        assert!(matches!(
            reference.lookup_cn(SoilGroup::A, "asdf"),
            Err(Error::UnknownLandCover(_))
        ));
        assert!(matches!(
            reference.lookup_cn(SoilGroup::A, "green_roof"),
            Err(Error::NoCurveNumber(_))
        ));
        assert!(matches!(
            reference.lookup_pitt_runoff_curve(SoilGroup::B, "pasture"),
            Err(Error::NoPittCurve(_))
        ));
        assert!(matches!(
            reference.lookup_bmp_storage("no_till"),
            Err(Error::UnknownBmp(_))
        ));
        assert!(matches!(
            reference.lookup_pollutant_concentration(24, "asdf"),
            Err(Error::UnknownPollutant(_))
        ));
    }

    #[test]
    fn built_types_and_bmps_are_disjoint_classifications() {
        let reference = ReferenceData::builtin();
        for cover in ["developed_open", "developed_low", "developed_med", "developed_high", "cluster_housing"] {
            assert!(reference.is_built_type(cover), "{cover} should be built");
        }
        for cover in ["pasture", "mixed_forest", "no_till", "open_water"] {
            assert!(!reference.is_built_type(cover), "{cover} should not be built");
        }
        assert!(reference.is_bmp("rain_garden"));
        assert!(!reference.is_bmp("cluster_housing"));
        assert!(!reference.is_bmp("no_till"));
    }

    #[test]
    fn pitt_curves_exist_exactly_for_built_covers() {
        let reference = ReferenceData::builtin();
        for cover in ["developed_open", "developed_low", "developed_med", "developed_high", "cluster_housing"] {
            let (steps, ratios) = reference
                .lookup_pitt_runoff_curve(SoilGroup::D, cover)
                .unwrap();
            assert_eq!(steps.len(), ratios.len());
            // Ratios increase with storm size and stay below 1.
            for pair in ratios.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            assert!(*ratios.last().unwrap() < 1.0);
        }
    }

    #[test]
    fn higher_impervious_fraction_means_higher_runoff_ratio() {
        let reference = ReferenceData::builtin();
        let (_, low) = reference
            .lookup_pitt_runoff_curve(SoilGroup::B, "developed_low")
            .unwrap();
        let (_, high) = reference
            .lookup_pitt_runoff_curve(SoilGroup::B, "developed_high")
            .unwrap();
        for (l, h) in low.iter().zip(high.iter()) {
            assert!(l < h);
        }
    }

    #[test]
    fn precolumbian_projection() {
        let reference = ReferenceData::builtin();
        assert_eq!(reference.make_precolumbian("developed_high"), "mixed_forest");
        assert_eq!(reference.make_precolumbian("pasture"), "mixed_forest");
        assert_eq!(reference.make_precolumbian("open_water"), "open_water");
        assert_eq!(reference.make_precolumbian("woody_wetlands"), "woody_wetlands");
    }

    #[test]
    fn effective_cover_respects_modifier_kind() {
        let reference = ReferenceData::builtin();
        let plain: CellKey = "a:developed_low".parse().unwrap();
        assert_eq!(reference.effective_cover(&plain), "developed_low");

        let landcover_mod: CellKey = "a:cultivated_crops:no_till".parse().unwrap();
        assert_eq!(reference.effective_cover(&landcover_mod), "no_till");

        let structural: CellKey = "a:developed_med:rain_garden".parse().unwrap();
        assert_eq!(reference.effective_cover(&structural), "developed_med");
    }

    #[test]
    fn every_cover_has_an_emc_reference_class() {
        let reference = ReferenceData::builtin();
        for (name, _) in super::LAND_COVERS {
            let class = reference.lookup_reference_class(name).unwrap();
            for pollutant in reference.tracked_pollutants() {
                reference
                    .lookup_pollutant_concentration(class, pollutant)
                    .unwrap();
            }
        }
    }
}
