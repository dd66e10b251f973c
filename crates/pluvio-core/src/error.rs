//! Crate-wide error type.
//!
//! Two families: reference-data lookup failures (unknown soil group, land
//! cover, BMP, or pollutant) and invalid-scenario inputs (a modification
//! that does not make sense against its base census). Lookup failures mean
//! a data-table gap; invalid scenarios mean a configuration mistake.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Soil group was not one of a, b, c, d.
    #[error("unknown soil group: {0:?}")]
    UnknownSoilGroup(String),

    /// Land cover has no entry in the reference dataset.
    #[error("unknown land cover: {0:?}")]
    UnknownLandCover(String),

    /// Land cover exists but carries no NRCS curve number table.
    #[error("land cover {0:?} has no curve number")]
    NoCurveNumber(String),

    /// Land cover exists but has no small-storm (Pitt) runoff curve,
    /// i.e. it is not an engineered/built type.
    #[error("land cover {0:?} has no small-storm runoff curve")]
    NoPittCurve(String),

    /// Name is not a recognized structural BMP.
    #[error("unknown BMP: {0:?}")]
    UnknownBmp(String),

    /// Pollutant name is not tracked.
    #[error("unknown pollutant: {0:?}")]
    UnknownPollutant(String),

    /// A cell-key string did not have 2 or 3 colon-separated parts.
    #[error("malformed cell key: {0:?}")]
    MalformedCellKey(String),

    /// The census plus its modification list is not a valid scenario.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}
