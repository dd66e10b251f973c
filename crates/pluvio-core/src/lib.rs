//! A TR-55-style daily stormwater model over cell censuses.
//!
//! A census describes a patch of terrain as counts of typed cells (soil
//! hydrologic group × land cover × optional modifier), plus optional
//! modification scenarios and an inventory of structural best-management
//! practices. One simulated day partitions a precipitation depth into
//! runoff, evapotranspiration, and infiltration per cell type, applies
//! BMP retention credit, and attaches event-mean-concentration pollutant
//! loads, yielding paired unmodified/modified result trees.
//!
//! [`simulate_day`] is the main entry point; [`simulate_water_quality`]
//! exposes the tree walker for callers bringing their own per-leaf model.

pub mod cell;
pub mod census;
pub mod error;
pub mod reference;
pub mod sim;

pub use cell::{CellKey, ChangeSpec, SoilGroup};
pub use census::builder::{create_modified_census, create_unmodified_census, verify_census};
pub use census::{Census, CensusNode, Modification, Population};
pub use error::{Error, Result};
pub use reference::{ReferenceData, ET_MAX, POLLUTANTS};
pub use sim::{
    compute_bmp_effect, pollutant_load, postpass, runoff_liters, runoff_nrcs, runoff_pitt,
    simulate_cell_day, simulate_day, simulate_water_quality, CellVolumes, SimulationResult,
    DEFAULT_CELL_RESOLUTION,
};
