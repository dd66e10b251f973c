//! The simulation layer: runoff models, the tree walker, BMP retention,
//! pollutant loading, and the daily orchestrator.

pub mod bmp;
pub mod day;
pub mod quality;
pub mod runoff;
pub mod walker;

pub use bmp::compute_bmp_effect;
pub use day::{simulate_day, SimulationResult, DEFAULT_CELL_RESOLUTION};
pub use quality::{pollutant_load, runoff_liters};
pub use runoff::{runoff_nrcs, runoff_pitt, simulate_cell_day, CellVolumes};
pub use walker::{postpass, simulate_water_quality};
