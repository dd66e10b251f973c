//! Census data model: the input census with its modification scenario and
//! the working tree the simulation walks and mutates.
//!
//! Field names are the JSON wire contract: `cell_count`, `distribution`,
//! `modifications`, `change`, `BMPs`, `runoff`, `et`, `inf`, plus one
//! field per pollutant name on simulated nodes.

pub mod arith;
pub mod builder;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::{CellKey, ChangeSpec};

/// Leaf population: just a count of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    pub cell_count: i64,
}

/// One "what-if" land-cover modification: an overlay spec, the total cell
/// count it moves, and the per-cell-type breakdown of where those cells
/// come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub change: ChangeSpec,
    #[serde(default)]
    pub cell_count: i64,
    pub distribution: BTreeMap<CellKey, Population>,
}

/// The input census: cell populations by type, an ordered modification
/// scenario, and the structural BMP inventory available to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Census {
    pub cell_count: i64,
    pub distribution: BTreeMap<CellKey, Population>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifications: Vec<Modification>,
    #[serde(rename = "BMPs", default, skip_serializing_if = "Option::is_none")]
    pub bmp_inventory: Option<BTreeMap<String, f64>>,
}

impl Census {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A node of the working census tree.
///
/// Volume fields (depth × cell count) are attached by the simulation walk
/// and replaced by per-cell depth fields in the final rescale; only the
/// depth and load fields are part of the wire contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CensusNode {
    pub cell_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<BTreeMap<CellKey, CensusNode>>,
    /// Structural BMP areas (m²); present only at the tree root.
    #[serde(rename = "BMPs", default, skip_serializing_if = "Option::is_none")]
    pub bmp_inventory: Option<BTreeMap<String, f64>>,

    #[serde(skip)]
    pub runoff_vol: Option<f64>,
    #[serde(skip)]
    pub et_vol: Option<f64>,
    #[serde(skip)]
    pub inf_vol: Option<f64>,

    /// Per-cell runoff depth, after the rescale pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runoff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub et: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inf: Option<f64>,

    /// Pollutant mass loads (lbs), one entry per tracked pollutant.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub loads: BTreeMap<String, f64>,
}

impl CensusNode {
    /// A leaf node holding only a population count.
    pub fn leaf(cell_count: i64) -> Self {
        CensusNode {
            cell_count,
            ..CensusNode::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.distribution.is_none()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
