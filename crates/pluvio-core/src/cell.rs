//! Cell typing: soil hydrologic group, cell key, and modification overlays.
//!
//! A cell key is the colon-joined triple `soil:cover:modifier`. The
//! trailing modifier names either a structural practice or a
//! land-cover-like modifier and may be empty; a 2-part key is equivalent
//! to a 3-part key with an empty modifier, so both forms parse to the same
//! value and the canonical 3-part form is implicit in the representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// NRCS soil hydrologic group, from well-drained (A) to poorly drained (D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SoilGroup {
    A,
    B,
    C,
    D,
}

impl SoilGroup {
    pub const ALL: [SoilGroup; 4] = [SoilGroup::A, SoilGroup::B, SoilGroup::C, SoilGroup::D];

    pub fn as_str(self) -> &'static str {
        match self {
            SoilGroup::A => "a",
            SoilGroup::B => "b",
            SoilGroup::C => "c",
            SoilGroup::D => "d",
        }
    }

    /// Index into per-soil-group value tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "a" => Ok(SoilGroup::A),
            "b" => Ok(SoilGroup::B),
            "c" => Ok(SoilGroup::C),
            "d" => Ok(SoilGroup::D),
            other => Err(Error::UnknownSoilGroup(other.to_string())),
        }
    }
}

impl fmt::Display for SoilGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a cell population: soil group, land cover, and an optional
/// modifier (empty string = none).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellKey {
    pub soil: SoilGroup,
    pub cover: String,
    pub modifier: String,
}

impl CellKey {
    pub fn new(soil: SoilGroup, cover: impl Into<String>) -> Self {
        CellKey {
            soil,
            cover: cover.into(),
            modifier: String::new(),
        }
    }

    pub fn with_modifier(soil: SoilGroup, cover: impl Into<String>, modifier: impl Into<String>) -> Self {
        CellKey {
            soil,
            cover: cover.into(),
            modifier: modifier.into(),
        }
    }

    pub fn has_modifier(&self) -> bool {
        !self.modifier.is_empty()
    }
}

impl FromStr for CellKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        let parts: Vec<&str> = lower.split(':').collect();
        let (soil, cover, modifier) = match parts.as_slice() {
            [soil, cover] => (*soil, *cover, ""),
            [soil, cover, modifier] => (*soil, *cover, *modifier),
            _ => return Err(Error::MalformedCellKey(s.to_string())),
        };
        if cover.is_empty() {
            return Err(Error::MalformedCellKey(s.to_string()));
        }
        Ok(CellKey {
            soil: SoilGroup::parse(soil)?,
            cover: cover.to_string(),
            modifier: modifier.to_string(),
        })
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier.is_empty() {
            write!(f, "{}:{}", self.soil, self.cover)
        } else {
            write!(f, "{}:{}:{}", self.soil, self.cover, self.modifier)
        }
    }
}

impl TryFrom<String> for CellKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<CellKey> for String {
    fn from(key: CellKey) -> String {
        key.to_string()
    }
}

/// A partial cell-key overlay used by modifications. Empty components
/// inherit from the key being modified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChangeSpec {
    pub soil: Option<SoilGroup>,
    pub cover: Option<String>,
    pub modifier: Option<String>,
}

impl ChangeSpec {
    /// Overlay this change onto an original key, inheriting whatever the
    /// change leaves unspecified.
    pub fn apply(&self, original: &CellKey) -> CellKey {
        CellKey {
            soil: self.soil.unwrap_or(original.soil),
            cover: self.cover.clone().unwrap_or_else(|| original.cover.clone()),
            modifier: self
                .modifier
                .clone()
                .unwrap_or_else(|| original.modifier.clone()),
        }
    }
}

impl FromStr for ChangeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        let parts: Vec<&str> = lower.split(':').collect();
        let (soil, cover, modifier) = match parts.as_slice() {
            [soil, cover] => (*soil, *cover, ""),
            [soil, cover, modifier] => (*soil, *cover, *modifier),
            _ => return Err(Error::MalformedCellKey(s.to_string())),
        };
        let non_empty = |part: &str| {
            if part.is_empty() {
                None
            } else {
                Some(part.to_string())
            }
        };
        Ok(ChangeSpec {
            soil: if soil.is_empty() {
                None
            } else {
                Some(SoilGroup::parse(soil)?)
            },
            cover: non_empty(cover),
            modifier: non_empty(modifier),
        })
    }
}

impl fmt::Display for ChangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.soil.map(SoilGroup::as_str).unwrap_or(""),
            self.cover.as_deref().unwrap_or(""),
            self.modifier.as_deref().unwrap_or("")
        )
    }
}

impl TryFrom<String> for ChangeSpec {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ChangeSpec> for String {
    fn from(spec: ChangeSpec) -> String {
        spec.to_string()
    }
}
