//! Trigger categories, data sources, working points and the table names they
//! resolve to.
//!
//! Table names are the contract with the calibration producer:
//!
//! | kind       | pattern                                            |
//! |------------|----------------------------------------------------|
//! | pT curve   | `hist_<Cat>TriggerEfficiency_<wp>TauMVA_<DATA\|MC>` |
//! | correction | `<cat>_<wp>_<DATA\|MC>`                            |
//! | average    | `<cat>_<wp>_AVG_<DATA\|MC>`                        |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tsf_core::{Error, Result};

/// Trigger category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Di-tau trigger.
    DiTau,
    /// Electron + tau cross trigger.
    ETau,
    /// Muon + tau cross trigger.
    MuTau,
}

impl Category {
    /// All categories, in table order.
    pub const ALL: [Category; 3] = [Category::DiTau, Category::ETau, Category::MuTau];

    /// Token used in pT-curve names.
    pub fn pt_token(self) -> &'static str {
        match self {
            Category::DiTau => "diTau",
            Category::ETau => "ETau",
            Category::MuTau => "MuTau",
        }
    }

    /// Token used in eta-phi map names.
    pub fn map_token(self) -> &'static str {
        match self {
            Category::DiTau => "diTau",
            Category::ETau => "eTau",
            Category::MuTau => "muTau",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::DiTau => write!(f, "ditau"),
            Category::ETau => write!(f, "etau"),
            Category::MuTau => write!(f, "mutau"),
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ditau" | "tautau" => Ok(Category::DiTau),
            "etau" => Ok(Category::ETau),
            "mutau" => Ok(Category::MuTau),
            _ => Err(Error::Validation(format!(
                "unknown trigger category '{}' (expected ditau, etau or mutau)",
                s
            ))),
        }
    }
}

/// Whether an efficiency refers to collision data or simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Collision data.
    Data,
    /// Simulation.
    Mc,
}

impl Source {
    /// Both sources, in table order.
    pub const ALL: [Source; 2] = [Source::Data, Source::Mc];

    /// Name suffix (`DATA` / `MC`).
    pub fn tag(self) -> &'static str {
        match self {
            Source::Data => "DATA",
            Source::Mc => "MC",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Tau identification working point selecting the calibration variant.
///
/// Usually one of [`WorkingPoint::KNOWN`]; other names are accepted so that
/// artifacts with additional variants can still be read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkingPoint(String);

impl WorkingPoint {
    /// Working points produced for the 2017 tau MVA identification.
    pub const KNOWN: [&'static str; 7] =
        ["vvloose", "vloose", "loose", "medium", "tight", "vtight", "vvtight"];

    /// Validate and wrap a working point name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::Validation(format!("invalid working point '{}'", name)));
        }
        if !Self::KNOWN.contains(&name.as_str()) {
            log::debug!("working point '{}' is not one of {:?}", name, Self::KNOWN);
        }
        Ok(Self(name))
    }

    /// The name as it appears in table names.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WorkingPoint {
    /// `medium`.
    fn default() -> Self {
        Self("medium".to_string())
    }
}

impl fmt::Display for WorkingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WorkingPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for WorkingPoint {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<WorkingPoint> for String {
    fn from(wp: WorkingPoint) -> Self {
        wp.0
    }
}

/// Names of the three tables behind one (category, source) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    /// 1D efficiency versus pT.
    pub efficiency: String,
    /// 2D eta-phi correction map.
    pub correction: String,
    /// 2D per-region average of the correction map.
    pub average: String,
}

impl TableNames {
    /// Derive the table names for `category` and `source` at `wp`.
    pub fn new(category: Category, source: Source, wp: &WorkingPoint) -> Self {
        let tag = source.tag();
        let cat = category.map_token();
        Self {
            efficiency: format!(
                "hist_{}TriggerEfficiency_{}TauMVA_{}",
                category.pt_token(),
                wp,
                tag
            ),
            correction: format!("{}_{}_{}", cat, wp, tag),
            average: format!("{}_{}_AVG_{}", cat, wp, tag),
        }
    }
}

/// All 18 table names needed at `wp`: the six pT curves, then the six
/// correction maps, then the six averages.
pub fn required_table_names(wp: &WorkingPoint) -> Vec<String> {
    let all: Vec<TableNames> = Category::ALL
        .iter()
        .flat_map(|&c| Source::ALL.iter().map(move |&s| TableNames::new(c, s, wp)))
        .collect();

    let mut names = Vec::with_capacity(all.len() * 3);
    names.extend(all.iter().map(|n| n.efficiency.clone()));
    names.extend(all.iter().map(|n| n.correction.clone()));
    names.extend(all.iter().map(|n| n.average.clone()));
    names
}
