//! Calibration store: resolves and owns the 18 tables of one working point.

use std::path::Path;

use tsf_core::{Result, TableProvider};

use crate::artifact::open_artifact;
use crate::category::{Category, Source, TableNames, WorkingPoint, required_table_names};
use crate::efficiency::CalibrationSet;

/// Tau trigger efficiencies and scale factors for one working point.
///
/// All tables are decoded at construction; afterwards the store is
/// read-only, holds no file handle and can be shared between threads.
#[derive(Debug, Clone)]
pub struct TauTriggerSfs {
    working_point: WorkingPoint,
    /// One set per (category, source), category-major.
    sets: Vec<CalibrationSet>,
    origin: String,
}

impl TauTriggerSfs {
    /// Load every table for `working_point` from the artifact at `path`
    /// (`.root` or `.json`).
    pub fn open(path: impl AsRef<Path>, working_point: &str) -> Result<Self> {
        let wp = WorkingPoint::new(working_point)?;
        let provider = open_artifact(path.as_ref())?;
        Self::from_provider(&provider, wp)
    }

    /// Load every table for `working_point` from `provider`.
    ///
    /// Fails on the first missing or wrongly shaped table, in the order of
    /// [`required_table_names`]. No partial store is ever returned.
    pub fn from_provider<P: TableProvider + ?Sized>(
        provider: &P,
        working_point: WorkingPoint,
    ) -> Result<Self> {
        let names: Vec<TableNames> = Category::ALL
            .iter()
            .flat_map(|&c| Source::ALL.iter().map(move |&s| (c, s)))
            .map(|(c, s)| TableNames::new(c, s, &working_point))
            .collect();

        let curves = names
            .iter()
            .map(|n| provider.table_1d(&n.efficiency))
            .collect::<Result<Vec<_>>>()?;
        let corrections = names
            .iter()
            .map(|n| provider.table_2d(&n.correction))
            .collect::<Result<Vec<_>>>()?;
        let averages = names
            .iter()
            .map(|n| provider.table_2d(&n.average))
            .collect::<Result<Vec<_>>>()?;

        let sets: Vec<CalibrationSet> = curves
            .into_iter()
            .zip(corrections)
            .zip(averages)
            .map(|((eff, corr), avg)| CalibrationSet::new(eff, corr, avg))
            .collect();

        let origin = provider.describe();
        log::debug!(
            "loaded {} tau trigger tables for working point '{}' from {}",
            sets.len() * 3,
            working_point,
            origin
        );
        Ok(Self { working_point, sets, origin })
    }

    /// Working point the tables were loaded for.
    pub fn working_point(&self) -> &WorkingPoint {
        &self.working_point
    }

    /// Description of the artifact the tables came from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Tables behind the `source` efficiency of `category`.
    pub fn calibration(&self, category: Category, source: Source) -> &CalibrationSet {
        &self.sets[category.index() * Source::ALL.len() + source.index()]
    }
}

/// Every table required at `wp` that `provider` does not hold (or cannot
/// decode), in [`required_table_names`] order.
pub fn missing_tables<P: TableProvider + ?Sized>(provider: &P, wp: &WorkingPoint) -> Vec<String> {
    required_table_names(wp).into_iter().filter(|name| !provider.contains(name)).collect()
}
