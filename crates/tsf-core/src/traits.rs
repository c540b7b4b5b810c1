//! Core traits for tausf
//!
//! `TableProvider` is the seam between the scale-factor engine and the
//! storage format of the calibration artifact. The engine only ever sees
//! decoded `Hist1D`/`Hist2D` values; ROOT files, JSON documents and
//! in-memory sets all plug in behind this trait.

use crate::Result;
use crate::types::{Hist1D, Hist2D};

/// Named-table container (the backing artifact).
pub trait TableProvider {
    /// Resolve a 1D table by exact name.
    ///
    /// Fails with `Error::TableNotFound` if absent and `Error::TableShape`
    /// if the name refers to a table of another dimensionality.
    fn table_1d(&self, name: &str) -> Result<Hist1D>;

    /// Resolve a 2D table by exact name.
    fn table_2d(&self, name: &str) -> Result<Hist2D>;

    /// Whether a table (of any dimensionality) exists under `name`.
    fn contains(&self, name: &str) -> bool;

    /// Short description for diagnostics (e.g. the artifact path).
    fn describe(&self) -> String {
        "table provider".to_string()
    }
}

impl<P: TableProvider + ?Sized> TableProvider for &P {
    fn table_1d(&self, name: &str) -> Result<Hist1D> {
        (**self).table_1d(name)
    }

    fn table_2d(&self, name: &str) -> Result<Hist2D> {
        (**self).table_2d(name)
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<P: TableProvider + ?Sized> TableProvider for Box<P> {
    fn table_1d(&self, name: &str) -> Result<Hist1D> {
        (**self).table_1d(name)
    }

    fn table_2d(&self, name: &str) -> Result<Hist2D> {
        (**self).table_2d(name)
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
