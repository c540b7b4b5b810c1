//! In-memory named-table container.
//!
//! `TableSet` is also the on-disk JSON artifact layout:
//!
//! ```json
//! { "tables": { "<name>": { "kind": "1d", "edges": [...], "values": [...] } } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::TableProvider;
use crate::types::{Hist1D, Hist2D, Table};

/// A set of tables addressed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSet {
    /// Tables keyed by name.
    pub tables: BTreeMap<String, Table>,
}

impl TableSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a table under `name`.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    /// Insert a 1D table under its own name.
    pub fn insert_1d(&mut self, h: Hist1D) {
        self.tables.insert(h.name().to_string(), Table::OneD(h));
    }

    /// Insert a 2D table under its own name.
    pub fn insert_2d(&mut self, h: Hist2D) {
        self.tables.insert(h.name().to_string(), Table::TwoD(h));
    }

    /// Table names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Parse a JSON artifact.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    fn get(&self, name: &str) -> Result<&Table> {
        self.tables.get(name).ok_or_else(|| Error::TableNotFound(name.to_string()))
    }
}

impl TableProvider for TableSet {
    fn table_1d(&self, name: &str) -> Result<Hist1D> {
        match self.get(name)? {
            Table::OneD(h) => Ok(h.clone()),
            other => Err(Error::TableShape {
                name: name.to_string(),
                expected: "1D histogram".into(),
                found: other.kind().into(),
            }),
        }
    }

    fn table_2d(&self, name: &str) -> Result<Hist2D> {
        match self.get(name)? {
            Table::TwoD(h) => Ok(h.clone()),
            other => Err(Error::TableShape {
                name: name.to_string(),
                expected: "2D histogram".into(),
                found: other.kind().into(),
            }),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    fn describe(&self) -> String {
        format!("in-memory table set ({} tables)", self.tables.len())
    }
}
