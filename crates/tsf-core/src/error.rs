//! Error types for tausf

use thiserror::Error;

/// tausf error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required table is absent from the backing artifact
    #[error("table not found: '{0}'")]
    TableNotFound(String),

    /// A table exists but has the wrong dimensionality
    #[error("table '{name}' has the wrong shape: expected {expected}, found {found}")]
    TableShape {
        /// Table name.
        name: String,
        /// Expected kind (e.g. "1D histogram").
        expected: String,
        /// Kind found in the artifact.
        found: String,
    },

    /// Table content violates the binning invariants
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Backing artifact could not be read
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
