//! Error types for ROOT file reading.

use thiserror::Error;

/// ROOT reader error.
#[derive(Error, Debug)]
pub enum RootError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Not a ROOT file
    #[error("not a ROOT file (bad magic or truncated header)")]
    BadMagic,

    /// Read past the end of a buffer
    #[error("buffer underflow at offset {offset}: need {need} bytes, have {have}")]
    BufferUnderflow {
        /// Read position.
        offset: usize,
        /// Bytes requested.
        need: usize,
        /// Bytes available.
        have: usize,
    },

    /// Compressed block could not be decoded
    #[error("decompression error: {0}")]
    Decompression(String),

    /// Malformed streamer data
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// No key with this name
    #[error("key not found: '{0}'")]
    KeyNotFound(String),

    /// Object class not supported by this reader
    #[error("unsupported class: {0}")]
    UnsupportedClass(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RootError>;

impl From<RootError> for tsf_core::Error {
    fn from(e: RootError) -> Self {
        match e {
            RootError::KeyNotFound(name) => tsf_core::Error::TableNotFound(name),
            RootError::Io(io) => tsf_core::Error::Io(io),
            other => tsf_core::Error::Artifact(other.to_string()),
        }
    }
}
