//! # tsf-core
//!
//! Core types for tausf: the binned-table model (`Axis`, `Hist1D`, `Hist2D`),
//! the `TableProvider` seam that decouples the scale-factor engine from any
//! particular storage format, and the shared error type.
//!
//! ## Example
//!
//! ```
//! use tsf_core::{Axis, Hist1D};
//!
//! let axis = Axis::new(vec![20.0, 40.0, 200.0]).unwrap();
//! let h = Hist1D::new("eff", axis, vec![0.5, 0.9]).unwrap();
//! assert_eq!(h.value_at(30.0), 0.5);
//! assert_eq!(h.value_at(1e6), 0.9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tables;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use tables::TableSet;
pub use traits::TableProvider;
pub use types::{Axis, Hist1D, Hist2D, Table};

/// Crate version, shared by every workspace member.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
