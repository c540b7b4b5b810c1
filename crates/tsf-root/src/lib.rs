//! # tsf-root
//!
//! Native ROOT file reader for tausf.
//!
//! Reads TH1F/TH1D and TH2F/TH2D histograms from `.root` files without
//! requiring external ROOT libraries, and exposes them as `tsf_core` tables
//! through the `TableProvider` trait. Supports zlib, LZ4, ZSTD and XZ
//! compressed objects.
//!
//! ## Example
//!
//! ```no_run
//! use tsf_root::RootFile;
//!
//! let f = RootFile::open("tauTriggerEfficiencies2017.root").unwrap();
//! for key in f.list_keys() {
//!     println!("{} ({})", key.name, key.class_name);
//! }
//! let t = f.get_table("hist_diTauTriggerEfficiency_mediumTauMVA_DATA").unwrap();
//! println!("{}", t.kind());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decompress;
pub mod directory;
pub mod error;
pub mod file;
pub mod key;
pub mod objects;
pub mod rbuffer;

pub use error::{Result, RootError};
pub use file::RootFile;
pub use key::KeyInfo;
