//! # tsf-trigger
//!
//! Data and simulation trigger efficiencies for hadronic taus, and their
//! ratio (the scale factor), for the di-tau, electron-tau and muon-tau
//! triggers.
//!
//! Each efficiency combines a pT turn-on curve with an eta-phi correction
//! map normalised by its regional average. All tables are resolved by name
//! from a calibration artifact once, at construction.
//!
//! ## Example
//!
//! ```no_run
//! use tsf_trigger::{Category, TauTriggerSfs};
//!
//! let sfs = TauTriggerSfs::open("tauTriggerEfficiencies2017.root", "medium").unwrap();
//! let sf = sfs.get_di_tau_scale_factor(45.0, 0.3, -1.2);
//! let same = sfs.scale_factor(Category::DiTau, 45.0, 0.3, -1.2);
//! assert_eq!(sf, same);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod category;
pub mod efficiency;
pub mod scale_factor;
pub mod store;

#[cfg(test)]
mod test_support;

pub use artifact::open_artifact;
pub use category::{Category, Source, TableNames, WorkingPoint, required_table_names};
pub use efficiency::{CalibrationSet, Efficiency, EfficiencyStatus, lookup, lookup_detailed};
pub use scale_factor::{MIN_MC_EFFICIENCY, TauKinematics, TriggerSf, data_mc_ratio};
pub use store::{TauTriggerSfs, missing_tables};

/// Construction-time failure (artifact unreadable, table missing or malformed).
pub type LoadError = tsf_core::Error;
