//! Efficiency lookup: pT turn-on times the normalised eta-phi correction.
//!
//! ```text
//! eff(pt, eta, phi) = eff_pt(pt') * corr(eta', phi) / avg(eta', phi)
//! ```
//!
//! `pt'` is `pt` clamped [`PT_MARGIN`] inside the pT curve's range and `eta'`
//! is `eta` clamped [`ETA_MARGIN`] inside the average map's x range. `phi` is
//! left to the nearest-bin behaviour of the 2D lookup.

use serde::Serialize;
use tsf_core::{Hist1D, Hist2D};

/// Distance kept from the pT curve's edges when clamping.
pub const PT_MARGIN: f64 = 0.1;

/// Distance kept from the eta edges of the average map when clamping.
pub const ETA_MARGIN: f64 = 0.01;

/// Tables behind one (category, source) efficiency.
#[derive(Debug, Clone)]
pub struct CalibrationSet {
    /// Efficiency versus pT.
    pub efficiency_by_pt: Hist1D,
    /// Eta-phi correction map.
    pub eta_phi_correction: Hist2D,
    /// Per-region average of the correction map.
    pub eta_phi_average: Hist2D,
}

/// Outcome of a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyStatus {
    /// Regular lookup.
    Nominal,
    /// The average map is not positive at (eta, phi); efficiency forced to 0.
    OutsideAcceptance,
}

/// An efficiency value and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiency {
    /// Corrected efficiency.
    pub value: f64,
    /// Lookup outcome.
    pub status: EfficiencyStatus,
}

impl CalibrationSet {
    /// Bundle the three tables of one efficiency.
    pub fn new(
        efficiency_by_pt: Hist1D,
        eta_phi_correction: Hist2D,
        eta_phi_average: Hist2D,
    ) -> Self {
        Self { efficiency_by_pt, eta_phi_correction, eta_phi_average }
    }

    /// Corrected efficiency at (pt, eta, phi).
    pub fn efficiency(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.efficiency_detailed(pt, eta, phi).value
    }

    /// Corrected efficiency together with its [`EfficiencyStatus`].
    pub fn efficiency_detailed(&self, pt: f64, eta: f64, phi: f64) -> Efficiency {
        lookup_detailed(
            pt,
            eta,
            phi,
            &self.efficiency_by_pt,
            &self.eta_phi_correction,
            &self.eta_phi_average,
        )
    }
}

/// Corrected efficiency at (pt, eta, phi). Never fails; see [`lookup_detailed`].
pub fn lookup(pt: f64, eta: f64, phi: f64, eff: &Hist1D, corr: &Hist2D, avg: &Hist2D) -> f64 {
    lookup_detailed(pt, eta, phi, eff, corr, avg).value
}

/// Corrected efficiency at (pt, eta, phi), reporting out-of-acceptance
/// queries.
///
/// A non-positive (or NaN) average at the clamped position means the trigger
/// was not calibrated there: a warning is logged and the efficiency is `0.0`.
pub fn lookup_detailed(
    pt: f64,
    eta: f64,
    phi: f64,
    eff: &Hist1D,
    corr: &Hist2D,
    avg: &Hist2D,
) -> Efficiency {
    let pt_clamped = clamp_inside(pt, eff.domain_min() + PT_MARGIN, eff.domain_max() - PT_MARGIN);
    let eff_pt = eff.value_at(pt_clamped);

    let eta_clamped =
        clamp_inside(eta, avg.domain_min_x() + ETA_MARGIN, avg.domain_max_x() - ETA_MARGIN);
    let correction = corr.value_at(eta_clamped, phi);
    let average = avg.value_at(eta_clamped, phi);

    if average.is_nan() || average <= 0.0 {
        log::warn!(
            "tau at (eta, phi) = ({}, {}) is outside the calibrated trigger acceptance \
             ('{}' = {}); efficiency set to 0",
            eta,
            phi,
            avg.name(),
            average
        );
        return Efficiency { value: 0.0, status: EfficiencyStatus::OutsideAcceptance };
    }

    Efficiency { value: eff_pt * (correction / average), status: EfficiencyStatus::Nominal }
}

/// Upper bound first, then lower, so an inverted range still lands on one of
/// its bounds instead of panicking like `f64::clamp`.
fn clamp_inside(x: f64, lo: f64, hi: f64) -> f64 {
    let mut v = x;
    if v > hi {
        v = hi;
    }
    if v < lo {
        v = lo;
    }
    v
}
