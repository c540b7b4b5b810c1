//! Data/MC scale factors and the per-category query methods.

use serde::{Deserialize, Serialize};

use crate::category::{Category, Source};
use crate::efficiency::{Efficiency, EfficiencyStatus};
use crate::store::TauTriggerSfs;

/// Below this simulated efficiency the scale factor is reported as `0.0`.
pub const MIN_MC_EFFICIENCY: f64 = 1e-5;

/// Kinematics of one tau candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TauKinematics {
    /// Transverse momentum [GeV].
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuthal angle.
    pub phi: f64,
}

/// Efficiencies and scale factor for one tau.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriggerSf {
    /// Efficiency in data.
    pub eff_data: f64,
    /// Efficiency in simulation.
    pub eff_mc: f64,
    /// `eff_data / eff_mc`, or `0.0` when `eff_mc` is below [`MIN_MC_EFFICIENCY`].
    pub scale_factor: f64,
    /// Data lookup outcome.
    pub data_status: EfficiencyStatus,
    /// Simulation lookup outcome.
    pub mc_status: EfficiencyStatus,
}

/// `eff_data / eff_mc`, or `None` if `eff_mc` is below [`MIN_MC_EFFICIENCY`]
/// (or NaN).
pub fn data_mc_ratio(eff_data: f64, eff_mc: f64) -> Option<f64> {
    if eff_mc.is_nan() || eff_mc < MIN_MC_EFFICIENCY {
        return None;
    }
    Some(eff_data / eff_mc)
}

impl TauTriggerSfs {
    /// Corrected `source` efficiency of `category` at (pt, eta, phi).
    pub fn efficiency(
        &self,
        category: Category,
        source: Source,
        pt: f64,
        eta: f64,
        phi: f64,
    ) -> f64 {
        self.efficiency_detailed(category, source, pt, eta, phi).value
    }

    /// Like [`efficiency`](Self::efficiency), with the lookup status.
    pub fn efficiency_detailed(
        &self,
        category: Category,
        source: Source,
        pt: f64,
        eta: f64,
        phi: f64,
    ) -> Efficiency {
        self.calibration(category, source).efficiency_detailed(pt, eta, phi)
    }

    /// Data/MC scale factor of `category` at (pt, eta, phi).
    pub fn scale_factor(&self, category: Category, pt: f64, eta: f64, phi: f64) -> f64 {
        self.evaluate(category, pt, eta, phi).scale_factor
    }

    /// Both efficiencies and the scale factor in one call.
    pub fn evaluate(&self, category: Category, pt: f64, eta: f64, phi: f64) -> TriggerSf {
        let data = self.efficiency_detailed(category, Source::Data, pt, eta, phi);
        let mc = self.efficiency_detailed(category, Source::Mc, pt, eta, phi);

        let scale_factor = data_mc_ratio(data.value, mc.value).unwrap_or_else(|| {
            log::warn!(
                "Eff MC is suspiciously low ({}) for {} trigger, working point '{}', \
                 (pt, eta, phi) = ({}, {}, {}); scale factor set to 0",
                mc.value,
                category,
                self.working_point(),
                pt,
                eta,
                phi
            );
            0.0
        });

        TriggerSf {
            eff_data: data.value,
            eff_mc: mc.value,
            scale_factor,
            data_status: data.status,
            mc_status: mc.status,
        }
    }

    /// [`evaluate`](Self::evaluate) for each tau, in order.
    pub fn evaluate_batch(&self, category: Category, taus: &[TauKinematics]) -> Vec<TriggerSf> {
        taus.iter().map(|t| self.evaluate(category, t.pt, t.eta, t.phi)).collect()
    }

    /// Di-tau trigger efficiency in data.
    pub fn get_di_tau_efficiency_data(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.efficiency(Category::DiTau, Source::Data, pt, eta, phi)
    }

    /// Di-tau trigger efficiency in simulation.
    pub fn get_di_tau_efficiency_mc(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.efficiency(Category::DiTau, Source::Mc, pt, eta, phi)
    }

    /// Di-tau trigger scale factor.
    pub fn get_di_tau_scale_factor(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.scale_factor(Category::DiTau, pt, eta, phi)
    }

    /// Electron-tau trigger efficiency (tau leg) in data.
    pub fn get_e_tau_efficiency_data(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.efficiency(Category::ETau, Source::Data, pt, eta, phi)
    }

    /// Electron-tau trigger efficiency (tau leg) in simulation.
    pub fn get_e_tau_efficiency_mc(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.efficiency(Category::ETau, Source::Mc, pt, eta, phi)
    }

    /// Electron-tau trigger scale factor (tau leg).
    pub fn get_e_tau_scale_factor(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.scale_factor(Category::ETau, pt, eta, phi)
    }

    /// Muon-tau trigger efficiency (tau leg) in data.
    pub fn get_mu_tau_efficiency_data(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.efficiency(Category::MuTau, Source::Data, pt, eta, phi)
    }

    /// Muon-tau trigger efficiency (tau leg) in simulation.
    pub fn get_mu_tau_efficiency_mc(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.efficiency(Category::MuTau, Source::Mc, pt, eta, phi)
    }

    /// Muon-tau trigger scale factor (tau leg).
    pub fn get_mu_tau_scale_factor(&self, pt: f64, eta: f64, phi: f64) -> f64 {
        self.scale_factor(Category::MuTau, pt, eta, phi)
    }
}
