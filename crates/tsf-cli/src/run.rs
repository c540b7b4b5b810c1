//! `tausf batch`: evaluate a list of taus described by a run config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tsf_trigger::{Category, TauKinematics, TriggerSf, WorkingPoint};

use crate::{load_store, write_json};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Calibration artifact (.root or .json).
    pub artifact: PathBuf,
    /// Tau ID working point.
    #[serde(default)]
    pub working_point: WorkingPoint,
    /// Trigger channel (`ditau`, `etau`, `mutau`).
    pub channel: Category,
    /// JSON list of `{pt, eta, phi}` objects.
    pub input: PathBuf,
    /// Where to write results (pretty JSON). Defaults to stdout.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl BatchConfig {
    /// Resolve relative paths against the directory holding the config.
    fn resolve_paths(mut self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.artifact = join(self.artifact);
        self.input = join(self.input);
        self.output = self.output.map(join);
        self
    }
}

pub fn read_batch_config(path: &Path) -> Result<BatchConfig> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read run config {}", path.display()))?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    let cfg: BatchConfig = if ext == "json" {
        serde_json::from_slice(&bytes)?
    } else {
        // Default: YAML (serde_yaml_ng).
        serde_yaml_ng::from_slice(&bytes)?
    };
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(cfg.resolve_paths(base))
}

#[derive(Debug, Serialize)]
struct BatchRow {
    #[serde(flatten)]
    tau: TauKinematics,
    #[serde(flatten)]
    sf: TriggerSf,
}

pub fn cmd_batch(config: &Path) -> Result<()> {
    let cfg = read_batch_config(config)?;
    let sfs = load_store(&cfg.artifact, &cfg.working_point)?;

    let text = std::fs::read_to_string(&cfg.input)
        .with_context(|| format!("failed to read taus from {}", cfg.input.display()))?;
    let taus: Vec<TauKinematics> = serde_json::from_str(&text).with_context(|| {
        format!("{}: expected a JSON list of {{pt, eta, phi}}", cfg.input.display())
    })?;
    tracing::info!(n_taus = taus.len(), channel = %cfg.channel, "evaluating batch");

    let rows: Vec<BatchRow> = taus
        .iter()
        .zip(sfs.evaluate_batch(cfg.channel, &taus))
        .map(|(&tau, sf)| BatchRow { tau, sf })
        .collect();
    let n_zero = rows.iter().filter(|r| r.sf.scale_factor == 0.0).count();
    if n_zero > 0 {
        tracing::info!(n_zero, "taus with a zero scale factor");
    }

    write_json(cfg.output.as_ref(), serde_json::to_value(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_config_defaults_and_relative_paths() {
        let cfg: BatchConfig = serde_yaml_ng::from_str(
            "artifact: effs.root\nchannel: mutau\ninput: taus.json\n",
        )
        .unwrap();
        let cfg = cfg.resolve_paths(Path::new("/data/run"));
        assert_eq!(cfg.working_point.as_str(), "medium");
        assert_eq!(cfg.channel, Category::MuTau);
        assert_eq!(cfg.artifact, PathBuf::from("/data/run/effs.root"));
        assert_eq!(cfg.input, PathBuf::from("/data/run/taus.json"));
        assert!(cfg.output.is_none());
    }

    #[test]
    fn absolute_paths_are_kept() {
        let cfg: BatchConfig = serde_yaml_ng::from_str(
            "artifact: /cal/effs.json\nworking_point: tight\nchannel: etau\n\
             input: /in/taus.json\noutput: out.json\n",
        )
        .unwrap();
        let cfg = cfg.resolve_paths(Path::new("/data/run"));
        assert_eq!(cfg.artifact, PathBuf::from("/cal/effs.json"));
        assert_eq!(cfg.output, Some(PathBuf::from("/data/run/out.json")));
        assert_eq!(cfg.working_point.as_str(), "tight");
    }

    #[test]
    fn bad_channel_or_unknown_key_is_rejected() {
        assert!(
            serde_yaml_ng::from_str::<BatchConfig>(
                "artifact: a.json\nchannel: tautau_x\ninput: t.json\n"
            )
            .is_err()
        );
        assert!(
            serde_yaml_ng::from_str::<BatchConfig>(
                "artifact: a.json\nchannel: ditau\ninput: t.json\nthreads: 4\n"
            )
            .is_err()
        );
    }
}
