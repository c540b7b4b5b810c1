//! tausf CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tsf_trigger::{
    Category, TauTriggerSfs, WorkingPoint, missing_tables, open_artifact, required_table_names,
};

mod run;

#[derive(Parser)]
#[command(name = "tausf")]
#[command(about = "tausf - Tau trigger efficiencies and data/MC scale factors")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that an artifact holds every table of a working point
    Check {
        /// Calibration artifact (.root or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Tau ID working point (vvloose ... vvtight)
        #[arg(long, default_value = "medium")]
        wp: WorkingPoint,

        /// Output file for the report (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Efficiencies and scale factor for a single tau
    Eval {
        /// Calibration artifact (.root or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Tau ID working point (vvloose ... vvtight)
        #[arg(long, default_value = "medium")]
        wp: WorkingPoint,

        /// Trigger channel (ditau, etau, mutau)
        #[arg(long)]
        channel: Category,

        /// Tau transverse momentum [GeV]
        #[arg(long)]
        pt: f64,

        /// Tau pseudorapidity
        #[arg(long, allow_hyphen_values = true)]
        eta: f64,

        /// Tau azimuthal angle
        #[arg(long, allow_hyphen_values = true)]
        phi: f64,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate a list of taus described by a YAML run config
    Batch {
        /// Run config (YAML, or JSON by extension)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the JSON results.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { input, wp, output } => cmd_check(&input, &wp, output.as_ref()),
        Commands::Eval { input, wp, channel, pt, eta, phi, output } => {
            cmd_eval(&input, &wp, channel, pt, eta, phi, output.as_ref())
        }
        Commands::Batch { config } => run::cmd_batch(&config),
        Commands::Version => {
            println!("tausf {}", tsf_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_check(input: &PathBuf, wp: &WorkingPoint, output: Option<&PathBuf>) -> Result<()> {
    tracing::info!(path = %input.display(), working_point = %wp, "checking artifact");
    let provider = open_artifact(input)
        .with_context(|| format!("failed to open calibration artifact {}", input.display()))?;

    let required = required_table_names(wp);
    let missing = missing_tables(&provider, wp);

    let report = serde_json::json!({
        "artifact": input.display().to_string(),
        "working_point": wp,
        "required": required,
        "missing": missing,
        "complete": missing.is_empty(),
    });
    write_json(output, report)?;

    if !missing.is_empty() {
        anyhow::bail!(
            "{} of {} tables missing for working point '{}' in {}",
            missing.len(),
            required.len(),
            wp,
            input.display()
        );
    }
    Ok(())
}

fn cmd_eval(
    input: &PathBuf,
    wp: &WorkingPoint,
    channel: Category,
    pt: f64,
    eta: f64,
    phi: f64,
    output: Option<&PathBuf>,
) -> Result<()> {
    let sfs = load_store(input, wp)?;
    let sf = sfs.evaluate(channel, pt, eta, phi);
    tracing::info!(channel = %channel, scale_factor = sf.scale_factor, "evaluated");

    let output_json = serde_json::json!({
        "channel": channel,
        "working_point": wp,
        "pt": pt,
        "eta": eta,
        "phi": phi,
        "eff_data": sf.eff_data,
        "eff_mc": sf.eff_mc,
        "scale_factor": sf.scale_factor,
        "data_status": sf.data_status,
        "mc_status": sf.mc_status,
    });
    write_json(output, output_json)
}

pub(crate) fn load_store(input: &PathBuf, wp: &WorkingPoint) -> Result<TauTriggerSfs> {
    tracing::info!(path = %input.display(), working_point = %wp, "loading calibration tables");
    let sfs = TauTriggerSfs::open(input, wp.as_str())
        .with_context(|| format!("failed to load tau trigger tables from {}", input.display()))?;
    tracing::info!(origin = sfs.origin(), "calibration tables loaded");
    Ok(sfs)
}

pub(crate) fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
