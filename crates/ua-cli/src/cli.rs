//! The command line interface.

use std::fs;
use std::path::{Path, PathBuf};

use ::log::info;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ua_pipeline::{LoggingObserver, PipelineBuilder, PipelineConfig};

use crate::log;

/// Convert UrbanSim outputs and BEAM skims into ActivitySim inputs.
#[derive(Debug, Parser)]
#[command(name = "usim2asim", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the conversion described by a configuration file.
    Run {
        /// Path to the TOML configuration file.
        config: PathBuf,
        /// Write outputs here instead of the configured `output_dir`.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Load and check every input without writing outputs.
    Validate {
        /// Path to the TOML configuration file.
        config: PathBuf,
    },
}

impl Commands {
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { config, output_dir } => handle_run_command(&config, output_dir),
            Self::Validate { config } => handle_validate_command(&config),
        }
    }
}

/// Parse CLI arguments and run the chosen command.
pub fn run_cli() -> Result<()> {
    Cli::parse().command.execute()
}

fn load_config(path: &Path) -> Result<PipelineConfig> {
    PipelineConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Handle the `run` command.
pub fn handle_run_command(config_path: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;
    log::init(Some(&config.log_level), Some(&config.output_dir))
        .context("Failed to initialise logging.")?;
    info!("Configuration: {}", config_path.display());
    info!("Output folder: {}", config.output_dir.display());

    let pipeline = PipelineBuilder::new(config).build().context("Invalid configuration.")?;
    let summary = pipeline
        .run(&mut LoggingObserver::new())
        .context("Conversion failed.")?;

    if let (Some(hh), Some(p)) = (summary.households, summary.persons) {
        info!(
            "Wrote {} households ({} unassigned) and {} persons ({} unassigned)",
            hh.written, hh.excluded, p.written, p.excluded
        );
    }
    info!("Conversion complete.");
    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    log::init(Some(&config.log_level), None).context("Failed to initialise logging.")?;

    let pipeline = PipelineBuilder::new(config).build().context("Invalid configuration.")?;
    let report = pipeline
        .validate(&mut LoggingObserver::new())
        .context("Validation failed.")?;
    info!(
        "{} zones, {} skim records in {} (hour, mode) groups, {} matrices",
        report.zones, report.skim_records, report.skim_groups, report.matrices
    );
    info!(
        "{} households, {} persons, {} blocks, {} jobs",
        report.households, report.persons, report.blocks, report.jobs
    );
    info!("Validation successful!");
    Ok(())
}
