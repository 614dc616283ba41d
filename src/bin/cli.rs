//! Cohort CLI
//!
//! Command-line entry point for building labeled imaging manifests
//! from the configured clinical sources.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use cohort::diagnostics::Diagnostics;
use cohort::error::{AppError, Result};
use cohort::models::{ClassBreakdown, Config};
use cohort::pipeline::{self, export};

/// cohort - Clinical imaging manifest builder
#[derive(Parser, Debug)]
#[command(
    name = "cohort",
    version,
    about = "Builds labeled imaging-sample manifests from clinical sources"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the combined manifest from all configured sources
    Build {
        /// Manifest output path
        #[arg(short, long, default_value = "manifest.csv")]
        output: PathBuf,

        /// Also write a JSON run summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Validate the configuration and check that the inputs exist
    Validate,

    /// Show stats for a previously written manifest
    Info {
        /// Manifest path to inspect
        #[arg(short, long, default_value = "manifest.csv")]
        manifest: PathBuf,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Build { output, summary } => {
            let diag = Arc::new(Diagnostics::new());
            let outcome = pipeline::run_build(&config, Arc::clone(&diag))?;

            let written = export::write_manifest(&output, &outcome.records)?;
            log::info!("Wrote {} rows to {}", written, output.display());

            if let Some(summary_path) = summary {
                export::write_summary(&summary_path, &outcome.summary)?;
                log::info!("Wrote run summary to {}", summary_path.display());
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("✓ Config OK");

            let mut missing_sheets = 0;
            for (name, sheet) in [
                ("tcia", config.tcia.sheet_path()),
                ("operative", config.operative.sheet_path()),
            ] {
                if sheet.exists() {
                    log::info!("✓ {} sheet found at {}", name, sheet.display());
                } else {
                    log::error!("{} sheet missing: {}", name, sheet.display());
                    missing_sheets += 1;
                }
            }

            for (name, dir) in [
                ("tcia image", config.tcia.image_dir_path()),
                ("tcia mask", config.tcia.mask_dir_path()),
                ("operative image", config.operative.image_dir_path()),
                ("operative mask", config.operative.mask_dir_path()),
            ] {
                if !dir.is_dir() {
                    log::warn!("{} directory not found: {}", name, dir.display());
                }
            }

            if missing_sheets > 0 {
                return Err(AppError::validation("missing clinical sheets"));
            }
            log::info!("All validations passed!");
        }

        Command::Info { manifest } => {
            if !manifest.exists() {
                log::error!(
                    "Manifest not found at {}. Run 'build' first.",
                    manifest.display()
                );
                return Err(AppError::config("Manifest not found"));
            }

            let records = export::read_manifest(&manifest)?;
            let classes = ClassBreakdown::tally(&records);
            log::info!("Manifest: {}", manifest.display());
            log::info!("{} samples", records.len());
            log::info!(
                "Classes: {} early / {} intermediate / {} advanced",
                classes.early,
                classes.intermediate,
                classes.advanced
            );
        }
    }

    Ok(())
}
