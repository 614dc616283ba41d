//! Pipeline orchestration for manifest builds.
//!
//! - `run_build`: drive every configured source and assemble the manifest
//! - `aggregate`: the combined table and the five-stage driver
//! - `export`: manifest and summary persistence

pub mod aggregate;
pub mod export;

pub use aggregate::Aggregator;

use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::models::{Config, ManifestRecord, RunSummary};
use crate::sources::{OperativeSource, TciaSource};

/// Output of one full manifest build.
#[derive(Debug)]
pub struct BuildOutcome {
    /// Combined manifest rows, archive rows first
    pub records: Vec<ManifestRecord>,
    /// Accounting for the run
    pub summary: RunSummary,
}

/// Run the full build: the archive source first, then the operative
/// source.
pub fn run_build(config: &Config, diag: Arc<Diagnostics>) -> Result<BuildOutcome> {
    config.validate()?;

    let mut aggregator = Aggregator::new(Arc::clone(&diag));

    let mut tcia = TciaSource::new(Arc::new(config.tcia.clone()), Arc::clone(&diag));
    aggregator.add_source(&mut tcia)?;

    let mut operative = OperativeSource::new(Arc::new(config.operative.clone()), Arc::clone(&diag))?;
    aggregator.add_source(&mut operative)?;

    let (records, summary) = aggregator.finish();
    log_summary(&summary, &diag);

    Ok(BuildOutcome { records, summary })
}

fn log_summary(summary: &RunSummary, diag: &Diagnostics) {
    diag.info(&format!(
        "Manifest complete: {} samples",
        summary.total_records
    ));
    for report in &summary.sources {
        diag.info(&format!(
            "  {}: kept {} of {} rows ({} out of scope, {} unmapped, {} images missing)",
            report.source,
            report.kept,
            report.rows_read,
            report.out_of_scope,
            report.unmapped_stage,
            report.missing_images
        ));
    }
    diag.info(&format!(
        "  classes: {} early / {} intermediate / {} advanced, {} warnings",
        summary.classes.early, summary.classes.intermediate, summary.classes.advanced,
        summary.warnings
    ));
}
