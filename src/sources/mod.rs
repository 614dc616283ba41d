//! Clinical sample sources.
//!
//! Every source exposes the same five-stage protocol, driven in fixed
//! order by the aggregator:
//!
//! 1. `read` - load and project the clinical sheet
//! 2. `filter_scope` - drop rows without a stage and rows the source excludes
//! 3. `classify` - map stage labels to a `StageClass`
//! 4. `build_paths` - derive image and mask locations
//! 5. `filter_missing` - drop rows whose image file is absent
//!
//! After the last stage, `take_records` yields the normalized rows.

mod operative;
mod table;
mod tcia;

pub use operative::OperativeSource;
pub use table::{SheetRow, read_sheet};
pub use tcia::TciaSource;

use crate::error::Result;
use crate::models::{ManifestRecord, StageClass};

/// A row that survived classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRow {
    pub id: String,
    pub class: StageClass,
}

/// Uniform interface over heterogeneous clinical sources.
pub trait SampleSource {
    /// Short name used in diagnostics and reports.
    fn name(&self) -> &'static str;

    /// Load the sheet and project the needed columns. Returns the row
    /// count.
    fn read(&mut self) -> Result<usize>;

    /// Remove rows without a stage value and rows matching the source's
    /// exclusion policy. Idempotent. Returns the number of removed rows.
    fn filter_scope(&mut self) -> Result<usize>;

    /// Map stage labels to classes. Returns the number of rows whose
    /// label had no mapping (dropped or defaulted, per source policy).
    fn classify(&mut self) -> Result<usize>;

    /// Derive image and mask paths for every classified row.
    fn build_paths(&mut self) -> Result<()>;

    /// Drop rows whose image file does not exist. Returns the dropped
    /// count. Missing mask files are tolerated.
    fn filter_missing(&mut self) -> Result<usize>;

    /// Yield the normalized records, leaving the source empty.
    fn take_records(&mut self) -> Vec<ManifestRecord>;
}
