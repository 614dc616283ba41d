// src/models/report.rs

//! Run reporting structures.
//!
//! A `RunSummary` is produced at the end of every build and can be
//! exported alongside the manifest for audit purposes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ManifestRecord, StageClass};

/// Per-source row accounting across the pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    /// Source name
    pub source: String,
    /// Rows loaded from the clinical sheet
    pub rows_read: usize,
    /// Rows removed by the scope filter (no stage value, or excluded)
    pub out_of_scope: usize,
    /// Rows whose stage label had no mapping
    pub unmapped_stage: usize,
    /// Rows dropped because the image file was absent
    pub missing_images: usize,
    /// Rows contributed to the combined manifest
    pub kept: usize,
}

/// Record totals by stage class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBreakdown {
    pub early: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl ClassBreakdown {
    /// Tally records by stage class.
    pub fn tally(records: &[ManifestRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.class {
                StageClass::Early => counts.early += 1,
                StageClass::Intermediate => counts.intermediate += 1,
                StageClass::Advanced => counts.advanced += 1,
            }
        }
        counts
    }
}

/// Summary of one full manifest build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the summary was produced
    pub generated_at: DateTime<Utc>,
    /// Per-source accounting, in pipeline order
    pub sources: Vec<SourceReport>,
    /// Total rows in the combined manifest
    pub total_records: usize,
    /// Record totals by stage class
    pub classes: ClassBreakdown,
    /// Warnings emitted during the run
    pub warnings: usize,
}

impl RunSummary {
    /// Build a summary over the finished combined table.
    pub fn new(sources: Vec<SourceReport>, records: &[ManifestRecord], warnings: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            total_records: records.len(),
            classes: ClassBreakdown::tally(records),
            sources,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn record(class: StageClass) -> ManifestRecord {
        ManifestRecord {
            class,
            img: PathBuf::from("img.nii.gz"),
            mask: PathBuf::from("mask.nii.gz"),
        }
    }

    #[test]
    fn class_breakdown_counts_each_class() {
        let records = vec![
            record(StageClass::Early),
            record(StageClass::Early),
            record(StageClass::Advanced),
        ];
        let counts = ClassBreakdown::tally(&records);
        assert_eq!(
            counts,
            ClassBreakdown {
                early: 2,
                intermediate: 0,
                advanced: 1,
            }
        );
    }

    #[test]
    fn summary_totals_match_the_records() {
        let records = vec![record(StageClass::Early), record(StageClass::Intermediate)];
        let summary = RunSummary::new(Vec::new(), &records, 3);
        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.warnings, 3);
        assert_eq!(summary.classes.intermediate, 1);
    }
}
