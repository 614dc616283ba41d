// src/pipeline/aggregate.rs

//! Combined-manifest aggregation.

use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::models::{ManifestRecord, RunSummary, SourceReport};
use crate::sources::SampleSource;

/// Owns the combined manifest table and drives each source through the
/// five-stage protocol.
pub struct Aggregator {
    diag: Arc<Diagnostics>,
    records: Vec<ManifestRecord>,
    reports: Vec<SourceReport>,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new(diag: Arc<Diagnostics>) -> Self {
        Self {
            diag,
            records: Vec::new(),
            reports: Vec::new(),
        }
    }

    /// Drive one source through its stages and append its output.
    ///
    /// The combined table is only touched after every stage has
    /// succeeded; a failing stage leaves it unchanged.
    pub fn add_source(&mut self, source: &mut dyn SampleSource) -> Result<()> {
        let name = source.name();

        self.diag.debug(&format!("Reading the {name} sheet"));
        let rows_read = source.read()?;
        self.diag.info(&format!("{rows_read} rows in the {name} sheet"));

        let out_of_scope = source.filter_scope()?;
        self.diag.info(&format!(
            "Removed {out_of_scope} out-of-scope rows from {name}"
        ));

        let unmapped_stage = source.classify()?;

        source.build_paths()?;

        let missing_images = source.filter_missing()?;

        let records = source.take_records();
        let kept = records.len();
        self.diag
            .info(&format!("{name}: {kept} samples added to the manifest"));

        self.reports.push(SourceReport {
            source: name.to_string(),
            rows_read,
            out_of_scope,
            unmapped_stage,
            missing_images,
            kept,
        });
        self.records.extend(records);
        Ok(())
    }

    /// Records accumulated so far, in arrival order.
    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }

    /// Consume the aggregator, yielding the combined table and its
    /// summary.
    pub fn finish(self) -> (Vec<ManifestRecord>, RunSummary) {
        let summary = RunSummary::new(self.reports, &self.records, self.diag.warning_count());
        (self.records, summary)
    }
}

#[cfg(test)]
mod tests {
    use std::mem;
    use std::path::PathBuf;

    use crate::error::AppError;
    use crate::models::StageClass;

    use super::*;

    struct StubSource {
        name: &'static str,
        records: Vec<ManifestRecord>,
        fail_on_paths: bool,
    }

    impl StubSource {
        fn new(name: &'static str, classes: &[StageClass]) -> Self {
            let records = classes
                .iter()
                .enumerate()
                .map(|(i, &class)| ManifestRecord {
                    class,
                    img: PathBuf::from(format!("{name}_{i}.nii.gz")),
                    mask: PathBuf::from(format!("{name}_{i}_mask.nii.gz")),
                })
                .collect();
            Self {
                name,
                records,
                fail_on_paths: false,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                records: Vec::new(),
                fail_on_paths: true,
            }
        }
    }

    impl SampleSource for StubSource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn read(&mut self) -> crate::error::Result<usize> {
            Ok(self.records.len())
        }

        fn filter_scope(&mut self) -> crate::error::Result<usize> {
            Ok(0)
        }

        fn classify(&mut self) -> crate::error::Result<usize> {
            Ok(0)
        }

        fn build_paths(&mut self) -> crate::error::Result<()> {
            if self.fail_on_paths {
                return Err(AppError::validation("stub failure"));
            }
            Ok(())
        }

        fn filter_missing(&mut self) -> crate::error::Result<usize> {
            Ok(0)
        }

        fn take_records(&mut self) -> Vec<ManifestRecord> {
            mem::take(&mut self.records)
        }
    }

    #[test]
    fn sources_are_appended_in_order() {
        let mut aggregator = Aggregator::new(Arc::new(Diagnostics::new()));

        let mut first = StubSource::new("first", &[StageClass::Early, StageClass::Advanced]);
        let mut second = StubSource::new("second", &[StageClass::Intermediate]);
        aggregator.add_source(&mut first).unwrap();
        aggregator.add_source(&mut second).unwrap();

        let (records, summary) = aggregator.finish();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].img, PathBuf::from("first_0.nii.gz"));
        assert_eq!(records[1].img, PathBuf::from("first_1.nii.gz"));
        assert_eq!(records[2].img, PathBuf::from("second_0.nii.gz"));

        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.sources.len(), 2);
        assert_eq!(summary.sources[0].source, "first");
        assert_eq!(summary.sources[0].kept, 2);
    }

    #[test]
    fn a_failing_source_leaves_the_table_unchanged() {
        let mut aggregator = Aggregator::new(Arc::new(Diagnostics::new()));

        let mut good = StubSource::new("good", &[StageClass::Early]);
        aggregator.add_source(&mut good).unwrap();

        let mut bad = StubSource::failing("bad");
        assert!(aggregator.add_source(&mut bad).is_err());
        assert_eq!(aggregator.records().len(), 1);

        let (records, summary) = aggregator.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(summary.sources.len(), 1);
        assert_eq!(summary.sources[0].source, "good");
    }

    #[test]
    fn class_breakdown_reflects_all_sources() {
        let mut aggregator = Aggregator::new(Arc::new(Diagnostics::new()));

        let mut first = StubSource::new("first", &[StageClass::Early, StageClass::Early]);
        let mut second = StubSource::new("second", &[StageClass::Advanced]);
        aggregator.add_source(&mut first).unwrap();
        aggregator.add_source(&mut second).unwrap();

        let (_, summary) = aggregator.finish();
        assert_eq!(summary.classes.early, 2);
        assert_eq!(summary.classes.advanced, 1);
        assert_eq!(summary.classes.intermediate, 0);
    }
}
