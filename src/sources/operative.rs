// src/sources/operative.rs

//! Institutional operative source.
//!
//! Reads the operative cohort sheet. The identifier column is
//! configurable; staging uses the short BCLC labels, and labels
//! without a mapping fall back to very-early disease. Subjects
//! excluded from the study (stage D or pending, the withdrawn id, or
//! ids matching the quality-control pattern) are removed before
//! classification.

use std::mem;
use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;

use crate::diagnostics::Diagnostics;
use crate::error::{AppError, Result};
use crate::models::{ManifestRecord, OperativeConfig, StageClass};
use crate::utils::fs::file_exists;

use super::table::{SheetRow, read_sheet};
use super::{ClassifiedRow, SampleSource};

/// BCLC stage column in the operative sheet.
const STAGE_COLUMN: &str = "BCLC";
/// Stage labels excluded from the cohort.
const EXCLUDED_STAGES: [&str; 2] = ["D", "Pending"];

/// Source adapter for the institutional operative dataset.
pub struct OperativeSource {
    config: Arc<OperativeConfig>,
    diag: Arc<Diagnostics>,
    excluded_pattern: Regex,
    rows: Vec<SheetRow>,
    classified: Vec<ClassifiedRow>,
    records: Vec<ManifestRecord>,
}

impl OperativeSource {
    /// Create a new operative source.
    ///
    /// Fails when the configured exclusion pattern is not a valid
    /// regular expression.
    pub fn new(config: Arc<OperativeConfig>, diag: Arc<Diagnostics>) -> Result<Self> {
        let excluded_pattern = Regex::new(&config.excluded_id_pattern)
            .map_err(|e| AppError::pattern(config.excluded_id_pattern.clone(), e))?;

        Ok(Self {
            config,
            diag,
            excluded_pattern,
            rows: Vec::new(),
            classified: Vec::new(),
            records: Vec::new(),
        })
    }

    fn image_path(&self, id: &str) -> PathBuf {
        self.config
            .image_dir_path()
            .join(format!("{id}{}", self.config.image_suffix))
    }

    fn mask_path(&self, id: &str) -> PathBuf {
        self.config
            .mask_dir_path()
            .join(format!("{id}{}", self.config.mask_suffix))
    }

    fn map_stage(stage: &str) -> Option<StageClass> {
        match stage {
            "0" | "A" => Some(StageClass::Early),
            "B" => Some(StageClass::Intermediate),
            "C" => Some(StageClass::Advanced),
            _ => None,
        }
    }

    fn excluded(&self, row: &SheetRow) -> bool {
        match row.stage.as_deref() {
            None => true,
            Some(stage) => {
                EXCLUDED_STAGES.contains(&stage)
                    || row.id == self.config.excluded_id
                    || self.excluded_pattern.is_match(&row.id)
            }
        }
    }
}

impl SampleSource for OperativeSource {
    fn name(&self) -> &'static str {
        "operative"
    }

    fn read(&mut self) -> Result<usize> {
        self.rows = read_sheet(
            &self.config.sheet_path(),
            &self.config.id_column,
            STAGE_COLUMN,
        )?;
        Ok(self.rows.len())
    }

    fn filter_scope(&mut self) -> Result<usize> {
        let rows = mem::take(&mut self.rows);
        let before = rows.len();
        self.rows = rows.into_iter().filter(|row| !self.excluded(row)).collect();
        Ok(before - self.rows.len())
    }

    fn classify(&mut self) -> Result<usize> {
        let rows = mem::take(&mut self.rows);
        let mut defaulted = 0;
        let mut classified = Vec::with_capacity(rows.len());

        for row in rows {
            let class = match row.stage.as_deref().and_then(Self::map_stage) {
                Some(class) => class,
                None => {
                    defaulted += 1;
                    self.diag.debug(&format!(
                        "No class for BCLC value {:?} ({}), defaulting to 0",
                        row.stage, row.id
                    ));
                    StageClass::Early
                }
            };
            classified.push(ClassifiedRow { id: row.id, class });
        }

        self.classified = classified;
        if defaulted > 0 {
            self.diag.warn(&format!(
                "Defaulted {defaulted} rows with unmapped BCLC stage to class 0"
            ));
        }
        Ok(defaulted)
    }

    fn build_paths(&mut self) -> Result<()> {
        let classified = mem::take(&mut self.classified);
        self.records = classified
            .into_iter()
            .map(|row| ManifestRecord {
                class: row.class,
                img: self.image_path(&row.id),
                mask: self.mask_path(&row.id),
            })
            .collect();
        Ok(())
    }

    fn filter_missing(&mut self) -> Result<usize> {
        let before = self.records.len();
        self.records
            .retain(|record| file_exists(&record.img, &self.diag));

        let dropped = before - self.records.len();
        if dropped > 0 {
            self.diag.warn(&format!("{dropped} files not found"));
        }
        Ok(dropped)
    }

    fn take_records(&mut self) -> Vec<ManifestRecord> {
        mem::take(&mut self.records)
    }
}
