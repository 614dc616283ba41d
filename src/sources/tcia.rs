// src/sources/tcia.rs

//! Public tumor-imaging archive source.
//!
//! Reads the archive's clinical sheet, keeps subjects staged A through
//! C on the BCLC scale, and points each kept row at its portal-venous
//! image and segmentation volumes. Rows carrying a stage label outside
//! the mapping are dropped and counted.

use std::mem;
use std::path::PathBuf;
use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::models::{ManifestRecord, StageClass, TciaConfig};
use crate::utils::fs::file_exists;

use super::table::{SheetRow, read_sheet};
use super::{ClassifiedRow, SampleSource};

/// Subject identifier column in the archive sheet.
const ID_COLUMN: &str = "TCIA_ID";
/// BCLC stage column in the archive sheet.
const STAGE_COLUMN: &str = "BCLC";
/// Stage label excluded from the cohort.
const EXCLUDED_STAGE: &str = "Stage-D";

/// Source adapter for the public tumor-imaging archive.
pub struct TciaSource {
    config: Arc<TciaConfig>,
    diag: Arc<Diagnostics>,
    rows: Vec<SheetRow>,
    classified: Vec<ClassifiedRow>,
    records: Vec<ManifestRecord>,
}

impl TciaSource {
    /// Create a new archive source.
    pub fn new(config: Arc<TciaConfig>, diag: Arc<Diagnostics>) -> Self {
        Self {
            config,
            diag,
            rows: Vec::new(),
            classified: Vec::new(),
            records: Vec::new(),
        }
    }

    fn image_path(&self, id: &str) -> PathBuf {
        self.config
            .image_dir_path()
            .join(format!("{id}{}", self.config.image_suffix))
    }

    fn mask_path(&self, id: &str) -> PathBuf {
        self.config
            .mask_dir_path()
            .join(format!("{id}{}", self.config.image_suffix))
    }

    fn map_stage(stage: &str) -> Option<StageClass> {
        match stage {
            "Stage-A" => Some(StageClass::Early),
            "Stage-B" => Some(StageClass::Intermediate),
            "Stage-C" => Some(StageClass::Advanced),
            _ => None,
        }
    }
}

impl SampleSource for TciaSource {
    fn name(&self) -> &'static str {
        "tcia"
    }

    fn read(&mut self) -> Result<usize> {
        self.rows = read_sheet(&self.config.sheet_path(), ID_COLUMN, STAGE_COLUMN)?;
        Ok(self.rows.len())
    }

    fn filter_scope(&mut self) -> Result<usize> {
        let before = self.rows.len();
        self.rows
            .retain(|row| row.stage.as_deref().is_some_and(|s| s != EXCLUDED_STAGE));
        Ok(before - self.rows.len())
    }

    fn classify(&mut self) -> Result<usize> {
        let rows = mem::take(&mut self.rows);
        let mut unmapped = 0;
        let mut classified = Vec::with_capacity(rows.len());

        for row in rows {
            match row.stage.as_deref().and_then(Self::map_stage) {
                Some(class) => classified.push(ClassifiedRow { id: row.id, class }),
                None => {
                    unmapped += 1;
                    self.diag.debug(&format!(
                        "No class for BCLC value {:?} ({})",
                        row.stage, row.id
                    ));
                }
            }
        }

        self.classified = classified;
        if unmapped > 0 {
            self.diag
                .warn(&format!("Dropped {unmapped} rows with unmapped BCLC stage"));
        }
        Ok(unmapped)
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
