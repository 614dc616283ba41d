// src/pipeline/export.rs

//! Manifest and summary persistence.

use std::path::Path;

use crate::error::Result;
use crate::models::{ManifestRecord, RunSummary};
use crate::utils::fs::write_atomic;

/// Write the combined manifest as CSV with a `class,img,mask` header.
///
/// Returns the number of rows written.
pub fn write_manifest(path: &Path, records: &[ManifestRecord]) -> Result<usize> {
    // header is written explicitly so an empty manifest still carries one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["class", "img", "mask"])?;
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    write_atomic(path, &bytes)?;
    Ok(records.len())
}

/// Read a previously written manifest back into memory.
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records: Vec<ManifestRecord> = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Write the run summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_vec_pretty(summary)?;
    write_atomic(path, &json)
}
