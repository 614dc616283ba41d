//! Clinical sheet reading.
//!
//! Sheets are CSV files with a header row. Only the identifier and
//! stage columns are projected out; everything else is ignored.

use std::path::Path;

use crate::error::{AppError, Result};

/// One projected sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// Subject identifier
    pub id: String,
    /// Raw stage label; `None` when the cell is empty
    pub stage: Option<String>,
}

/// Read a clinical sheet and project it onto the identifier and stage
/// columns.
///
/// Columns are matched by trimmed header name. Fails when the file is
/// absent or either column is missing from the header.
pub fn read_sheet(path: &Path, id_column: &str, stage_column: &str) -> Result<Vec<SheetRow>> {
    if !path.exists() {
        return Err(AppError::SheetNotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let id_idx = column_index(&headers, id_column)
        .ok_or_else(|| AppError::missing_column(id_column, path))?;
    let stage_idx = column_index(&headers, stage_column)
        .ok_or_else(|| AppError::missing_column(stage_column, path))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let id = record.get(id_idx).unwrap_or("").trim().to_string();
        let stage = record
            .get(stage_idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        rows.push(SheetRow { id, stage });
    }

    Ok(rows)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn write_sheet(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clinical.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn projects_id_and_stage_columns() {
        let (_dir, path) = write_sheet(
            "TCIA_ID,Age,BCLC\n\
             HCC_001,61,Stage-A\n\
             HCC_002,70,Stage-C\n",
        );

        let rows = read_sheet(&path, "TCIA_ID", "BCLC").unwrap();
        assert_eq!(
            rows,
            vec![
                SheetRow {
                    id: "HCC_001".to_string(),
                    stage: Some("Stage-A".to_string()),
                },
                SheetRow {
                    id: "HCC_002".to_string(),
                    stage: Some("Stage-C".to_string()),
                },
            ]
        );
    }

    #[test]
    fn empty_stage_cells_become_none() {
        let (_dir, path) = write_sheet(
            "OP_ID,BCLC\n\
             OP_0001,\n\
             OP_0002,  \n\
             OP_0003,B\n",
        );

        let rows = read_sheet(&path, "OP_ID", "BCLC").unwrap();
        assert_eq!(rows[0].stage, None);
        assert_eq!(rows[1].stage, None);
        assert_eq!(rows[2].stage, Some("B".to_string()));
    }

    #[test]
    fn header_names_are_matched_trimmed() {
        let (_dir, path) = write_sheet("TCIA_ID, BCLC \nHCC_001,Stage-B\n");

        let rows = read_sheet(&path, "TCIA_ID", "BCLC").unwrap();
        assert_eq!(rows[0].stage.as_deref(), Some("Stage-B"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let (_dir, path) = write_sheet("TCIA_ID,Age\nHCC_001,61\n");

        let err = read_sheet(&path, "TCIA_ID", "BCLC").unwrap_err();
        assert!(matches!(err, AppError::MissingColumn { column, .. } if column == "BCLC"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = read_sheet(&dir.path().join("none.csv"), "ID", "BCLC").unwrap_err();
        assert!(matches!(err, AppError::SheetNotFound(_)));
    }
}
