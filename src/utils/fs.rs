//! File system utilities.

use std::fs;
use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// Check whether a path resolves to an existing filesystem entry.
///
/// A miss is reported at debug level through the diagnostics sink.
pub fn file_exists(path: &Path, diag: &Diagnostics) -> bool {
    let exists = path.exists();
    if !exists {
        diag.file_missing(path);
    }
    exists
}

/// Write bytes to a file atomically (temp file, then rename).
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
