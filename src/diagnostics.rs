// src/diagnostics.rs

//! Per-run diagnostics sink.
//!
//! One `Diagnostics` value is created for each run and handed to the
//! sources and the aggregator. Messages go through the `log` facade so
//! the binary's logger settings apply; warnings are also counted so the
//! run summary can report how noisy the build was.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Leveled diagnostics sink scoped to a single run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: AtomicUsize,
}

impl Diagnostics {
    /// Create a fresh sink with a zeroed warning counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a debug message.
    pub fn debug(&self, message: &str) {
        log::debug!("{message}");
    }

    /// Emit an info message.
    pub fn info(&self, message: &str) {
        log::info!("{message}");
    }

    /// Emit a warning and count it.
    pub fn warn(&self, message: &str) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        log::warn!("{message}");
    }

    /// Report a missed filesystem lookup.
    ///
    /// Individual misses are debug-level; sources report the total at
    /// warning level once filtering is done.
    pub fn file_missing(&self, path: &Path) {
        self.debug(&format!("File not found: {}", path.display()));
    }

    /// Number of warnings emitted so far.
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_counted() {
        let diag = Diagnostics::new();
        assert_eq!(diag.warning_count(), 0);

        diag.warn("first");
        diag.warn("second");
        assert_eq!(diag.warning_count(), 2);
    }

    #[test]
    fn lower_levels_do_not_touch_the_counter() {
        let diag = Diagnostics::new();
        diag.debug("quiet");
        diag.info("also quiet");
        diag.file_missing(Path::new("/tmp/none.nii.gz"));
        assert_eq!(diag.warning_count(), 0);
    }
}
