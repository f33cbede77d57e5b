//! Cleanup report models and mutable report builder.

use std::fmt;
use std::path::PathBuf;

use crate::spec::SpecCleanupError;

/// Aggregate counters and diagnostics for one cleanup run.
#[derive(Debug, Default, Clone)]
pub struct ReportCleanup {
    /// Total directory entries scanned.
    pub cnt_scanned: u64,
    /// Files removed.
    pub cnt_removed: u64,
    /// Entries left in place (directories, pattern mismatches).
    pub cnt_skipped: u64,
    /// Per-file failures.
    pub errors: Vec<SpecCleanupError>,
}

impl ReportCleanup {
    /// Number of collected hard errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} removed={} skipped={} errors={}",
            self.cnt_scanned,
            self.cnt_removed,
            self.cnt_skipped,
            self.error_count()
        )
    }
}

impl fmt::Display for ReportCleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[RESET]"))
    }
}

/// Mutable accumulator for cleanup statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCleanupBuilder {
    report: ReportCleanup,
}

impl ReportCleanupBuilder {
    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.report.cnt_scanned += 1;
    }

    /// Increment removed count by one.
    pub fn add_removed(&mut self) {
        self.report.cnt_removed += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.report.cnt_skipped += 1;
    }

    /// Add one path-scoped error.
    pub fn add_error(&mut self, path: PathBuf, exception: String) {
        self.report.errors.push(SpecCleanupError { path, exception });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCleanup {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_cleanup_counts_and_format() {
        let mut builder = ReportCleanupBuilder::default();
        builder.add_scanned();
        builder.add_scanned();
        builder.add_scanned();
        builder.add_removed();
        builder.add_skipped();
        builder.add_error(PathBuf::from("outputs/locked.xlsx"), "denied".to_string());
        let report = builder.build();

        assert_eq!(report.cnt_scanned, 3);
        assert_eq!(report.cnt_removed, 1);
        assert_eq!(report.cnt_skipped, 1);
        assert_eq!(report.error_count(), 1);

        let txt = report.format("[RESET]");
        assert_eq!(txt, "[RESET] scanned=3 removed=1 skipped=1 errors=1");
        assert_eq!(report.to_string(), txt);
    }
}
