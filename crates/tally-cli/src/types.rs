//! Result types for a completed tally invocation.

use std::path::PathBuf;

/// Outcome of a successful run: progress counts and the reports written.
#[derive(Debug, Clone)]
pub struct TallyOutcome {
    /// Files fully processed.
    pub files_processed: usize,
    /// Total input files.
    pub file_count: usize,
    /// One entry per tracked counter, in alias order.
    pub reports: Vec<ReportSummary>,
}

/// One written report and the entries it contains.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    /// Counter alias the report covers.
    pub alias: String,
    /// Report file path.
    pub path: PathBuf,
    /// Total admitted occurrences for this counter.
    pub total: u64,
    /// Ranked top-N entries as written.
    pub entries: Vec<ReportEntry>,
}

/// One ranked report row.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Upper-cased observed value.
    pub value: String,
    /// Occurrence count.
    pub count: u64,
    /// Percentage-of-total label, e.g. `60.0%`.
    pub percent: String,
}
