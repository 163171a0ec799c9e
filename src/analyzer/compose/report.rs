//! Aggregated results over a batch of files.

use crate::analyzer::compose::fix::FixOutcome;
use crate::analyzer::compose::lint::LintResult;

/// Validation results for a batch of files.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<LintResult>,
}

impl BatchReport {
    pub fn new(results: Vec<LintResult>) -> Self {
        Self { results }
    }

    pub fn push(&mut self, result: LintResult) {
        self.results.push(result);
    }

    pub fn files_checked(&self) -> usize {
        self.results.len()
    }

    /// Files with at least one error or warning.
    pub fn files_with_issues(&self) -> usize {
        self.results.iter().filter(|r| r.has_findings()).count()
    }

    /// Paths of files with at least one error.
    pub fn files_with_errors(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.has_errors())
            .map(|r| r.file_path.as_str())
            .collect()
    }

    pub fn total_errors(&self) -> usize {
        self.results.iter().map(LintResult::error_count).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.results.iter().map(LintResult::warning_count).sum()
    }

    /// True when no file has an error. Warnings never fail a batch.
    pub fn success(&self) -> bool {
        self.total_errors() == 0
    }
}

/// Counts for a batch of rewrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixSummary {
    /// Files rewritten (or that would be, in dry-run and check modes).
    pub changed: Vec<String>,
    pub unchanged: usize,
    pub empty: usize,
    /// Files that could not be parsed, read or written, with the reason.
    pub failed: Vec<(String, String)>,
}

impl FixSummary {
    pub fn record(&mut self, path: impl Into<String>, outcome: &FixOutcome) {
        match outcome {
            FixOutcome::Rewritten(_) => self.changed.push(path.into()),
            FixOutcome::Unchanged => self.unchanged += 1,
            FixOutcome::Empty => self.empty += 1,
        }
    }

    pub fn record_failure(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.failed.push((path.into(), reason.into()));
    }

    pub fn total(&self) -> usize {
        self.changed.len() + self.unchanged + self.empty + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}
