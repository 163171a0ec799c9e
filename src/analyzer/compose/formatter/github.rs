//! GitHub Actions output formatter.
//!
//! Produces output in GitHub Actions workflow command format:
//! ::error file={name},line={line},title={code}::{message}

use crate::analyzer::compose::lint::LintResult;
use crate::analyzer::compose::types::Severity;

/// Format validation results for GitHub Actions.
pub fn format(results: &[LintResult]) -> String {
    let mut output = String::new();

    for result in results {
        for finding in result.findings() {
            let level = match finding.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let line = finding
                .line
                .map(|line| format!(",line={}", line))
                .unwrap_or_default();

            output.push_str(&format!(
                "::{} file={}{},title={}::{}\n",
                level,
                result.file_path,
                line,
                finding.code,
                escape_github(&finding.message)
            ));
        }
    }

    output
}

/// Escape special characters for GitHub Actions.
fn escape_github(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
