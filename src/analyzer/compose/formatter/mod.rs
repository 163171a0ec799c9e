//! Output formatters for validation results.
//!
//! - Stylish - Grouped per file (default)
//! - Compact - Single line per finding
//! - JSON - Machine-readable JSON output
//! - GitHub - GitHub Actions annotations

pub mod github;
pub mod json;
pub mod stylish;

use crate::analyzer::compose::lint::LintResult;

/// Output format for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Stylish,
    Compact,
    Json,
    GitHub,
}

impl OutputFormat {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stylish" => Some(Self::Stylish),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            "github" | "github-actions" => Some(Self::GitHub),
            _ => None,
        }
    }
}

/// Format validation results according to the specified format.
pub fn format_results(results: &[LintResult], format: OutputFormat) -> String {
    match format {
        OutputFormat::Stylish => stylish::format(results),
        OutputFormat::Compact => format_compact(results),
        OutputFormat::Json => json::format(results),
        OutputFormat::GitHub => github::format(results),
    }
}

/// Compact format (one line per finding).
fn format_compact(results: &[LintResult]) -> String {
    let mut output = String::new();

    for result in results {
        for finding in result.findings() {
            output.push_str(&format!(
                "{}:{}: {} [{}] {}\n",
                result.file_path,
                finding.line.unwrap_or(1),
                finding.severity,
                finding.code,
                finding.message
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compose::types::{Finding, Severity};

    #[test]
    fn test_compact_format() {
        let mut result = LintResult::new("media/docker-compose.yml");
        result.push(
            Finding::new("CT003", "service-keys-order", Severity::Error, "Test message")
                .with_line(5),
        );
        result.push(Finding::new(
            "CT006",
            "extends-present",
            Severity::Warning,
            "Other message",
        ));

        let output = format_compact(&[result]);
        assert_eq!(
            output,
            "media/docker-compose.yml:5: error [CT003] Test message\nmedia/docker-compose.yml:1: warning [CT006] Other message\n"
        );
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("compact"), Some(OutputFormat::Compact));
        assert_eq!(
            OutputFormat::parse("github-actions"),
            Some(OutputFormat::GitHub)
        );
        assert_eq!(OutputFormat::parse("junit"), None);
    }
}
