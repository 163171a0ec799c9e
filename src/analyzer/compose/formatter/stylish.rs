//! Stylish output: findings grouped under a header per file.

use crate::analyzer::compose::lint::LintResult;

/// Format validation results in stylish format.
pub fn format(results: &[LintResult]) -> String {
    let mut output = String::new();
    let mut total_errors = 0;
    let mut total_warnings = 0;

    for result in results {
        if !result.has_findings() {
            continue;
        }

        output.push_str(&format!("\n{}\n", result.file_path));

        for finding in result.findings() {
            let location = finding
                .line
                .map(|line| format!("{:>4}", line))
                .unwrap_or_else(|| "    ".to_string());
            output.push_str(&format!(
                "  {}  {:<7}  {}  {}\n",
                location,
                finding.severity.as_str(),
                finding.message,
                finding.code
            ));
        }

        total_errors += result.error_count();
        total_warnings += result.warning_count();
    }

    if total_errors > 0 || total_warnings > 0 {
        output.push('\n');

        let mut parts = Vec::new();
        if total_errors > 0 {
            parts.push(format!(
                "{} {}",
                total_errors,
                if total_errors == 1 { "error" } else { "errors" }
            ));
        }
        if total_warnings > 0 {
            parts.push(format!(
                "{} {}",
                total_warnings,
                if total_warnings == 1 {
                    "warning"
                } else {
                    "warnings"
                }
            ));
        }

        output.push_str(&format!(
            "  {} problem{}\n",
            parts.join(" and "),
            if total_errors + total_warnings == 1 {
                ""
            } else {
                "s"
            }
        ));
    }

    output
}
