//! JSON output formatter.

use serde_json::json;

use crate::analyzer::compose::lint::LintResult;
use crate::analyzer::compose::types::Finding;

fn finding_json(f: &Finding) -> serde_json::Value {
    json!({
        "ruleId": f.code.as_str(),
        "ruleName": f.rule_name,
        "severity": f.severity.as_str(),
        "message": f.message,
        "line": f.line,
        "keyPath": f.key_path,
    })
}

/// Format validation results as JSON.
pub fn format(results: &[LintResult]) -> String {
    let output: Vec<serde_json::Value> = results
        .iter()
        .map(|result| {
            json!({
                "filePath": result.file_path,
                "errors": result.errors.iter().map(finding_json).collect::<Vec<_>>(),
                "warnings": result.warnings.iter().map(finding_json).collect::<Vec<_>>(),
                "errorCount": result.error_count(),
                "warningCount": result.warning_count(),
            })
        })
        .collect();

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string())
}
