//! Validation orchestration.
//!
//! Ties together parsing and the rule set: `validate` checks an already
//! parsed tree, `validate_source` parses first and resolves line numbers,
//! `validate_file` reads the file first.

use std::path::Path;

use yaml_rust2::Yaml;

use crate::analyzer::compose::config::ComposeConfig;
use crate::analyzer::compose::parser::{Document, ParseError, find_line_for_path, parse_yaml};
use crate::analyzer::compose::rules::{RuleContext, all_rules};
use crate::analyzer::compose::types::{Finding, Severity};

/// Code used for findings that do not come from a rule.
pub const DOCUMENT_CODE: &str = "CT000";

/// Result of validating one compose document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintResult {
    /// The file path that was validated.
    pub file_path: String,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl LintResult {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// File a finding under errors or warnings by its severity.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    /// All findings, errors first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_findings(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Findings produced by the rule with this name.
    pub fn by_rule<'a>(&'a self, rule_name: &'a str) -> impl Iterator<Item = &'a Finding> {
        self.findings().filter(move |f| f.rule_name == rule_name)
    }
}

fn document_error(message: impl Into<String>) -> Finding {
    Finding::new(DOCUMENT_CODE, "invalid-document", Severity::Error, message)
}

/// Validate a parsed document.
///
/// A null document yields a single `empty file` warning and a non-mapping
/// root a single error; otherwise every enabled rule runs and its findings
/// are filed at the configured level.
pub fn validate(document: &Yaml, path: &str, config: &ComposeConfig) -> LintResult {
    let mut result = LintResult::new(path);

    let document = match Document::from_yaml(document) {
        Ok(document) => document,
        Err(ParseError::EmptyDocument) => {
            result.push(Finding::new(
                DOCUMENT_CODE,
                "empty-file",
                Severity::Warning,
                "empty file",
            ));
            return result;
        }
        Err(err) => {
            result.push(document_error(err.to_string()));
            return result;
        }
    };

    let ctx = RuleContext::new(document, path, config);

    for rule in all_rules() {
        if config.is_rule_ignored(rule.code(), rule.name()) {
            log::trace!("Skipping disabled rule {}", rule.code());
            continue;
        }
        let severity = config.effective_severity(rule.code(), rule.name(), rule.severity());
        for mut finding in rule.check(&ctx) {
            finding.severity = severity;
            result.push(finding);
        }
    }

    result
}

/// Parse and validate source text, attaching line numbers to findings.
pub fn validate_source(content: &str, path: &str, config: &ComposeConfig) -> LintResult {
    let root = match parse_yaml(content) {
        Ok(root) => root,
        Err(ParseError::EmptyDocument) => Yaml::Null,
        Err(err) => {
            let mut result = LintResult::new(path);
            result.push(document_error(err.to_string()));
            return result;
        }
    };

    let mut result = validate(&root, path, config);
    for finding in result.errors.iter_mut().chain(result.warnings.iter_mut()) {
        if finding.line.is_none()
            && !finding.key_path.is_empty()
            && let Some(line) = find_line_for_path(content, &finding.key_path)
        {
            finding.line = Some(line);
        }
    }
    result
}

/// Read and validate a file. A read failure is reported as a single error.
pub fn validate_file(path: &Path, config: &ComposeConfig) -> LintResult {
    let path_str = path.display().to_string();
    log::debug!("Validating {}", path_str);

    match std::fs::read_to_string(path) {
        Ok(content) => validate_source(&content, &path_str, config),
        Err(err) => {
            log::warn!("Could not read {}: {}", path_str, err);
            let mut result = LintResult::new(path_str);
            result.push(document_error(format!("Failed to read file: {}", err)));
            result
        }
    }
}
