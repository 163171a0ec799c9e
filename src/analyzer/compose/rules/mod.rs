//! Rule system for the structural validator.
//!
//! Every sub-check is a `Rule`: a pure function from a `RuleContext` to a list
//! of findings. Rules never see each other's output and never mutate the tree.

use crate::analyzer::compose::config::{ComposeConfig, Conventions};
use crate::analyzer::compose::parser::Document;
use crate::analyzer::compose::policy::OrderPolicy;
use crate::analyzer::compose::types::{Finding, RuleCode, Severity};

pub mod ct001;
pub mod ct002;
pub mod ct003;
pub mod ct004;
pub mod ct005;
pub mod ct006;
pub mod ct007;

/// Context for checking one compose document.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub document: Document<'a>,
    /// The file path, used for infrastructure detection.
    pub path: &'a str,
    pub policy: &'a OrderPolicy,
    pub conventions: &'a Conventions,
}

impl<'a> RuleContext<'a> {
    pub fn new(document: Document<'a>, path: &'a str, config: &'a ComposeConfig) -> Self {
        Self {
            document,
            path,
            policy: &config.policy,
            conventions: &config.conventions,
        }
    }

    /// Whether this document is the infrastructure-defining one.
    pub fn is_infrastructure(&self) -> bool {
        self.conventions.is_infrastructure_path(self.path)
    }
}

/// A check over a compose document.
pub trait Rule: Send + Sync {
    /// Get the rule code (e.g., "CT001").
    fn code(&self) -> &RuleCode;

    /// Get the human-readable rule name (e.g., "root-keys-order").
    fn name(&self) -> &str;

    /// Get the default severity.
    fn severity(&self) -> Severity;

    fn description(&self) -> &str;

    /// Check the document and return any findings.
    fn check(&self, context: &RuleContext) -> Vec<Finding>;
}

/// A rule backed by a plain check function.
pub struct SimpleRule<F>
where
    F: Fn(&RuleContext) -> Vec<Finding> + Send + Sync,
{
    code: RuleCode,
    name: String,
    severity: Severity,
    description: String,
    check_fn: F,
}

impl<F> SimpleRule<F>
where
    F: Fn(&RuleContext) -> Vec<Finding> + Send + Sync,
{
    pub fn new(
        code: impl Into<RuleCode>,
        name: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        check_fn: F,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            severity,
            description: description.into(),
            check_fn,
        }
    }
}

impl<F> Rule for SimpleRule<F>
where
    F: Fn(&RuleContext) -> Vec<Finding> + Send + Sync,
{
    fn code(&self) -> &RuleCode {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        (self.check_fn)(context)
    }
}

/// Helper to create a finding for a rule.
pub fn make_finding<S: AsRef<str>>(
    code: &str,
    name: &str,
    severity: Severity,
    message: impl Into<String>,
    key_path: &[S],
) -> Finding {
    Finding::new(code, name, severity, message).at(key_path)
}

/// All rules, in reporting order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ct001::rule()),
        Box::new(ct002::rule()),
        Box::new(ct003::rule()),
        Box::new(ct004::rule()),
        Box::new(ct005::rule()),
        Box::new(ct006::rule()),
        Box::new(ct007::rule()),
    ]
}

/// Rule definition for documentation/introspection.
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    pub code: RuleCode,
    pub name: String,
    pub severity: Severity,
    pub description: String,
}

pub fn rule_definitions() -> Vec<RuleDefinition> {
    all_rules()
        .iter()
        .map(|r| RuleDefinition {
            code: r.code().clone(),
            name: r.name().to_string(),
            severity: r.severity(),
            description: r.description().to_string(),
        })
        .collect()
}
