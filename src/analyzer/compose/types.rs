//! Core types for the compose validator.
//!
//! - `Severity` - Finding severity (error or warning)
//! - `RuleCode` - Rule identifiers (e.g., "CT001")
//! - `Finding` - A single classified finding
//! - `ConfigLevel` - Per-rule level from the configuration file

use std::cmp::Ordering;
use std::fmt;

/// Severity of a finding.
///
/// Only errors affect the exit status; warnings flag optional conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Canonical-order or cross-reference convention violation
    Error,
    /// Optional convention deviation
    Warning,
}

impl Severity {
    /// Parse a severity from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        let rank = |s: &Severity| match s {
            Severity::Error => 1,
            Severity::Warning => 0,
        };
        rank(self).cmp(&rank(other))
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A rule code identifier (e.g., "CT001").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleCode(pub String);

impl RuleCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A finding produced by one rule for one document.
///
/// Findings are terminal output: they describe what is wrong, with both the
/// actual and the expected value, but carry nothing a fixer could replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The rule that produced this finding.
    pub code: RuleCode,
    /// The human-readable rule name (e.g., "service-keys-order").
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    /// Key path the finding concerns, from the document root.
    pub key_path: Vec<String>,
    /// 1-indexed line, resolved from the source text when available.
    pub line: Option<u32>,
}

impl Finding {
    pub fn new(
        code: impl Into<RuleCode>,
        rule_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule_name: rule_name.into(),
            severity,
            message: message.into(),
            key_path: Vec::new(),
            line: None,
        }
    }

    /// Attach the key path this finding points at.
    pub fn at<S: AsRef<str>>(mut self, path: &[S]) -> Self {
        self.key_path = path.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.as_str().to_uppercase(), self.message)
    }
}

/// Configuration level for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    Off,
    Warn,
    Error,
}

impl ConfigLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Some(Self::Off),
            "warn" | "warning" | "1" => Some(Self::Warn),
            "error" | "2" => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to severity (for non-off levels).
    pub fn to_severity(&self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}
