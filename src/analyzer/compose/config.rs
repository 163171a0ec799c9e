//! Runtime configuration for validating and rewriting compose documents.
//!
//! Catalogs and conventions are plain values handed to the validator and the
//! rewriter, so alternate catalogs can be substituted without global state:
//! - Order policy (root and service catalogs)
//! - Network and extends conventions
//! - Rule-level configuration (off/warn/error)
//! - Discovery and emitter settings

use std::collections::{BTreeSet, HashMap};

use crate::analyzer::compose::policy::OrderPolicy;
use crate::analyzer::compose::rewrite::EmitOptions;
use crate::analyzer::compose::types::{ConfigLevel, RuleCode, Severity};

/// Networks owned by the infrastructure stack.
pub const INFRASTRUCTURE_NETWORKS: &[&str] = &["proxy", "media_int", "vpn_net", "socket_proxy"];

/// Path fragment identifying the infrastructure-defining document.
pub const INFRASTRUCTURE_MARKER: &str = "infrastructure";

pub const DEFAULT_NETWORK: &str = "default";
pub const EXTENDS_FILE: &str = "../common.yml";
pub const EXTENDS_SERVICE: &str = "common-config";
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// Cross-document conventions checked by the network and extends rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    pub infrastructure_networks: BTreeSet<String>,
    pub infrastructure_marker: String,
    pub default_network: String,
    pub extends_file: String,
    pub extends_service: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            infrastructure_networks: INFRASTRUCTURE_NETWORKS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            infrastructure_marker: INFRASTRUCTURE_MARKER.to_string(),
            default_network: DEFAULT_NETWORK.to_string(),
            extends_file: EXTENDS_FILE.to_string(),
            extends_service: EXTENDS_SERVICE.to_string(),
        }
    }
}

impl Conventions {
    /// Whether `path` names the infrastructure-defining document.
    pub fn is_infrastructure_path(&self, path: &str) -> bool {
        !self.infrastructure_marker.is_empty() && path.contains(&self.infrastructure_marker)
    }

    pub fn is_infrastructure_network(&self, name: &str) -> bool {
        self.infrastructure_networks.contains(name)
    }
}

/// Main configuration for the compose tooling.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    pub policy: OrderPolicy,
    pub conventions: Conventions,
    /// Per-rule levels, keyed by rule code or rule name.
    pub rules: HashMap<String, ConfigLevel>,
    /// File patterns to exclude from discovery.
    pub exclude: Vec<String>,
    /// Base name of the files discovery picks up.
    pub file_name: String,
    pub emit: EmitOptions,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            policy: OrderPolicy::default(),
            conventions: Conventions::default(),
            rules: HashMap::new(),
            exclude: Vec::new(),
            file_name: COMPOSE_FILE_NAME.to_string(),
            emit: EmitOptions::default(),
        }
    }
}

impl ComposeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: OrderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Configure a rule by code or name.
    pub fn with_rule(mut self, rule: impl Into<String>, level: ConfigLevel) -> Self {
        self.rules.insert(rule.into(), level);
        self
    }

    /// Disable a rule.
    pub fn ignore(self, rule: impl Into<String>) -> Self {
        self.with_rule(rule, ConfigLevel::Off)
    }

    fn rule_level(&self, code: &RuleCode, name: &str) -> Option<ConfigLevel> {
        self.rules
            .get(code.as_str())
            .or_else(|| self.rules.get(name))
            .copied()
    }

    /// Check if a rule is switched off.
    pub fn is_rule_ignored(&self, code: &RuleCode, name: &str) -> bool {
        self.rule_level(code, name) == Some(ConfigLevel::Off)
    }

    /// Get the effective severity for a rule, applying any override.
    pub fn effective_severity(&self, code: &RuleCode, name: &str, default: Severity) -> Severity {
        self.rule_level(code, name)
            .and_then(|level| level.to_severity())
            .unwrap_or(default)
    }

    /// Check if a file path should be excluded.
    pub fn is_excluded(&self, path: &str) -> bool {
        for pattern in &self.exclude {
            // Simple glob matching
            if pattern.contains('*') {
                let pattern_regex = regex::escape(pattern).replace("\\*", ".*");
                if let Ok(re) = regex::Regex::new(&format!("^{}$", pattern_regex))
                    && re.is_match(path)
                {
                    return true;
                }
            } else if path.contains(pattern.as_str()) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ComposeConfig::default();
        assert!(config.rules.is_empty());
        assert!(config.exclude.is_empty());
        assert_eq!(config.file_name, "docker-compose.yml");
        assert_eq!(config.conventions.infrastructure_networks.len(), 4);
        assert!(config.conventions.is_infrastructure_network("socket_proxy"));
        assert!(!config.conventions.is_infrastructure_network("backend"));
    }

    #[test]
    fn test_infrastructure_path() {
        let conventions = Conventions::default();
        assert!(conventions.is_infrastructure_path("stacks/infrastructure/docker-compose.yml"));
        assert!(!conventions.is_infrastructure_path("stacks/media/docker-compose.yml"));

        let disabled = Conventions {
            infrastructure_marker: String::new(),
            ..Conventions::default()
        };
        assert!(!disabled.is_infrastructure_path("infrastructure/docker-compose.yml"));
    }

    #[test]
    fn test_rule_levels_by_code_or_name() {
        let config = ComposeConfig::default()
            .ignore("CT006")
            .with_rule("extends-target", ConfigLevel::Warn);

        assert!(config.is_rule_ignored(&RuleCode::new("CT006"), "extends-present"));
        assert!(!config.is_rule_ignored(&RuleCode::new("CT007"), "extends-target"));
        assert_eq!(
            config.effective_severity(&RuleCode::new("CT007"), "extends-target", Severity::Error),
            Severity::Warning
        );
        assert_eq!(
            config.effective_severity(&RuleCode::new("CT001"), "root-keys-order", Severity::Error),
            Severity::Error
        );
    }

    #[test]
    fn test_exclude_patterns() {
        let config = ComposeConfig::default()
            .with_exclude("archive")
            .with_exclude("*/old/*.yml");

        assert!(config.is_excluded("stacks/archive/docker-compose.yml"));
        assert!(config.is_excluded("stacks/old/docker-compose.yml"));
        assert!(!config.is_excluded("stacks/media/docker-compose.yml"));
    }
}
