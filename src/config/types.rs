use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::analyzer::compose::config::{ComposeConfig, Conventions};
use crate::analyzer::compose::policy::{Catalog, OrderPolicy};
use crate::analyzer::compose::types::ConfigLevel;
use crate::error::{Result, TidyError};

/// Main configuration structure, as read from `.compose-tidy.toml`.
///
/// Every section and field is optional; anything left out keeps the built-in
/// default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ordering: OrderingConfig,
    pub networks: NetworksConfig,
    pub extends: ExtendsConfig,
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
    /// Rule code or name to `off`, `warn` or `error` (or 0, 1, 2).
    pub rules: BTreeMap<String, toml::Value>,
}

/// Key catalogs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    pub root: Option<Vec<String>>,
    pub service: Option<Vec<String>>,
}

/// Network conventions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworksConfig {
    pub infrastructure: Option<Vec<String>>,
    /// Path fragment that marks the infrastructure-defining document.
    pub infrastructure_marker: Option<String>,
    pub default_network: Option<String>,
}

/// Extends conventions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendsConfig {
    pub file: Option<String>,
    pub service: Option<String>,
}

/// Discovery configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub file_name: Option<String>,
    pub exclude: Vec<String>,
}

/// Emitter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub indent: Option<usize>,
    pub line_width: Option<usize>,
}

fn parse_level(rule: &str, value: &toml::Value) -> Result<ConfigLevel> {
    let level = match value {
        toml::Value::String(s) => ConfigLevel::parse(s),
        toml::Value::Integer(i) => ConfigLevel::parse(&i.to_string()),
        _ => None,
    };
    level.ok_or_else(|| {
        TidyError::Config(format!(
            "rule '{}' has invalid level {} (expected off, warn or error)",
            rule, value
        ))
    })
}

impl Config {
    /// Build the runtime configuration, validating rule levels and catalogs.
    pub fn to_compose_config(&self) -> Result<ComposeConfig> {
        let mut config = ComposeConfig::default();

        let defaults = OrderPolicy::default();
        let root = match &self.ordering.root {
            Some(keys) => Catalog::new(keys.iter().cloned()),
            None => defaults.root,
        };
        let service = match &self.ordering.service {
            Some(keys) => Catalog::new(keys.iter().cloned()),
            None => defaults.service,
        };
        if root.is_empty() || service.is_empty() {
            return Err(TidyError::Config(
                "ordering catalogs must not be empty".to_string(),
            ));
        }
        config.policy = OrderPolicy::new(root, service);

        let defaults = Conventions::default();
        config.conventions = Conventions {
            infrastructure_networks: match &self.networks.infrastructure {
                Some(names) => names.iter().cloned().collect::<BTreeSet<_>>(),
                None => defaults.infrastructure_networks,
            },
            infrastructure_marker: self
                .networks
                .infrastructure_marker
                .clone()
                .unwrap_or(defaults.infrastructure_marker),
            default_network: self
                .networks
                .default_network
                .clone()
                .unwrap_or(defaults.default_network),
            extends_file: self.extends.file.clone().unwrap_or(defaults.extends_file),
            extends_service: self
                .extends
                .service
                .clone()
                .unwrap_or(defaults.extends_service),
        };

        if let Some(file_name) = &self.discovery.file_name {
            config.file_name = file_name.clone();
        }
        config.exclude = self.discovery.exclude.clone();

        if let Some(indent) = self.output.indent {
            if indent == 0 {
                return Err(TidyError::Config("output.indent must be at least 1".to_string()));
            }
            config.emit.indent = indent;
        }
        if let Some(line_width) = self.output.line_width {
            config.emit.line_width = line_width;
        }

        for (rule, value) in &self.rules {
            config.rules.insert(rule.clone(), parse_level(rule, value)?);
        }

        Ok(config)
    }
}
