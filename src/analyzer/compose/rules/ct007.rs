//! CT007: extends-target
//!
//! `extends` must point at the shared base service in the shared file.

use yaml_rust2::Yaml;

use crate::analyzer::compose::parser::{kind_name, mapping_get, scalar_text};
use crate::analyzer::compose::rules::{Rule, RuleContext, SimpleRule, make_finding};
use crate::analyzer::compose::types::{Finding, Severity};

const CODE: &str = "CT007";
const NAME: &str = "extends-target";
const DESCRIPTION: &str = "Services should extend common-config from ../common.yml.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn describe(value: Option<&Yaml>) -> String {
    match value {
        None => "<missing>".to_string(),
        Some(v) => scalar_text(v)
            .map(|s| format!("'{}'", s))
            .unwrap_or_else(|| format!("<{}>", kind_name(v))),
    }
}

fn check(ctx: &RuleContext) -> Vec<Finding> {
    if ctx.is_infrastructure() {
        return Vec::new();
    }

    let expected_file = ctx.conventions.extends_file.as_str();
    let expected_service = ctx.conventions.extends_service.as_str();
    let mut failures = Vec::new();

    for service in ctx.document.services() {
        let Some(Yaml::Hash(extends)) = service.get("extends") else {
            continue;
        };
        let name = service.name();

        let file = mapping_get(extends, "file");
        if file.and_then(Yaml::as_str) != Some(expected_file) {
            failures.push(make_finding(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Service '{}' extends wrong file: {} (expected '{}')",
                    name,
                    describe(file),
                    expected_file
                ),
                &["services", name.as_str(), "extends", "file"],
            ));
        }

        let base = mapping_get(extends, "service");
        if base.and_then(Yaml::as_str) != Some(expected_service) {
            failures.push(make_finding(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Service '{}' extends wrong service: {} (expected '{}')",
                    name,
                    describe(base),
                    expected_service
                ),
                &["services", name.as_str(), "extends", "service"],
            ));
        }
    }

    failures
}
