//! CT005: service-network-known
//!
//! Mapping-form network references may only name infrastructure-managed
//! networks or the default network.

use crate::analyzer::compose::parser::RefForm;
use crate::analyzer::compose::rules::{Rule, RuleContext, SimpleRule, make_finding};
use crate::analyzer::compose::types::{Finding, Severity};

const CODE: &str = "CT005";
const NAME: &str = "service-network-known";
const DESCRIPTION: &str =
    "Services should only attach to infrastructure-managed networks or the default network.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &RuleContext) -> Vec<Finding> {
    if ctx.is_infrastructure() {
        return Vec::new();
    }

    let mut allowed: Vec<&str> = ctx
        .conventions
        .infrastructure_networks
        .iter()
        .map(String::as_str)
        .collect();
    allowed.push(ctx.conventions.default_network.as_str());

    let mut failures = Vec::new();

    for service in ctx.document.services() {
        let service_name = service.name();
        for reference in service.network_refs() {
            if reference.form != RefForm::Mapping || allowed.contains(&reference.name.as_str()) {
                continue;
            }
            failures.push(make_finding(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Service '{}' uses unknown network '{}' (expected one of: {})",
                    service_name,
                    reference.name,
                    allowed.join(", ")
                ),
                &["services", service_name.as_str(), "networks", reference.name.as_str()],
            ));
        }
    }

    failures
}
