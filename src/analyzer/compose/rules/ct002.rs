//! CT002: services-first
//!
//! `services` must be the first root key.

use crate::analyzer::compose::rules::{Rule, RuleContext, SimpleRule, make_finding};
use crate::analyzer::compose::types::{Finding, Severity};

const CODE: &str = "CT002";
const NAME: &str = "services-first";
const DESCRIPTION: &str = "The services key should be the first root key.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &RuleContext) -> Vec<Finding> {
    let keys = ctx.document.root_keys();

    match keys.first() {
        Some(first) if first != "services" => vec![make_finding(
            CODE,
            NAME,
            Severity::Error,
            format!("First root key should be 'services', got '{}'", first),
            &[first],
        )],
        _ => Vec::new(),
    }
}
