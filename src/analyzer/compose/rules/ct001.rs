//! CT001: root-keys-order
//!
//! Root keys should follow the root catalog, unknown keys last.

use crate::analyzer::compose::rules::{Rule, RuleContext, SimpleRule, make_finding};
use crate::analyzer::compose::types::{Finding, Severity};

const CODE: &str = "CT001";
const NAME: &str = "root-keys-order";
const DESCRIPTION: &str = "Root keys should be ordered services, networks, configs, volumes, secrets, then any other key.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &RuleContext) -> Vec<Finding> {
    let actual = ctx.document.root_keys();
    let expected = ctx.policy.sort_root(&actual);

    if actual == expected {
        return Vec::new();
    }

    let message = format!(
        "Root keys order incorrect: [{}] should be [{}]",
        actual.join(", "),
        expected.join(", ")
    );
    let first = actual.first().cloned().unwrap_or_default();

    vec![make_finding(CODE, NAME, Severity::Error, message, &[first])]
}
