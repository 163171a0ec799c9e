//! CT006: extends-present
//!
//! Services are expected to inherit the shared base configuration.

use crate::analyzer::compose::rules::{Rule, RuleContext, SimpleRule, make_finding};
use crate::analyzer::compose::types::{Finding, Severity};

const CODE: &str = "CT006";
const NAME: &str = "extends-present";
const DESCRIPTION: &str = "Services should extend the shared common configuration.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Warning, DESCRIPTION, check)
}

fn check(ctx: &RuleContext) -> Vec<Finding> {
    if ctx.is_infrastructure() {
        return Vec::new();
    }

    ctx.document
        .services()
        .into_iter()
        .filter(|service| service.body.is_some() && service.get("extends").is_none())
        .map(|service| {
            let name = service.name();
            make_finding(
                CODE,
                NAME,
                Severity::Warning,
                format!(
                    "Service '{}' does not use extends (optional but recommended)",
                    name
                ),
                &["services", name.as_str()],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compose::rules::test_support::check_yaml;

    #[test]
    fn test_missing_extends_is_warning() {
        let yaml = r#"
services:
  web:
    image: nginx
  db:
    extends:
      file: ../common.yml
      service: common-config
    image: postgres
"#;
        let failures = check_yaml(check, yaml, "media/docker-compose.yml");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].severity, Severity::Warning);
        assert_eq!(
            failures[0].message,
            "Service 'web' does not use extends (optional but recommended)"
        );
    }

    #[test]
    fn test_infrastructure_document_skipped() {
        let yaml = "services:\n  traefik:\n    image: traefik\n";
        assert!(check_yaml(check, yaml, "infrastructure/docker-compose.yml").is_empty());
    }
}
