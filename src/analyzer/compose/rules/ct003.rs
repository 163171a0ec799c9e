//! CT003: service-keys-order
//!
//! Service keys should follow the service catalog. Only the first divergence
//! per service is reported: one misplaced key shifts every key after it.

use crate::analyzer::compose::policy::first_divergence;
use crate::analyzer::compose::rules::{Rule, RuleContext, SimpleRule, make_finding};
use crate::analyzer::compose::types::{Finding, Severity};

const CODE: &str = "CT003";
const NAME: &str = "service-keys-order";
const DESCRIPTION: &str = "Service keys should follow the standard ordering convention.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

pub(crate) fn check(ctx: &RuleContext) -> Vec<Finding> {
    let mut failures = Vec::new();

    for service in ctx.document.services() {
        let keys = service.keys();
        let expected = ctx.policy.sort_service(&keys);

        if let Some((_, actual_key, expected_key)) = first_divergence(&keys, &expected) {
            let name = service.name();
            let message = format!(
                "Service '{}': key '{}' should come after '{}'",
                name, actual_key, expected_key
            );
            failures.push(make_finding(
                CODE,
                NAME,
                Severity::Error,
                message,
                &["services", name.as_str(), actual_key],
            ));
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compose::rules::test_support::check_yaml;

    #[test]
    fn test_no_violation_correct_order() {
        let yaml = r#"
services:
  web:
    extends:
      file: ../common.yml
      service: common-config
    image: nginx
    container_name: web
    ports:
      - "80:80"
    labels:
      - traefik.enable=true
    stdin_open: true
"#;
        assert!(check_yaml(check, yaml, "docker-compose.yml").is_empty());
    }

    #[test]
    fn test_reports_first_divergence_only() {
        let yaml = r#"
services:
  web:
    restart: always
    labels:
      - a=b
    image: nginx
    environment:
      - DEBUG=1
"#;
        let failures = check_yaml(check, yaml, "docker-compose.yml");
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].message,
            "Service 'web': key 'restart' should come after 'image'"
        );
        assert_eq!(failures[0].key_path, vec!["services", "web", "restart"]);
    }

    #[test]
    fn test_one_finding_per_service() {
        let yaml = r#"
services:
  web:
    image: nginx
    extends:
      service: common-config
  db:
    ports:
      - "5432:5432"
    image: postgres
  cache:
    image: redis
"#;
        let failures = check_yaml(check, yaml, "docker-compose.yml");
        assert_eq!(failures.len(), 2);
        assert!(failures[0].message.starts_with("Service 'web'"));
        assert!(failures[1].message.starts_with("Service 'db'"));
    }

    #[test]
    fn test_unknown_keys_keep_relative_order() {
        let yaml = r#"
services:
  web:
    image: nginx
    tty: true
    stdin_open: true
"#;
        assert!(check_yaml(check, yaml, "docker-compose.yml").is_empty());
    }

    #[test]
    fn test_non_mapping_service_skipped() {
        let yaml = "services:\n  web:\n  db: postgres\n";
        assert!(check_yaml(check, yaml, "docker-compose.yml").is_empty());
    }
}
