//! CT004: infrastructure-network-external
//!
//! Networks owned by the infrastructure stack must be declared at the root
//! with `external: true` wherever a service uses them.

use crate::analyzer::compose::networks::{
    describe_definition, infrastructure_networks_used, is_external,
};
use crate::analyzer::compose::parser::mapping_get;
use crate::analyzer::compose::rules::{Rule, RuleContext, SimpleRule, make_finding};
use crate::analyzer::compose::types::{Finding, Severity};

const CODE: &str = "CT004";
const NAME: &str = "infrastructure-network-external";
const DESCRIPTION: &str =
    "Infrastructure-managed networks used by services must be declared external at the root.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, Severity::Error, DESCRIPTION, check)
}

fn check(ctx: &RuleContext) -> Vec<Finding> {
    if ctx.is_infrastructure() {
        return Vec::new();
    }

    let root_networks = ctx.document.root_networks();
    let mut failures = Vec::new();

    for (network, users) in infrastructure_networks_used(&ctx.document, ctx.conventions) {
        let services = users
            .iter()
            .map(|s| format!("'{}'", s))
            .collect::<Vec<_>>()
            .join(", ");

        match root_networks.and_then(|networks| mapping_get(networks, &network)) {
            None => failures.push(make_finding(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Network '{}' is used by service {} but not defined as external (expected networks.{}.external: true)",
                    network, services, network
                ),
                &["networks", network.as_str()],
            )),
            Some(definition) if !is_external(definition) => failures.push(make_finding(
                CODE,
                NAME,
                Severity::Error,
                format!(
                    "Network '{}' is defined at root level with {} (expected external: true)",
                    network,
                    describe_definition(definition)
                ),
                &["networks", network.as_str()],
            )),
            Some(_) => {}
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compose::rules::test_support::check_yaml;

    #[test]
    fn test_missing_definition() {
        let yaml = r#"
services:
  app:
    networks:
      proxy:
networks: {}
"#;
        let failures = check_yaml(check, yaml, "media/docker-compose.yml");
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("'proxy'"));
        assert!(failures[0].message.contains("not defined as external"));
    }

    #[test]
    fn test_external_definition_passes() {
        let yaml = r#"
services:
  app:
    networks:
      proxy:
networks:
  proxy:
    external: true
"#;
        assert!(check_yaml(check, yaml, "media/docker-compose.yml").is_empty());
    }

    #[test]
    fn test_empty_and_false_definitions() {
        let yaml = r#"
services:
  app:
    networks:
      - proxy
      - vpn_net
networks:
  proxy:
  vpn_net:
    external: false
"#;
        let failures = check_yaml(check, yaml, "media/docker-compose.yml");
        assert_eq!(failures.len(), 2);
        assert!(failures[0].message.contains("'proxy'"));
        assert!(failures[0].message.contains("an empty definition"));
        assert!(failures[1].message.contains("external: false"));
    }

    #[test]
    fn test_missing_root_networks_key() {
        let yaml = r#"
services:
  app:
    networks: [socket_proxy]
  other:
    networks: [socket_proxy, backend]
"#;
        let failures = check_yaml(check, yaml, "media/docker-compose.yml");
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("service 'app', 'other'"));
    }

    #[test]
    fn test_infrastructure_document_skipped() {
        let yaml = r#"
services:
  traefik:
    networks:
      - proxy
networks:
  proxy:
    name: proxy
"#;
        assert!(check_yaml(check, yaml, "infrastructure/docker-compose.yml").is_empty());
    }
}
