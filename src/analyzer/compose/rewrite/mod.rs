//! Canonicalizing rewriter.
//!
//! `rewrite` builds a reordered copy of a compose tree plus the formatting
//! hints the emitter needs; `emit` turns the pair back into YAML text. The
//! input tree is never mutated.

pub mod emitter;
pub mod hints;

pub use emitter::{EmitOptions, emit};
pub use hints::{FormatHints, NodeStyle, PathSegment};

use yaml_rust2::Yaml;
use yaml_rust2::yaml::Hash;

use crate::analyzer::compose::parser::key_name;
use crate::analyzer::compose::policy::{Catalog, OrderPolicy};

/// A reordered document together with its formatting hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten {
    pub document: Yaml,
    pub hints: FormatHints,
}

/// Reorder a compose document into canonical order.
///
/// Root keys follow the root catalog, services are sorted by name and each
/// service block follows the service catalog. Nothing deeper is reordered.
/// A root that is not a mapping is returned as-is.
pub fn rewrite(document: &Yaml, policy: &OrderPolicy) -> Rewritten {
    let document = match document {
        Yaml::Hash(root) => Yaml::Hash(reorder_root(root, policy)),
        other => other.clone(),
    };
    let hints = FormatHints::annotate(&document);
    Rewritten { document, hints }
}

fn reorder_root(root: &Hash, policy: &OrderPolicy) -> Hash {
    sorted_by_catalog(root, &policy.root)
        .into_iter()
        .map(|(key, value)| {
            let value = match (key_name(key).as_str(), value) {
                ("services", Yaml::Hash(services)) => {
                    Yaml::Hash(reorder_services(services, policy))
                }
                _ => value.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

fn reorder_services(services: &Hash, policy: &OrderPolicy) -> Hash {
    let mut entries: Vec<(&Yaml, &Yaml)> = services.iter().collect();
    entries.sort_by_key(|(name, _)| key_name(name));

    entries
        .into_iter()
        .map(|(name, body)| {
            let body = match body {
                Yaml::Hash(block) => Yaml::Hash(
                    sorted_by_catalog(block, &policy.service)
                        .into_iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                ),
                other => other.clone(),
            };
            (name.clone(), body)
        })
        .collect()
}

/// Entries of `map` stably sorted by catalog rank.
fn sorted_by_catalog<'a>(map: &'a Hash, catalog: &Catalog) -> Vec<(&'a Yaml, &'a Yaml)> {
    let mut entries: Vec<(&Yaml, &Yaml)> = map.iter().collect();
    entries.sort_by_key(|(key, _)| catalog.rank(&key_name(key)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compose::parser::{mapping_get, mapping_keys, parse_yaml};

    fn reorder(yaml: &str) -> Yaml {
        rewrite(&parse_yaml(yaml).unwrap(), &OrderPolicy::default()).document
    }

    fn keys_at<'a>(doc: &'a Yaml, path: &[&str]) -> Vec<String> {
        let mut node = doc;
        for key in path {
            let Yaml::Hash(map) = node else {
                panic!("not a mapping at {}", key)
            };
            node = mapping_get(map, key).unwrap();
        }
        match node {
            Yaml::Hash(map) => mapping_keys(map),
            other => panic!("not a mapping: {:?}", other),
        }
    }

    #[test]
    fn test_root_and_service_order() {
        let doc = reorder(
            r#"
x-anchors:
  a: 1
volumes:
  data:
services:
  web:
    restart: always
    environment:
      B: 2
      A: 1
    image: nginx
    x-custom: 1
    container_name: web
  api:
    image: api
networks:
  proxy:
    external: true
"#,
        );
        assert_eq!(
            keys_at(&doc, &[]),
            vec!["services", "networks", "volumes", "x-anchors"]
        );
        assert_eq!(keys_at(&doc, &["services"]), vec!["api", "web"]);
        assert_eq!(
            keys_at(&doc, &["services", "web"]),
            vec!["image", "container_name", "environment", "restart", "x-custom"]
        );
        assert_eq!(keys_at(&doc, &["services", "web", "environment"]), vec!["B", "A"]);
    }

    #[test]
    fn test_unknown_keys_keep_relative_order() {
        let doc = reorder("zeta: 1\nservices: {}\nalpha: 2\nmiddle: 3\n");
        assert_eq!(keys_at(&doc, &[]), vec!["services", "zeta", "alpha", "middle"]);
    }

    #[test]
    fn test_non_mapping_values_untouched() {
        let doc = reorder("services:\n  web:\n  db: postgres\n");
        assert_eq!(keys_at(&doc, &["services"]), vec!["db", "web"]);

        let seq = parse_yaml("- b\n- a\n").unwrap();
        assert_eq!(rewrite(&seq, &OrderPolicy::default()).document, seq);
    }

    #[test]
    fn test_input_not_mutated() {
        let input = parse_yaml("volumes: {}\nservices: {}\n").unwrap();
        let before = input.clone();
        let _ = rewrite(&input, &OrderPolicy::default());
        assert_eq!(input, before);
    }
}
