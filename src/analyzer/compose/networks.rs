//! Infrastructure network declarations.
//!
//! Shared by the validator (CT004) and the network definition fixer, so both
//! apply the same criterion: a root definition counts as external only when
//! it is a mapping with `external: true`. An empty definition, a missing
//! `external` key and `external: false` are all violations.

use std::collections::BTreeMap;
use std::path::Path;

use yaml_rust2::Yaml;
use yaml_rust2::yaml::Hash;

use crate::analyzer::compose::config::{ComposeConfig, Conventions};
use crate::analyzer::compose::fix::write_document;
use crate::analyzer::compose::parser::{
    Document, ParseError, key_name, kind_name, mapping_get, parse_yaml, string_key,
};
use crate::analyzer::compose::policy::OrderPolicy;
use crate::analyzer::compose::rewrite::{FormatHints, Rewritten, emit};
use crate::error::{Result, TidyError};

/// What the fixer did to one network definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkChange {
    /// No root definition existed.
    Added(String),
    /// A definition existed without `external: true`.
    MadeExternal(String),
}

impl NetworkChange {
    pub fn network(&self) -> &str {
        match self {
            Self::Added(name) | Self::MadeExternal(name) => name,
        }
    }
}

/// Result of `ensure_external_networks`.
#[derive(Debug, Clone)]
pub struct NetworkFix {
    pub document: Yaml,
    pub changes: Vec<NetworkChange>,
}

impl NetworkFix {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Whether a root network definition declares `external: true`.
pub fn is_external(definition: &Yaml) -> bool {
    match definition {
        Yaml::Hash(map) => matches!(mapping_get(map, "external"), Some(Yaml::Boolean(true))),
        _ => false,
    }
}

/// Short description of a non-external definition, for messages.
pub fn describe_definition(definition: &Yaml) -> String {
    match definition {
        Yaml::Null => "an empty definition".to_string(),
        Yaml::Hash(map) => match mapping_get(map, "external") {
            None => "no external key".to_string(),
            Some(Yaml::Boolean(b)) => format!("external: {}", b),
            Some(other) => format!("external: {}", key_name(other)),
        },
        other => format!("a {} definition", kind_name(other)),
    }
}

/// Infrastructure-managed networks referenced by services, each with the
/// services referencing it (sorted by network name).
pub fn infrastructure_networks_used(
    document: &Document,
    conventions: &Conventions,
) -> BTreeMap<String, Vec<String>> {
    let mut used: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for service in document.services() {
        let service_name = service.name();
        for reference in service.network_refs() {
            if !conventions.is_infrastructure_network(&reference.name) {
                continue;
            }
            let users = used.entry(reference.name).or_default();
            if !users.contains(&service_name) {
                users.push(service_name.clone());
            }
        }
    }

    used
}

/// Declare every referenced infrastructure network as external at the root.
///
/// Existing definitions keep their other keys; a new root `networks` mapping
/// is inserted at its canonical root position. The input is not modified.
pub fn ensure_external_networks(
    root: &Hash,
    conventions: &Conventions,
    policy: &OrderPolicy,
) -> NetworkFix {
    let used = infrastructure_networks_used(&Document::new(root), conventions);

    let mut networks = match mapping_get(root, "networks") {
        Some(Yaml::Hash(existing)) => existing.clone(),
        _ => Hash::new(),
    };
    let mut changes = Vec::new();

    for name in used.keys() {
        let key = string_key(name);
        match networks.get(&key).map(is_external) {
            None => {
                networks.insert(key, external_definition());
                changes.push(NetworkChange::Added(name.clone()));
            }
            Some(false) => {
                if let Some(definition) = networks.get_mut(&key) {
                    match definition {
                        Yaml::Hash(map) => set_in_place(map, "external", Yaml::Boolean(true)),
                        other => *other = external_definition(),
                    }
                }
                changes.push(NetworkChange::MadeExternal(name.clone()));
            }
            Some(true) => {}
        }
    }

    if changes.is_empty() {
        return NetworkFix {
            document: Yaml::Hash(root.clone()),
            changes,
        };
    }

    NetworkFix {
        document: Yaml::Hash(with_root_key(root, "networks", Yaml::Hash(networks), policy)),
        changes,
    }
}

/// Set `key` to `value`. An existing entry keeps its position; `Hash::insert`
/// would move it to the end.
fn set_in_place(map: &mut Hash, key: &str, value: Yaml) {
    match map.get_mut(&string_key(key)) {
        Some(slot) => *slot = value,
        None => {
            map.insert(string_key(key), value);
        }
    }
}

fn external_definition() -> Yaml {
    let mut map = Hash::new();
    map.insert(string_key("external"), Yaml::Boolean(true));
    Yaml::Hash(map)
}

/// Copy of `root` with `key` set to `value`. An existing key keeps its
/// position; a new key goes before the first key that ranks after it.
fn with_root_key(root: &Hash, key: &str, value: Yaml, policy: &OrderPolicy) -> Hash {
    let new_key = string_key(key);
    if root.contains_key(&new_key) {
        let mut updated = root.clone();
        set_in_place(&mut updated, key, value);
        return updated;
    }

    let rank = policy.root.rank(key);
    let mut updated = Hash::new();
    let mut pending = Some((new_key, value));

    for (k, v) in root {
        if policy.root.rank(&key_name(k)) > rank
            && let Some((nk, nv)) = pending.take()
        {
            updated.insert(nk, nv);
        }
        updated.insert(k.clone(), v.clone());
    }
    if let Some((nk, nv)) = pending {
        updated.insert(nk, nv);
    }

    updated
}

/// Apply the network fix to source text. `Ok(None)` means nothing to change.
pub fn fix_networks_content(
    content: &str,
    path: &str,
    config: &ComposeConfig,
) -> Result<Option<(String, Vec<NetworkChange>)>> {
    let root = match parse_yaml(content) {
        Ok(root) => root,
        Err(ParseError::EmptyDocument) => return Ok(None),
        Err(e) => return Err(TidyError::parse(path, e)),
    };
    let root_map = match &root {
        Yaml::Hash(map) => map,
        _ => {
            return Err(TidyError::parse(
                path,
                ParseError::InvalidStructure("root must be a mapping".to_string()),
            ));
        }
    };

    let fix = ensure_external_networks(root_map, &config.conventions, &config.policy);
    if !fix.is_changed() {
        return Ok(None);
    }

    let hints = FormatHints::annotate(&fix.document);
    let rewritten = Rewritten {
        document: fix.document,
        hints,
    };
    Ok(Some((emit(&rewritten, &config.emit), fix.changes)))
}

/// Apply the network fix to a file. Returns the changes made (or that would
/// be made, with `dry_run`).
pub fn fix_networks_file(
    path: &Path,
    config: &ComposeConfig,
    dry_run: bool,
) -> Result<Vec<NetworkChange>> {
    let path_str = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| TidyError::read(path, e))?;

    let Some((fixed, changes)) = fix_networks_content(&content, &path_str, config)? else {
        return Ok(Vec::new());
    };

    for change in &changes {
        match change {
            NetworkChange::Added(name) => {
                log::info!("Added external network '{}' to {}", name, path_str)
            }
            NetworkChange::MadeExternal(name) => {
                log::info!("Updated network '{}' to external in {}", name, path_str)
            }
        }
    }

    if !dry_run {
        write_document(path, &fixed)?;
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compose::lint::validate_source;
    use crate::analyzer::compose::parser::{mapping_keys, parse_document};

    fn fix(yaml: &str) -> NetworkFix {
        let root = parse_document(yaml).unwrap();
        let Yaml::Hash(map) = root else {
            unreachable!()
        };
        ensure_external_networks(&map, &Conventions::default(), &OrderPolicy::default())
    }

    fn root_networks(doc: &Yaml) -> &Hash {
        match doc {
            Yaml::Hash(map) => match mapping_get(map, "networks") {
                Some(Yaml::Hash(networks)) => networks,
                other => panic!("networks not a mapping: {:?}", other),
            },
            _ => panic!("root not a mapping"),
        }
    }

    #[test]
    fn test_is_external() {
        let root = parse_document(
            "a:\n  external: true\nb:\nc:\n  external: false\nd:\n  name: d\n",
        )
        .unwrap();
        let Yaml::Hash(map) = &root else {
            unreachable!()
        };
        let def = |k: &str| mapping_get(map, k).unwrap();
        assert!(is_external(def("a")));
        assert!(!is_external(def("b")));
        assert!(!is_external(def("c")));
        assert!(!is_external(def("d")));
        assert_eq!(describe_definition(def("b")), "an empty definition");
        assert_eq!(describe_definition(def("c")), "external: false");
        assert_eq!(describe_definition(def("d")), "no external key");
    }

    #[test]
    fn test_adds_missing_networks_section_in_canonical_position() {
        let result = fix(r#"
services:
  web:
    networks:
      - proxy
volumes:
  data:
"#);
        assert_eq!(
            result.changes,
            vec![NetworkChange::Added("proxy".to_string())]
        );
        let Yaml::Hash(map) = &result.document else {
            unreachable!()
        };
        assert_eq!(mapping_keys(map), vec!["services", "networks", "volumes"]);
        assert!(is_external(
            mapping_get(root_networks(&result.document), "proxy").unwrap()
        ));
    }

    #[test]
    fn test_updates_existing_definitions() {
        let result = fix(r#"
services:
  web:
    networks:
      proxy:
      vpn_net:
      media_int:
networks:
  proxy:
  vpn_net:
    name: vpn
    external: false
  media_int:
    external: true
"#);
        assert_eq!(
            result.changes,
            vec![
                NetworkChange::MadeExternal("proxy".to_string()),
                NetworkChange::MadeExternal("vpn_net".to_string()),
            ]
        );
        let networks = root_networks(&result.document);
        let vpn = mapping_get(networks, "vpn_net").unwrap();
        assert!(is_external(vpn));
        let Yaml::Hash(vpn_map) = vpn else {
            unreachable!()
        };
        assert_eq!(mapping_keys(vpn_map), vec!["name", "external"]);
    }

    #[test]
    fn test_no_change_when_already_external() {
        let result = fix(r#"
services:
  web:
    networks: [proxy, backend]
networks:
  proxy:
    external: true
"#);
        assert!(!result.is_changed());
    }

    #[test]
    fn test_used_networks_collects_services() {
        let root = parse_document(r#"
services:
  web:
    networks: [proxy]
  api:
    networks:
      proxy:
      backend:
"#)
        .unwrap();
        let doc = Document::from_yaml(&root).unwrap();
        let used = infrastructure_networks_used(&doc, &Conventions::default());
        assert_eq!(used.len(), 1);
        assert_eq!(used["proxy"], vec!["web", "api"]);
    }

    #[test]
    fn test_fix_networks_content_emits_yaml() {
        let config = ComposeConfig::default();
        let yaml = "services:\n  web:\n    image: nginx\n    networks:\n      - proxy\n";
        let (fixed, changes) = fix_networks_content(yaml, "stack/docker-compose.yml", &config)
            .unwrap()
            .unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(
            fixed,
            "services:\n  web:\n    image: nginx\n    networks:\n      - proxy\nnetworks:\n  proxy:\n    external: true\n"
        );
    }

    #[test]
    fn test_existing_networks_section_keeps_root_position() {
        let config = ComposeConfig::default();
        let yaml = "services:\n  web:\n    image: nginx\n    networks:\n      - proxy\nnetworks:\n  backend: {}\nvolumes:\n  data: {}\n";
        let (fixed, changes) = fix_networks_content(yaml, "stack/docker-compose.yml", &config)
            .unwrap()
            .unwrap();
        assert_eq!(changes, vec![NetworkChange::Added("proxy".to_string())]);
        assert_eq!(
            fixed,
            "services:\n  web:\n    image: nginx\n    networks:\n      - proxy\nnetworks:\n  backend: {}\n  proxy:\n    external: true\nvolumes:\n  data: {}\n"
        );

        let result = validate_source(&fixed, "stack/docker-compose.yml", &config);
        assert_eq!(result.by_rule("root-keys-order").count(), 0);
        assert_eq!(result.by_rule("infrastructure-network-external").count(), 0);
    }

    #[test]
    fn test_external_key_keeps_its_position() {
        let result = fix(r#"
services:
  web:
    networks:
      - proxy
networks:
  proxy:
    external: false
    name: proxy
volumes:
  data: {}
"#);
        assert_eq!(
            result.changes,
            vec![NetworkChange::MadeExternal("proxy".to_string())]
        );
        let Yaml::Hash(map) = &result.document else {
            unreachable!()
        };
        assert_eq!(mapping_keys(map), vec!["services", "networks", "volumes"]);

        let Some(Yaml::Hash(proxy)) = mapping_get(root_networks(&result.document), "proxy")
        else {
            panic!("proxy definition not a mapping");
        };
        assert_eq!(mapping_keys(proxy), vec!["external", "name"]);
        assert_eq!(mapping_get(proxy, "external"), Some(&Yaml::Boolean(true)));
    }

    #[test]
    fn test_fix_networks_content_rejects_broken_yaml() {
        let config = ComposeConfig::default();
        let err = fix_networks_content("services: [", "bad.yml", &config).unwrap_err();
        assert!(err.to_string().contains("bad.yml"));
    }
}
