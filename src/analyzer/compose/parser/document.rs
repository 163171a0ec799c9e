//! Borrowed views over a parsed compose tree.
//!
//! Nothing here copies or mutates the tree. Shapes other than the ones a
//! check expects are treated as opaque values and skipped.

use yaml_rust2::Yaml;
use yaml_rust2::yaml::Hash;

use super::ParseError;

/// A compose document whose root is known to be a mapping.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    root: &'a Hash,
}

/// How a service refers to a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefForm {
    /// `networks: [proxy]`
    List,
    /// `networks: {proxy: {aliases: [...]}}`
    Mapping,
}

/// A network name referenced by a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRef {
    pub name: String,
    pub form: RefForm,
}

/// One entry under `services`.
#[derive(Debug, Clone, Copy)]
pub struct ServiceEntry<'a> {
    pub name: &'a Yaml,
    /// `None` when the service value is not a mapping (e.g. `web:` with no body).
    pub body: Option<&'a Hash>,
}

impl ServiceEntry<'_> {
    pub fn name(&self) -> String {
        key_name(self.name)
    }

    pub fn keys(&self) -> Vec<String> {
        self.body.map(mapping_keys).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Yaml> {
        self.body.and_then(|body| mapping_get(body, key))
    }

    /// Networks named in this service's `networks` field.
    pub fn network_refs(&self) -> Vec<NetworkRef> {
        match self.get("networks") {
            Some(Yaml::Array(items)) => items
                .iter()
                .filter_map(scalar_text)
                .map(|name| NetworkRef {
                    name,
                    form: RefForm::List,
                })
                .collect(),
            Some(Yaml::Hash(map)) => map
                .keys()
                .map(|key| NetworkRef {
                    name: key_name(key),
                    form: RefForm::Mapping,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl<'a> Document<'a> {
    pub fn new(root: &'a Hash) -> Self {
        Self { root }
    }

    pub fn from_yaml(yaml: &'a Yaml) -> Result<Self, ParseError> {
        match yaml {
            Yaml::Hash(root) => Ok(Self { root }),
            Yaml::Null => Err(ParseError::EmptyDocument),
            other => Err(ParseError::InvalidStructure(format!(
                "root must be a mapping, found {}",
                kind_name(other)
            ))),
        }
    }

    pub fn root(&self) -> &'a Hash {
        self.root
    }

    pub fn root_keys(&self) -> Vec<String> {
        mapping_keys(self.root)
    }

    pub fn get(&self, key: &str) -> Option<&'a Yaml> {
        mapping_get(self.root, key)
    }

    /// Service entries in document order; empty unless `services` is a mapping.
    pub fn services(&self) -> Vec<ServiceEntry<'a>> {
        match self.get("services") {
            Some(Yaml::Hash(services_map)) => services(services_map),
            _ => Vec::new(),
        }
    }

    /// Root-level `networks` mapping, if present and a mapping.
    pub fn root_networks(&self) -> Option<&'a Hash> {
        match self.get("networks") {
            Some(Yaml::Hash(networks)) => Some(networks),
            _ => None,
        }
    }
}

/// Entries of a `services` mapping.
pub fn services(services_map: &Hash) -> Vec<ServiceEntry<'_>> {
    services_map
        .iter()
        .map(|(name, body)| ServiceEntry {
            name,
            body: match body {
                Yaml::Hash(h) => Some(h),
                _ => None,
            },
        })
        .collect()
}

/// Key names of a mapping in construction order.
pub fn mapping_keys(map: &Hash) -> Vec<String> {
    map.keys().map(key_name).collect()
}

/// Look up a string key.
pub fn mapping_get<'a>(map: &'a Hash, key: &str) -> Option<&'a Yaml> {
    map.get(&string_key(key))
}

pub fn string_key(key: &str) -> Yaml {
    Yaml::String(key.to_string())
}

/// Text form of a mapping key.
pub fn key_name(key: &Yaml) -> String {
    match key {
        Yaml::String(s) | Yaml::Real(s) => s.clone(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => format!("<{}>", kind_name(other)),
    }
}

/// Scalar value as text, used where a value is reported or coerced to string.
pub fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn kind_name(value: &Yaml) -> &'static str {
    match value {
        Yaml::Real(_) => "float",
        Yaml::Integer(_) => "integer",
        Yaml::String(_) => "string",
        Yaml::Boolean(_) => "boolean",
        Yaml::Array(_) => "sequence",
        Yaml::Hash(_) => "mapping",
        Yaml::Alias(_) => "alias",
        Yaml::Null => "null",
        Yaml::BadValue => "invalid value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust2::YamlLoader;

    fn load(yaml: &str) -> Yaml {
        YamlLoader::load_from_str(yaml).unwrap().remove(0)
    }

    #[test]
    fn test_services_view() {
        let root = load(
            r#"
services:
  web:
    image: nginx
    ports:
      - "80:80"
  worker:
networks:
  proxy:
    external: true
"#,
        );
        let doc = Document::from_yaml(&root).unwrap();
        let services = doc.services();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name(), "web");
        assert_eq!(services[0].keys(), vec!["image", "ports"]);
        assert!(services[1].body.is_none());
        assert!(services[1].keys().is_empty());
        assert!(doc.root_networks().is_some());
    }

    #[test]
    fn test_network_refs() {
        let root = load(
            r#"
services:
  web:
    networks:
      - proxy
      - backend
  api:
    networks:
      proxy:
        aliases: [api]
      default:
  db:
    image: postgres
"#,
        );
        let doc = Document::from_yaml(&root).unwrap();
        let services = doc.services();

        let web = services[0].network_refs();
        assert_eq!(web.len(), 2);
        assert_eq!(web[0].name, "proxy");
        assert_eq!(web[1].form, RefForm::List);

        let api = services[1].network_refs();
        assert_eq!(
            api,
            vec![
                NetworkRef { name: "proxy".into(), form: RefForm::Mapping },
                NetworkRef { name: "default".into(), form: RefForm::Mapping },
            ]
        );

        assert!(services[2].network_refs().is_empty());
    }

    #[test]
    fn test_non_mapping_services() {
        let root = load("services: [web, db]\n");
        let doc = Document::from_yaml(&root).unwrap();
        assert!(doc.services().is_empty());
        assert!(doc.root_networks().is_none());
    }

    #[test]
    fn test_key_name() {
        assert_eq!(key_name(&Yaml::String("web".into())), "web");
        assert_eq!(key_name(&Yaml::Integer(80)), "80");
        assert_eq!(key_name(&Yaml::Boolean(true)), "true");
        assert_eq!(key_name(&Yaml::Null), "null");
    }

    #[test]
    fn test_from_yaml_rejects_scalars() {
        let root = load("just a string\n");
        assert!(matches!(
            Document::from_yaml(&root),
            Err(ParseError::InvalidStructure(msg)) if msg.contains("string")
        ));
    }
}
