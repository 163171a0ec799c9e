//! YAML parsing for Docker Compose documents.
//!
//! The parsed tree is `yaml_rust2::Yaml`: mappings keep their construction
//! order, which both the validator and the rewriter rely on. Line numbers for
//! findings are recovered from the raw source afterwards.

pub mod document;

pub use document::{
    Document, NetworkRef, RefForm, ServiceEntry, key_name, kind_name, mapping_get, mapping_keys,
    scalar_text, services, string_key,
};

use yaml_rust2::{Yaml, YamlLoader};

/// Error type for parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("YAML parse error: {0}")]
    YamlError(String),
    #[error("Empty document")]
    EmptyDocument,
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

/// Parse a YAML string and return the first document.
///
/// An empty stream, or a stream whose first document is null, yields
/// `ParseError::EmptyDocument` so callers can tell "nothing to do" apart
/// from broken input.
pub fn parse_yaml(content: &str) -> Result<Yaml, ParseError> {
    let docs =
        YamlLoader::load_from_str(content).map_err(|e| ParseError::YamlError(e.to_string()))?;

    if docs.len() > 1 {
        log::debug!("{} YAML documents in stream, using the first", docs.len());
    }

    match docs.into_iter().next() {
        None | Some(Yaml::Null) => Err(ParseError::EmptyDocument),
        Some(doc) => Ok(doc),
    }
}

/// Parse a compose document, requiring a mapping at the root.
pub fn parse_document(content: &str) -> Result<Yaml, ParseError> {
    let root = parse_yaml(content)?;
    Document::from_yaml(&root)?;
    Ok(root)
}

/// Find the line number for a given path in the source YAML.
///
/// This function searches the raw source for the key to determine its position.
pub fn find_line_for_key(source: &str, path: &[&str]) -> Option<u32> {
    if path.is_empty() {
        return Some(1);
    }

    let mut current_indent = 0;
    let mut path_idx = 0;

    for (line_num, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        let target_key = path[path_idx];

        if key_on_line(trimmed, target_key) && (path_idx == 0 || indent > current_indent) {
            path_idx += 1;
            current_indent = indent;

            if path_idx == path.len() {
                return Some((line_num + 1) as u32); // 1-indexed
            }
        }
    }

    None
}

/// Whether `trimmed` opens a mapping entry for `key`, plain or quoted, possibly
/// as a sequence item.
fn key_on_line(trimmed: &str, key: &str) -> bool {
    let entry = trimmed.strip_prefix("- ").unwrap_or(trimmed);
    [
        format!("{}:", key),
        format!("\"{}\":", key),
        format!("'{}':", key),
    ]
    .iter()
    .any(|pattern| entry.starts_with(pattern.as_str()))
        || entry == key
}

/// Best-effort line for a finding's key path; falls back to the closest
/// ancestor that can be located.
pub fn find_line_for_path(source: &str, path: &[String]) -> Option<u32> {
    let keys: Vec<&str> = path.iter().map(String::as_str).collect();
    (1..=keys.len())
        .rev()
        .find_map(|len| find_line_for_key(source, &keys[..len]))
}
