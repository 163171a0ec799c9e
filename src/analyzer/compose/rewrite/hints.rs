//! Per-node formatting hints, kept beside the tree rather than in it.

use std::collections::HashMap;

use yaml_rust2::Yaml;

use crate::analyzer::compose::parser::key_name;

/// One step in a structural path from the document root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    pub fn key(name: &str) -> Self {
        Self::Key(name.to_string())
    }
}

/// How the emitter should render a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    /// Inline `[a, b]` sequence (healthcheck tests).
    FlowSequence,
    /// Block sequence whose scalar items are double-quoted (ports).
    QuotedSequence,
    /// `|` block scalar for multi-line strings.
    Literal,
}

/// Side table of node styles keyed by structural path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatHints {
    styles: HashMap<Vec<PathSegment>, NodeStyle>,
}

impl FormatHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute hints for every node of `document`.
    ///
    /// - a sequence under `test` inside a `healthcheck` mapping is flow style
    /// - a sequence under `ports` is a quoted block sequence
    /// - a string containing a line break is a literal block
    pub fn annotate(document: &Yaml) -> Self {
        let mut hints = Self::new();
        let mut path = Vec::new();
        hints.visit(document, None, &mut path);
        hints
    }

    fn visit(&mut self, node: &Yaml, parent_key: Option<&str>, path: &mut Vec<PathSegment>) {
        match node {
            Yaml::Hash(map) => {
                for (key, value) in map {
                    let name = key_name(key);
                    path.push(PathSegment::Key(name.clone()));

                    if let Yaml::Array(_) = value {
                        match (parent_key, name.as_str()) {
                            (Some("healthcheck"), "test") => {
                                self.set(path.clone(), NodeStyle::FlowSequence)
                            }
                            (_, "ports") => self.set(path.clone(), NodeStyle::QuotedSequence),
                            _ => {}
                        }
                    }
                    self.visit(value, Some(&name), path);
                    path.pop();
                }
            }
            Yaml::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    path.push(PathSegment::Index(index));
                    self.visit(item, None, path);
                    path.pop();
                }
            }
            Yaml::String(s) if s.contains('\n') => self.set(path.clone(), NodeStyle::Literal),
            _ => {}
        }
    }

    pub fn set(&mut self, path: Vec<PathSegment>, style: NodeStyle) {
        self.styles.insert(path, style);
    }

    pub fn style_at(&self, path: &[PathSegment]) -> Option<NodeStyle> {
        self.styles.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
