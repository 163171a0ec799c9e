//! Order-preserving YAML emitter.
//!
//! Mappings are written in construction order, block style by default, with
//! the per-node styles from `FormatHints` applied. Only flow sequences are
//! wrapped at the line width; scalars are never folded. Comments from the
//! source are not carried over.

use yaml_rust2::Yaml;
use yaml_rust2::yaml::Hash;

use super::Rewritten;
use super::hints::{FormatHints, NodeStyle, PathSegment};
use crate::analyzer::compose::parser::{key_name, scalar_text};

/// Emitter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Preferred maximum line width for flow sequences.
    pub line_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            line_width: 120,
        }
    }
}

/// Serialize a rewritten document.
pub fn emit(rewritten: &Rewritten, options: &EmitOptions) -> String {
    let mut emitter = Emitter::new(&rewritten.hints, options);
    emitter.document(&rewritten.document);
    emitter.out
}

struct Emitter<'a> {
    hints: &'a FormatHints,
    step: usize,
    line_width: usize,
    path: Vec<PathSegment>,
    out: String,
}

impl<'a> Emitter<'a> {
    fn new(hints: &'a FormatHints, options: &EmitOptions) -> Self {
        Self {
            hints,
            step: options.indent.max(1),
            line_width: options.line_width,
            path: Vec::new(),
            out: String::new(),
        }
    }

    fn document(&mut self, root: &Yaml) {
        match root {
            Yaml::Hash(map) if !map.is_empty() => self.mapping(map, 0, false),
            Yaml::Array(items) if !items.is_empty() => self.sequence(items, 0, false),
            other => {
                let text = self.scalar(other, self.step);
                self.out.push_str(&text);
                self.out.push('\n');
            }
        }
    }

    /// Block mapping at `indent`. With `inline_first`, the first entry
    /// continues the current line (after a sequence dash).
    fn mapping(&mut self, map: &Hash, indent: usize, inline_first: bool) {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 || !inline_first {
                self.pad(indent);
            }
            self.out.push_str(&render_key(key));
            self.out.push(':');

            self.path.push(PathSegment::Key(key_name(key)));
            self.value(value, indent);
            self.path.pop();
        }
    }

    /// Value of a mapping entry whose key sits at `indent`.
    fn value(&mut self, value: &Yaml, indent: usize) {
        match value {
            Yaml::Hash(map) if !map.is_empty() => {
                self.out.push('\n');
                self.mapping(map, indent + self.step, false);
            }
            Yaml::Array(items) if !items.is_empty() => match self.style() {
                Some(NodeStyle::FlowSequence) => {
                    self.out.push(' ');
                    self.flow_sequence(items, indent + self.step);
                    self.out.push('\n');
                }
                style => {
                    self.out.push('\n');
                    self.sequence(
                        items,
                        indent + self.step,
                        style == Some(NodeStyle::QuotedSequence),
                    );
                }
            },
            scalar => {
                let text = self.scalar(scalar, indent + self.step);
                self.out.push(' ');
                self.out.push_str(&text);
                self.out.push('\n');
            }
        }
    }

    fn sequence(&mut self, items: &[Yaml], indent: usize, quoted: bool) {
        for (index, item) in items.iter().enumerate() {
            self.pad(indent);
            self.path.push(PathSegment::Index(index));

            match item {
                Yaml::Hash(map) if !map.is_empty() => {
                    self.out.push_str("- ");
                    self.mapping(map, indent + 2, true);
                }
                Yaml::Array(nested) if !nested.is_empty() => {
                    if self.style() == Some(NodeStyle::FlowSequence) {
                        self.out.push_str("- ");
                        self.flow_sequence(nested, indent + self.step);
                        self.out.push('\n');
                    } else {
                        self.out.push_str("-\n");
                        self.sequence(nested, indent + self.step, false);
                    }
                }
                scalar => {
                    let text = match scalar_text(scalar) {
                        Some(s) if quoted => double_quoted(&s),
                        _ => self.scalar(scalar, indent + self.step),
                    };
                    self.out.push_str("- ");
                    self.out.push_str(&text);
                    self.out.push('\n');
                }
            }

            self.path.pop();
        }
    }

    /// `[a, b, c]`, breaking after a comma when the next item would pass the
    /// line width. Continuation lines start at `continuation`.
    fn flow_sequence(&mut self, items: &[Yaml], continuation: usize) {
        self.out.push('[');
        let mut column = self.column();
        let last = items.len().saturating_sub(1);

        for (i, item) in items.iter().enumerate() {
            let mut token = flow_text(item);
            token.push(if i == last { ']' } else { ',' });
            let width = token.chars().count();

            if i > 0 {
                if column + 1 + width > self.line_width {
                    self.out.push('\n');
                    self.pad(continuation);
                    column = continuation;
                } else {
                    self.out.push(' ');
                    column += 1;
                }
            }
            self.out.push_str(&token);
            column += width;
        }
    }

    /// A scalar in block context. `content_indent` is where literal block
    /// lines start.
    fn scalar(&self, value: &Yaml, content_indent: usize) -> String {
        match value {
            Yaml::String(s) => {
                if self.style() == Some(NodeStyle::Literal)
                    && let Some(block) = literal_block(s, content_indent)
                {
                    return block;
                }
                if is_plain_safe(s) {
                    s.clone()
                } else {
                    double_quoted(s)
                }
            }
            Yaml::Hash(_) => "{}".to_string(),
            Yaml::Array(_) => "[]".to_string(),
            other => plain_scalar(other),
        }
    }

    fn style(&self) -> Option<NodeStyle> {
        self.hints.style_at(&self.path)
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat_n(' ', indent));
    }

    fn column(&self) -> usize {
        let line_start = self.out.rfind('\n').map_or(0, |pos| pos + 1);
        self.out[line_start..].chars().count()
    }
}

fn render_key(key: &Yaml) -> String {
    match key {
        Yaml::String(s) if is_plain_safe(s) => s.clone(),
        Yaml::String(s) => double_quoted(s),
        Yaml::Hash(_) | Yaml::Array(_) => flow_text(key),
        other => plain_scalar(other),
    }
}

/// Non-string scalars in their plain form.
fn plain_scalar(value: &Yaml) -> String {
    match value {
        Yaml::Real(s) => s.clone(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        Yaml::String(s) => double_quoted(s),
        _ => "null".to_string(),
    }
}

/// Flow-context rendering: strings are always double-quoted.
fn flow_text(value: &Yaml) -> String {
    match value {
        Yaml::String(s) => double_quoted(s),
        Yaml::Array(items) => format!(
            "[{}]",
            items.iter().map(flow_text).collect::<Vec<_>>().join(", ")
        ),
        Yaml::Hash(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", flow_text(k), flow_text(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        other => plain_scalar(other),
    }
}

/// `|` block for a multi-line string, or `None` when the text cannot be
/// represented faithfully as a literal block.
fn literal_block(s: &str, content_indent: usize) -> Option<String> {
    let body = s.trim_end_matches('\n');
    let trailing = s.len() - body.len();

    if body.is_empty()
        || s.chars().any(|c| c != '\n' && c != '\t' && needs_escape(c))
    {
        return None;
    }

    let lines: Vec<&str> = body.split('\n').collect();
    let first_content = lines.iter().find(|line| !line.is_empty())?;
    if first_content.starts_with(' ')
        || lines
            .iter()
            .any(|line| line.starts_with('\t') || (!line.is_empty() && line.trim().is_empty()))
    {
        return None;
    }

    let header = match trailing {
        0 => "|-",
        1 => "|",
        _ => "|+",
    };

    let mut block = String::from(header);
    for line in &lines {
        block.push('\n');
        if !line.is_empty() {
            block.extend(std::iter::repeat_n(' ', content_indent));
            block.push_str(line);
        }
    }
    for _ in 1..trailing {
        block.push('\n');
    }
    Some(block)
}

const RESERVED_WORDS: &[&str] = &[
    "null", "~", "true", "false", "yes", "no", "on", "off", "y", "n",
];

/// Whether `s` reads back as the same string when written plain.
fn is_plain_safe(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };

    if first.is_whitespace() || s.ends_with(char::is_whitespace) {
        return false;
    }
    if s.chars().any(needs_escape) {
        return false;
    }

    match first {
        '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@'
        | '`' | ',' | '?' | ':' => return false,
        '-' => {
            if s.len() == 1 || s[1..].starts_with(' ') {
                return false;
            }
        }
        _ => {}
    }

    if s.starts_with("---") || s.starts_with("...") {
        return false;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return false;
    }

    let lower = s.to_ascii_lowercase();
    if RESERVED_WORDS.contains(&lower.as_str()) {
        return false;
    }
    !looks_numeric(&lower)
}

fn looks_numeric(lower: &str) -> bool {
    let unsigned = lower.trim_start_matches(['+', '-']);
    lower.parse::<i64>().is_ok()
        || lower.parse::<f64>().is_ok()
        || unsigned.starts_with("0x")
        || unsigned.starts_with("0o")
        || matches!(unsigned, ".inf" | ".nan")
}

/// Characters that force double quoting and need an escape sequence.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if (c as u32) <= 0xff && needs_escape(c) => {
                out.push_str(&format!("\\x{:02X}", c as u32))
            }
            c if needs_escape(c) => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
