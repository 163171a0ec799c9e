//! Rewriting files into canonical order.

use std::io;
use std::path::Path;

use yaml_rust2::Yaml;

use crate::analyzer::compose::config::ComposeConfig;
use crate::analyzer::compose::parser::{Document, ParseError, parse_yaml};
use crate::analyzer::compose::rewrite::{emit, rewrite};
use crate::analyzer::compose::rules::{RuleContext, ct003};
use crate::analyzer::compose::types::Finding;
use crate::error::{Result, TidyError};

/// Outcome of rewriting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// The canonical rendering equals the input.
    Unchanged,
    /// The canonical rendering differs from the input.
    Rewritten(String),
    /// The document is empty; there is nothing to rewrite.
    Empty,
}

impl FixOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Rewritten(_))
    }
}

/// What `fix_file` does with a changed rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixMode {
    /// Write the rewritten document back.
    #[default]
    Write,
    /// Log what would change, write nothing.
    DryRun,
    /// Write nothing; the caller treats a change as a failure.
    Check,
}

/// Rewrite source text into canonical order.
///
/// Fails on unparseable input or a root that is not a mapping; the caller
/// then leaves the file untouched.
pub fn fix_content(
    content: &str,
    config: &ComposeConfig,
) -> std::result::Result<FixOutcome, ParseError> {
    let root = match parse_yaml(content) {
        Ok(root) => root,
        Err(ParseError::EmptyDocument) => return Ok(FixOutcome::Empty),
        Err(err) => return Err(err),
    };
    Document::from_yaml(&root)?;

    let rewritten = rewrite(&root, &config.policy);
    let output = emit(&rewritten, &config.emit);

    if output == content {
        Ok(FixOutcome::Unchanged)
    } else {
        Ok(FixOutcome::Rewritten(output))
    }
}

/// Rewrite a file in place (or not, depending on `mode`).
pub fn fix_file(path: &Path, config: &ComposeConfig, mode: FixMode) -> Result<FixOutcome> {
    let path_str = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| TidyError::read(path, e))?;

    let outcome = fix_content(&content, config).map_err(|e| TidyError::parse(&path_str, e))?;

    match (&outcome, mode) {
        (FixOutcome::Empty, _) => log::info!("Empty file: {}", path_str),
        (FixOutcome::Unchanged, _) => log::debug!("Already canonical: {}", path_str),
        (FixOutcome::Rewritten(output), FixMode::Write) => {
            write_document(path, output)?;
            log::info!("Fixed: {}", path_str);
        }
        (FixOutcome::Rewritten(_), FixMode::DryRun) => log::info!("Would fix: {}", path_str),
        (FixOutcome::Rewritten(_), FixMode::Check) => {
            log::warn!("Not in canonical order: {}", path_str)
        }
    }

    Ok(outcome)
}

/// Write a rewritten document back. Files marked read-only are refused
/// even when the process could override the permission bits.
pub(crate) fn write_document(path: &Path, content: &str) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| TidyError::write(path, e))?;
    if metadata.permissions().readonly() {
        return Err(TidyError::write(
            path,
            io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
        ));
    }
    std::fs::write(path, content).map_err(|e| TidyError::write(path, e))
}

/// Service key order findings for source text, one per service at most.
///
/// Empty documents and documents without a `services` mapping have none.
pub fn check_service_order(
    content: &str,
    config: &ComposeConfig,
) -> std::result::Result<Vec<Finding>, ParseError> {
    let root = match parse_yaml(content) {
        Ok(root) => root,
        Err(ParseError::EmptyDocument) => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };
    let Yaml::Hash(map) = &root else {
        return Ok(Vec::new());
    };

    let ctx = RuleContext::new(Document::new(map), "", config);
    Ok(ct003::check(&ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const UNORDERED: &str = r#"volumes:
  data: {}
services:
  web:
    restart: always
    image: nginx
    ports:
      - 80:80
"#;

    const CANONICAL: &str = r#"services:
  web:
    image: nginx
    ports:
      - "80:80"
    restart: always
volumes:
  data: {}
"#;

    #[test]
    fn test_fix_content_rewrites() {
        let outcome = fix_content(UNORDERED, &ComposeConfig::default()).unwrap();
        assert_eq!(outcome, FixOutcome::Rewritten(CANONICAL.to_string()));
    }

    #[test]
    fn test_fix_content_is_idempotent() {
        let outcome = fix_content(CANONICAL, &ComposeConfig::default()).unwrap();
        assert_eq!(outcome, FixOutcome::Unchanged);
    }

    #[test]
    fn test_fix_content_empty_and_invalid() {
        let config = ComposeConfig::default();
        assert_eq!(fix_content("", &config).unwrap(), FixOutcome::Empty);
        assert!(matches!(
            fix_content("services: [", &config),
            Err(ParseError::YamlError(_))
        ));
        assert!(matches!(
            fix_content("- a\n", &config),
            Err(ParseError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_fix_file_modes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docker-compose.yml");
        let config = ComposeConfig::default();

        fs::write(&path, UNORDERED).unwrap();
        assert!(fix_file(&path, &config, FixMode::Check).unwrap().is_changed());
        assert!(fix_file(&path, &config, FixMode::DryRun).unwrap().is_changed());
        assert_eq!(fs::read_to_string(&path).unwrap(), UNORDERED);

        assert!(fix_file(&path, &config, FixMode::Write).unwrap().is_changed());
        assert_eq!(fs::read_to_string(&path).unwrap(), CANONICAL);
        assert_eq!(
            fix_file(&path, &config, FixMode::Write).unwrap(),
            FixOutcome::Unchanged
        );
    }

    #[test]
    fn test_fix_file_leaves_broken_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docker-compose.yml");
        fs::write(&path, "services: [\n").unwrap();

        let err = fix_file(&path, &ComposeConfig::default(), FixMode::Write).unwrap_err();
        assert!(matches!(err, TidyError::Parse { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "services: [\n");
    }

    #[test]
    fn test_fix_file_reports_write_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docker-compose.yml");
        fs::write(&path, UNORDERED).unwrap();

        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        let config = ComposeConfig::default();
        assert!(fix_file(&path, &config, FixMode::Check).unwrap().is_changed());

        let err = fix_file(&path, &config, FixMode::Write).unwrap_err();
        assert!(matches!(err, TidyError::Write { .. }));
        assert!(err.to_string().ends_with("file is read-only"));
        assert_eq!(fs::read_to_string(&path).unwrap(), UNORDERED);
    }

    #[test]
    fn test_check_service_order() {
        let findings = check_service_order(UNORDERED, &ComposeConfig::default()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Service 'web': key 'restart' should come after 'image'"
        );

        assert!(check_service_order(CANONICAL, &ComposeConfig::default()).unwrap().is_empty());
        assert!(check_service_order("", &ComposeConfig::default()).unwrap().is_empty());
    }
}
