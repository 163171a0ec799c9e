//! Finding compose files under a directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::analyzer::compose::config::ComposeConfig;
use crate::error::{Result, TidyError};

/// Which documents a batch should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    /// Leave out infrastructure-designated paths (network fixing).
    SkipInfrastructure,
}

fn should_skip_dir(name: &str) -> bool {
    matches!(name, ".venv" | "venv" | "node_modules" | ".git")
}

/// Recursively collect files named `config.file_name` under `root`, sorted.
///
/// A `root` that is itself a file is returned as the only entry, regardless
/// of its name.
pub fn find_compose_files(
    root: &Path,
    config: &ComposeConfig,
    scope: Scope,
) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        return Err(TidyError::Discovery(format!(
            "{} is not a file or directory",
            root.display()
        )));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !e.file_name().to_str().is_some_and(should_skip_dir)
        })
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() != config.file_name.as_str() {
            continue;
        }

        let path_str = entry.path().display().to_string();
        if config.is_excluded(&path_str) {
            log::debug!("Excluded: {}", path_str);
            continue;
        }
        if scope == Scope::SkipInfrastructure
            && config.conventions.is_infrastructure_path(&path_str)
        {
            log::debug!("Skipping infrastructure document: {}", path_str);
            continue;
        }

        files.push(entry.into_path());
    }

    files.sort();
    log::debug!("Found {} compose files under {}", files.len(), root.display());
    Ok(files)
}
