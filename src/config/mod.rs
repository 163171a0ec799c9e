pub mod types;

use crate::analyzer::compose::config::ComposeConfig;
use crate::error::{Result, TidyError};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".compose-tidy.toml";

/// Get the global config file path (~/.compose-tidy.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (target/.compose-tidy.toml)
pub fn local_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_FILE_NAME)
}

/// Read and parse one config file.
pub fn read_config_file(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path).map_err(|e| TidyError::read(path, e))?;
    toml::from_str(&content)
        .map_err(|e| TidyError::Config(format!("{}: {}", path.display(), e)))
}

/// Load configuration from file or use defaults.
///
/// An explicit path must exist. Otherwise the local config in the target
/// directory is tried first, then the global one.
pub fn load_config(explicit: Option<&Path>, project_path: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = explicit {
        log::debug!("Using config file {}", path.display());
        return read_config_file(path);
    }

    let candidates = project_path
        .map(local_config_path)
        .into_iter()
        .chain(global_config_path());

    for candidate in candidates {
        if candidate.is_file() {
            log::debug!("Using config file {}", candidate.display());
            return read_config_file(&candidate);
        }
    }

    Ok(types::Config::default())
}

/// Load the runtime configuration for a run against `target`.
pub fn load_compose_config(explicit: Option<&Path>, target: &Path) -> Result<ComposeConfig> {
    let project_dir = if target.is_file() {
        target.parent().unwrap_or(target)
    } else {
        target
    };
    load_config(explicit, Some(project_dir))?.to_compose_config()
}
