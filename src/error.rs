//! Crate-level error types.
//!
//! Per-document problems (findings, parse failures during validation) are
//! reported as data; these errors cover what stops an operation on a file or
//! the whole run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analyzer::compose::parser::ParseError;

/// Errors produced by compose-tidy operations.
#[derive(Debug, Error)]
pub enum TidyError {
    /// Reading a file or directory failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be parsed or has the wrong shape
    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    /// The configuration file is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Writing the rewritten document failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Walking the target directory failed
    #[error("Discovery failed: {0}")]
    Discovery(String),
}

impl TidyError {
    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type alias for compose-tidy operations
pub type Result<T> = std::result::Result<T, TidyError>;
