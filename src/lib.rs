//! # compose-tidy
//!
//! Validates Docker Compose files against a canonical key order and a set of
//! cross-document conventions, and rewrites them into canonical order.
//!
//! ## Features
//!
//! - **Validation**: Root and service key order, infrastructure network declarations, `extends` usage
//! - **Rewriting**: Canonical reordering with stable handling of unknown keys
//! - **Network fixes**: Declares used infrastructure networks as external
//! - **Multiple Formats**: Stylish, compact, JSON and GitHub Actions output
//!
//! ## Example
//!
//! ```rust,no_run
//! use compose_tidy::analyzer::compose::{ComposeConfig, FixOutcome, fix_content};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = std::fs::read_to_string("docker-compose.yml")?;
//! if let FixOutcome::Rewritten(text) = fix_content(&source, &ComposeConfig::default())? {
//!     println!("{}", text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

pub use error::{Result, TidyError};
use analyzer::compose::FixMode;
use cli::{Cli, Commands};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a parsed command line. Returns whether the run passed.
pub fn run_command(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Validate { path, format } => {
            let config = config::load_compose_config(cli.config.as_deref(), &path)?;
            handlers::handle_validate(&path, format.into(), &config)
        }
        Commands::Fix {
            path,
            check,
            dry_run,
        } => {
            let config = config::load_compose_config(cli.config.as_deref(), &path)?;
            let mode = if check {
                FixMode::Check
            } else if dry_run {
                FixMode::DryRun
            } else {
                FixMode::Write
            };
            handlers::handle_fix(&path, mode, &config)
        }
        Commands::Networks { path, dry_run } => {
            let config = config::load_compose_config(cli.config.as_deref(), &path)?;
            handlers::handle_networks(&path, dry_run, &config)
        }
        Commands::Check { files } => {
            let cwd = std::path::PathBuf::from(".");
            let config = config::load_compose_config(cli.config.as_deref(), &cwd)?;
            handlers::handle_check(&files, &config)
        }
    }
}
