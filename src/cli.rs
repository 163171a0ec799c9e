use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analyzer::compose::formatter;

#[derive(Parser)]
#[command(name = "compose-tidy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate and normalize key order in Docker Compose files")]
#[command(long_about = "Checks docker-compose.yml files against a canonical key order and the shared network and extends conventions, and rewrites them into canonical order.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every compose file under a directory
    Validate {
        /// Directory to search (or a single compose file)
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Output format for findings
        #[arg(short, long, value_enum, default_value = "stylish")]
        format: OutputFormat,
    },

    /// Rewrite compose files into canonical key order
    Fix {
        /// Directory to search (or a single compose file)
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Write nothing; exit non-zero if any file would change
        #[arg(long, conflicts_with = "dry_run")]
        check: bool,

        /// Report which files would change without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Declare infrastructure networks as external where services use them
    Networks {
        /// Directory to search (or a single compose file)
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Report changes without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Check service key order in the given files (pre-commit hook)
    Check {
        /// Compose files to check
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Stylish,
    Compact,
    Json,
    Github,
}

impl From<OutputFormat> for formatter::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Stylish => Self::Stylish,
            OutputFormat::Compact => Self::Compact,
            OutputFormat::Json => Self::Json,
            OutputFormat::Github => Self::GitHub,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
