//! Docker Compose key-order normalizer and validator.
//!
//! Works on the in-memory YAML tree, never on text: a document is parsed with
//! `yaml-rust2` (mappings keep their source order), checked by a set of pure
//! rules, and optionally rewritten into canonical order and emitted again.
//!
//! # Example
//!
//! ```rust,ignore
//! use compose_tidy::analyzer::compose::{ComposeConfig, validate_source};
//!
//! let compose = r#"
//! volumes:
//!   data:
//! services:
//!   web:
//!     restart: always
//!     image: nginx
//! "#;
//!
//! let result = validate_source(compose, "media/docker-compose.yml", &ComposeConfig::default());
//! for finding in result.findings() {
//!     println!("{}", finding);
//! }
//! ```
//!
//! # Rules
//!
//! | Code  | Name                            | Default | Description                                     |
//! |-------|---------------------------------|---------|-------------------------------------------------|
//! | CT001 | root-keys-order                 | error   | Root keys in canonical order                    |
//! | CT002 | services-first                  | error   | `services` is the first root key                |
//! | CT003 | service-keys-order              | error   | Service keys in canonical order                 |
//! | CT004 | infrastructure-network-external | error   | Infrastructure networks declared external       |
//! | CT005 | service-network-known           | error   | Mapping-form network references are known       |
//! | CT006 | extends-present                 | warning | Services extend the shared base                 |
//! | CT007 | extends-target                  | error   | `extends` points at the shared base             |

pub mod config;
pub mod discover;
pub mod fix;
pub mod formatter;
pub mod lint;
pub mod networks;
pub mod parser;
pub mod policy;
pub mod report;
pub mod rewrite;
pub mod rules;
pub mod types;

// Re-export main types and functions
pub use config::{ComposeConfig, Conventions};
pub use discover::{Scope, find_compose_files};
pub use fix::{FixMode, FixOutcome, check_service_order, fix_content, fix_file};
pub use formatter::{OutputFormat, format_results};
pub use lint::{LintResult, validate, validate_file, validate_source};
pub use networks::{NetworkChange, NetworkFix, ensure_external_networks, fix_networks_file};
pub use policy::{Catalog, OrderPolicy};
pub use report::{BatchReport, FixSummary};
pub use rewrite::{EmitOptions, FormatHints, Rewritten, emit, rewrite};
pub use types::{ConfigLevel, Finding, RuleCode, Severity};
