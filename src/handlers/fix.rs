use colored::*;
use std::path::Path;

use crate::analyzer::compose::{
    ComposeConfig, FixMode, FixSummary, Scope, find_compose_files, fix_file,
};
use crate::handlers::utils::{display_path, plural};

/// Rewrite compose files into canonical order. Returns whether the run passed:
/// no failures, and with `--check` no file that would change.
pub fn handle_fix(path: &Path, mode: FixMode, config: &ComposeConfig) -> crate::Result<bool> {
    let files = find_compose_files(path, config, Scope::All)?;

    if files.is_empty() {
        println!("No {} files found.", config.file_name);
        return Ok(true);
    }

    log::info!("Found {} {} files", files.len(), config.file_name);

    let mut summary = FixSummary::default();
    for file in &files {
        let shown = display_path(path, file);
        match fix_file(file, config, mode) {
            Ok(outcome) => {
                if outcome.is_changed() {
                    let label = match mode {
                        FixMode::Write => "Fixed:".green(),
                        FixMode::DryRun => "Would fix:".yellow(),
                        FixMode::Check => "Not in canonical order:".red(),
                    };
                    println!("{} {}", label, shown);
                }
                summary.record(shown, &outcome);
            }
            Err(err) => {
                log::warn!("{}", err);
                eprintln!("{} {}", "Failed:".red().bold(), err);
                summary.record_failure(shown, err.to_string());
            }
        }
    }

    let changed_label = match mode {
        FixMode::Write => "fixed",
        FixMode::DryRun | FixMode::Check => "would change",
    };
    println!(
        "\n{} checked: {} {}, {} unchanged, {} empty, {} failed",
        plural(summary.total(), "file", "files"),
        summary.changed.len(),
        changed_label,
        summary.unchanged,
        summary.empty,
        summary.failed.len()
    );

    let check_failed = mode == FixMode::Check && summary.has_changes();
    if check_failed {
        println!("Run `compose-tidy fix` to rewrite them.");
    }

    Ok(!summary.has_failures() && !check_failed)
}
