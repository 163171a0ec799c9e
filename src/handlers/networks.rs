use colored::*;
use std::path::Path;

use crate::analyzer::compose::{
    ComposeConfig, NetworkChange, Scope, find_compose_files, fix_networks_file,
};
use crate::handlers::utils::{display_path, plural};

/// Declare used infrastructure networks as external in every non-infrastructure
/// compose file under `path`. Returns false when any file failed.
pub fn handle_networks(path: &Path, dry_run: bool, config: &ComposeConfig) -> crate::Result<bool> {
    let files = find_compose_files(path, config, Scope::SkipInfrastructure)?;

    if files.is_empty() {
        println!("No {} files found.", config.file_name);
        return Ok(true);
    }

    let mut updated = 0;
    let mut failed = 0;

    for file in &files {
        let shown = display_path(path, file);
        match fix_networks_file(file, config, dry_run) {
            Ok(changes) if changes.is_empty() => {}
            Ok(changes) => {
                updated += 1;
                let verb = if dry_run { "Would update" } else { "Updated" };
                println!("{} {}", format!("{}:", verb).green(), shown);
                for change in &changes {
                    match change {
                        NetworkChange::Added(name) => {
                            println!("  + networks.{}.external: true", name)
                        }
                        NetworkChange::MadeExternal(name) => {
                            println!("  ~ networks.{} set to external", name)
                        }
                    }
                }
            }
            Err(err) => {
                failed += 1;
                log::warn!("{}", err);
                eprintln!("{} {}", "Failed:".red().bold(), err);
            }
        }
    }

    println!(
        "\n{} checked: {} updated, {} failed",
        plural(files.len(), "file", "files"),
        updated,
        failed
    );

    Ok(failed == 0)
}
