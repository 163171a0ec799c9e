use colored::*;
use std::path::PathBuf;

use crate::analyzer::compose::{ComposeConfig, check_service_order};

const HINT_KEYS: usize = 10;

/// Check service key order in explicit files. Returns whether all passed.
pub fn handle_check(files: &[PathBuf], config: &ComposeConfig) -> crate::Result<bool> {
    let mut problems: Vec<String> = Vec::new();

    for file in files {
        if !file.exists() {
            problems.push(format!("{}: File not found", file.display()));
            continue;
        }

        let outcome = std::fs::read_to_string(file)
            .map_err(|e| format!("Failed to read file: {}", e))
            .and_then(|content| {
                check_service_order(&content, config).map_err(|e| e.to_string())
            });

        match outcome {
            Ok(findings) if findings.is_empty() => {}
            Ok(findings) => {
                problems.push(format!("{}:", file.display()));
                problems.extend(findings.iter().map(|f| format!("  {}", f.message)));
            }
            Err(message) => {
                problems.push(format!("{}:", file.display()));
                problems.push(format!("  {}", message));
            }
        }
    }

    if problems.is_empty() {
        println!(
            "{}",
            "All Docker Compose files have correct key ordering.".green()
        );
        return Ok(true);
    }

    eprintln!("{}", "Docker Compose key ordering errors found:".red().bold());
    for problem in &problems {
        eprintln!("{}", problem);
    }

    let keys = config.policy.service.keys();
    eprintln!(
        "\nExpected key order: {}...",
        keys[..keys.len().min(HINT_KEYS)].join(", ")
    );
    eprintln!("Tip: Reorder keys to match the expected order above.");

    Ok(false)
}
