use colored::*;
use std::path::Path;

use crate::analyzer::compose::{
    BatchReport, ComposeConfig, OutputFormat, Scope, find_compose_files, format_results,
    validate_file,
};
use crate::handlers::utils::display_path;

/// Validate every compose file under `path`. Returns whether the batch passed.
pub fn handle_validate(
    path: &Path,
    format: OutputFormat,
    config: &ComposeConfig,
) -> crate::Result<bool> {
    let files = find_compose_files(path, config, Scope::All)?;

    if files.is_empty() {
        println!("No {} files found.", config.file_name);
        return Ok(true);
    }

    log::info!("Validating {} {} files", files.len(), config.file_name);

    let mut report = BatchReport::default();
    for file in &files {
        let mut result = validate_file(file, config);
        result.file_path = display_path(path, file);
        report.push(result);
    }

    print!("{}", format_results(&report.results, format));

    if format == OutputFormat::Stylish {
        print_summary(&report);
    }

    Ok(report.success())
}

fn print_summary(report: &BatchReport) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "SUMMARY:".bold());
    println!("  Files checked: {}", report.files_checked());
    println!("  Files with issues: {}", report.files_with_issues());

    let errors = report.total_errors().to_string();
    let warnings = report.total_warnings().to_string();
    println!(
        "  Total errors: {}",
        if report.total_errors() > 0 { errors.red().bold() } else { errors.normal() }
    );
    println!(
        "  Total warnings: {}",
        if report.total_warnings() > 0 { warnings.yellow() } else { warnings.normal() }
    );

    if report.success() {
        println!("\n{}", "All files passed validation!".green().bold());
    } else {
        println!("\n{}", "Files with errors:".red().bold());
        for file in report.files_with_errors() {
            println!("  - {}", file);
        }
    }
}
