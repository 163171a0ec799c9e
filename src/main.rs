use clap::Parser;
use compose_tidy::cli::Cli;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    match compose_tidy::run_command(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
