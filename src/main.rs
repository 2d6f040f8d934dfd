//! CLI entry point for the tile anomaly detector generator

use std::process::ExitCode;

use clap::Parser;
use tilebloom::io::cli::{Cli, ConfigProcessor, usage_exit};
use tilebloom::io::logging::init_logging;

// Allow print for the fatal error message
#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_exit(&err),
    };

    init_logging(cli.quiet);

    match ConfigProcessor::new(cli).process() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
