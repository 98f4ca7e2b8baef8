use std::process::ExitCode;

use clap::Parser;
use newc::cli::{run_cli, Cli};
use newc::logging::{init_logging, LogConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    if let Err(e) = init_logging(&log_config) {
        eprintln!("newc: {e:#}");
    }

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("newc: {e:#}");
            ExitCode::FAILURE
        }
    }
}
