use clap::Parser;
use ctrlroute::cli::{run_cli, Cli};
use ctrlroute::logging::{init_logging_with_config, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::for_cli(cli.verbose);
    if let Err(e) = init_logging_with_config(&log_config) {
        eprintln!("Warning: {e}");
    }

    match run_cli(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
