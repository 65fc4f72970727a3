use std::process::ExitCode;

use clap::Parser;

/// Entry point for the dmem container memory reporting tool.
///
/// Parses command line arguments, configures logging verbosity, and renders
/// one memory report for the currently running Docker containers.
///
/// # Examples
///
/// ```bash
/// dmem --details --output json
/// ```
fn main() -> ExitCode {
    let args = dmem::cli::Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();

    match dmem::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
