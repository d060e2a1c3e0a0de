//! Binary entrypoint for the `phylocurate` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    let config = phylocurate::config::Config::load();
    phylocurate::telemetry::init(&config.log_filter);
    config.warn_rejected();

    match phylocurate::run(std::env::args(), &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
