//! Resource object checker for asserting JSON:API payloads from the shell.
//!
//! This binary delegates to `jsonapi_assertion::check_cli` for loading and
//! assertion, keeping the behaviour testable without spawning a process.

use std::io::{self, Write};
use std::process::ExitCode;

use jsonapi_assertion::AssertionSettings;
use jsonapi_assertion::check_cli::{CheckError, CheckOutcome, render_report, run_check};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Exit status for a resource object that failed validation.
const REJECTED: u8 = 1;
/// Exit status for configuration or input errors.
const CHECK_FAILED: u8 = 2;

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run() {
        Ok(CheckOutcome::Accepted) => ExitCode::SUCCESS,
        Ok(CheckOutcome::Rejected(_)) => ExitCode::from(REJECTED),
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::from(CHECK_FAILED)
        }
    }
}

fn run() -> Result<CheckOutcome, CheckError> {
    let settings =
        AssertionSettings::load_from_iter(std::env::args_os()).map_err(|e| CheckError::Config {
            message: e.to_string(),
        })?;
    let outcome = run_check(&settings)?;
    if let Some(report) = render_report(&outcome, settings.pretty)? {
        write_report(&report);
    }
    Ok(outcome)
}

fn write_report(report: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{report}") {
        drop(err);
    }
}
