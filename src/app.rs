//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use teams_notify::card::CardError;
use teams_notify::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    use crate::run::RunError;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, bad URL, invalid card, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, rejected delivery, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Maps a run failure to its exit code.
    pub fn for_run_error(error: &RunError) -> ExitCode {
        if error.is_delivery() {
            runtime_error()
        } else {
            CONFIG_ERROR
        }
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::URL => {
            eprintln!("\nRun 'teams-notify init' to generate a configuration template.");
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'teams-notify init' to generate a configuration template.");
        }
        ConfigError::InvalidUrl(_) => {
            eprintln!(
                "\nUse --url-prefix/--url-pattern to accept this host, or --no-validate-url to skip the check."
            );
        }
        _ => {}
    }
}

/// Prints helpful hints for common run failures.
pub fn print_run_hint(error: &RunError) {
    if let RunError::Card(CardError::MissingTextOrSummary) = error {
        eprintln!("\nTeams rejects cards without text; pass --text or --summary.");
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
