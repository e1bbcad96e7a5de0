//! CLI-level errors and their exit codes.

use thiserror::Error;
use vinlookup_store::StoreError;

use crate::ExitCode;

/// Failures detected by the CLI itself, before or around service calls.
#[derive(Debug, Error)]
pub enum CliError {
    /// No API key from flag, environment, or settings.
    #[error(
        "No API key configured. Pass --api-key, set VINLOOKUP_API_KEY, or run `vinlookup config set-key <KEY>`."
    )]
    MissingApiKey,

    /// User input was rejected.
    #[error("{0}")]
    InvalidInput(String),
}

impl CliError {
    /// Exit code reported for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::MissingApiKey => ExitCode::MissingConfig,
            CliError::InvalidInput(_) => ExitCode::InvalidInput,
        }
    }
}

/// Maps any command failure to an exit code.
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Config(_)) => ExitCode::MissingConfig,
        _ => ExitCode::Error,
    }
}
