//! CLI error types.

use pipeline_accelerator_infra::InfraError;
use thiserror::Error;

/// Result type alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error("Rule checks failed with {errors} error(s)")]
    ChecksFailed { errors: usize },
}
