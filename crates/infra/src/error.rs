//! Error types for declaring and synthesizing stacks.

use thiserror::Error;

/// Result type alias for the infra crate.
pub type Result<T> = std::result::Result<T, InfraError>;

/// Errors that can occur while building or synthesizing the construct tree.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Invalid construct id '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },

    #[error("There is already a construct with id '{id}' in '{scope}'")]
    DuplicateId { scope: String, id: String },

    #[error("Invalid table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
