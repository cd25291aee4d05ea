//! CLI error types and exit codes.
//!
//! Every fault class maps to a distinct process exit code so scripts and
//! the execution pipeline can branch on the outcome without parsing text.

use thiserror::Error;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { kind: String, message: String },

    #[error("seal verification failed for {0}")]
    SealInvalid(String),

    #[error("ceiling violated: observed {observed} against limit {limit} (margin {margin})")]
    CeilingViolation {
        observed: f64,
        limit: f64,
        margin: f64,
    },

    #[error("unexpected response: {0}")]
    Protocol(String),
}

impl CliError {
    /// Distinct exit code per fault class; 0 is success, 1 is the generic
    /// transport/other failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Api { kind, .. } => match kind.as_str() {
                "unknown_tenant" => 2,
                "seal_invalid" => 3,
                "already_exists" => 5,
                "invalid_sample" => 6,
                "unknown_ceiling_type" => 7,
                "lock_timeout" => 8,
                _ => 1,
            },
            CliError::SealInvalid(_) => 3,
            CliError::CeilingViolation { .. } => 4,
            CliError::Transport(_) | CliError::Protocol(_) => 1,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = std::result::Result<T, CliError>;
