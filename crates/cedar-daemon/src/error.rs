//! Daemon error types.

use thiserror::Error;

/// Daemon-level errors (startup, configuration, serving).
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

/// Result type for daemon operations.
pub type DaemonResult<T> = std::result::Result<T, DaemonError>;
