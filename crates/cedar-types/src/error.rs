//! Governance error taxonomy.
//!
//! Every public engine operation returns a tagged result over this enum.
//! Caller errors (unknown tenant, duplicate create, bad sample, unknown
//! ceiling type) never corrupt stored state; `SealInvalid` is additionally
//! logged as a security event where it is detected.

use thiserror::Error;

use crate::ids::ConfigId;

/// Governance errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GovernanceError {
    #[error("unknown tenant: {0}")]
    UnknownTenant(ConfigId),

    #[error("config already exists: {0}")]
    AlreadyExists(ConfigId),

    #[error("invalid sample: {0}")]
    InvalidSample(String),

    #[error("unknown ceiling type: {0}")]
    UnknownCeilingType(String),

    #[error("seal verification failed for {0}")]
    SealInvalid(ConfigId),

    #[error("lock acquisition timed out for {0}")]
    LockTimeout(ConfigId),

    #[error("config invariant violated: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl GovernanceError {
    /// Whether the caller may retry the operation unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GovernanceError::LockTimeout(_))
    }

    /// Stable machine-readable kind, used by the daemon's error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            GovernanceError::UnknownTenant(_) => "unknown_tenant",
            GovernanceError::AlreadyExists(_) => "already_exists",
            GovernanceError::InvalidSample(_) => "invalid_sample",
            GovernanceError::UnknownCeilingType(_) => "unknown_ceiling_type",
            GovernanceError::SealInvalid(_) => "seal_invalid",
            GovernanceError::LockTimeout(_) => "lock_timeout",
            GovernanceError::Validation(_) => "validation",
            GovernanceError::Storage(_) => "storage",
        }
    }
}

/// Result type for governance operations.
pub type Result<T> = std::result::Result<T, GovernanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_lock_timeout_is_retryable() {
        let id = ConfigId::new("t");
        assert!(GovernanceError::LockTimeout(id.clone()).is_retryable());
        assert!(!GovernanceError::UnknownTenant(id.clone()).is_retryable());
        assert!(!GovernanceError::SealInvalid(id).is_retryable());
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        let id = ConfigId::new("t");
        let kinds = [
            GovernanceError::UnknownTenant(id.clone()).kind(),
            GovernanceError::AlreadyExists(id.clone()).kind(),
            GovernanceError::InvalidSample("x".into()).kind(),
            GovernanceError::UnknownCeilingType("x".into()).kind(),
            GovernanceError::SealInvalid(id.clone()).kind(),
            GovernanceError::LockTimeout(id).kind(),
        ];
        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
