//! Tenant config identifier.

use serde::{Deserialize, Serialize};

/// Identifier of a tenant's ceiling configuration.
///
/// One `ConfigId` maps to exactly one [`crate::CeilingConfig`] in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigId(String);

impl ConfigId {
    /// Create a config ID from a tenant identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random config ID.
    pub fn generate() -> Self {
        Self(format!("tenant-{}", uuid::Uuid::new_v4()))
    }

    /// Get the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConfigId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
