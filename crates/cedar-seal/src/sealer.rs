//! Seal computation and verification.

use cedar_types::{CeilingConfig, Result, SecuritySeal};
use sha2::{Digest, Sha256};

use crate::canonical::canonical_bytes;

/// Computes seals over ceiling configs.
#[derive(Debug, Clone)]
pub struct Sealer {
    sealer_id: String,
}

impl Sealer {
    /// Create a sealer with the given identity; the identity is recorded in
    /// every seal it produces.
    pub fn new(sealer_id: impl Into<String>) -> Self {
        Self {
            sealer_id: sealer_id.into(),
        }
    }

    /// Compute a seal over the config's current fields (excluding any
    /// existing seal).
    pub fn seal(&self, config: &CeilingConfig) -> Result<SecuritySeal> {
        Ok(SecuritySeal {
            subject_hash: subject_hash(config)?,
            sealed_at: chrono::Utc::now(),
            sealer_id: self.sealer_id.clone(),
        })
    }

    /// Recompute the digest and compare against the stored seal. Never
    /// mutates the config.
    pub fn verify(&self, config: &CeilingConfig) -> Result<SealVerification> {
        let computed = subject_hash(config)?;
        Ok(match &config.seal {
            None => SealVerification::Unsealed,
            Some(seal) if seal.subject_hash == computed => SealVerification::Valid,
            Some(seal) => SealVerification::Mismatch {
                expected: seal.subject_hash.clone(),
                computed,
            },
        })
    }
}

impl Default for Sealer {
    fn default() -> Self {
        Self::new("cedar-seal")
    }
}

/// Hex SHA-256 digest of the canonical sealed subject.
fn subject_hash(config: &CeilingConfig) -> Result<String> {
    let bytes = canonical_bytes(config)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Outcome of seal verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SealVerification {
    /// Stored seal matches the stored fields.
    Valid,

    /// Stored seal does not match; tamper or corruption.
    Mismatch { expected: String, computed: String },

    /// The config has never been sealed.
    Unsealed,
}

impl SealVerification {
    /// Whether the config's seal is intact.
    pub fn is_valid(&self) -> bool {
        matches!(self, SealVerification::Valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedar_types::{ConfigId, TierName};
    use chrono::Utc;

    fn create_sealed_config() -> CeilingConfig {
        let mut config =
            CeilingConfig::at_baseline(ConfigId::new("tenant-1"), TierName::Professional, Utc::now());
        let sealer = Sealer::default();
        config.seal = Some(sealer.seal(&config).unwrap());
        config
    }

    #[test]
    fn test_seal_roundtrip() {
        let config = create_sealed_config();
        let verification = Sealer::default().verify(&config).unwrap();
        assert!(verification.is_valid());
    }

    #[test]
    fn test_unsealed_config() {
        let config =
            CeilingConfig::at_baseline(ConfigId::new("tenant-1"), TierName::Freemium, Utc::now());
        let verification = Sealer::default().verify(&config).unwrap();
        assert_eq!(verification, SealVerification::Unsealed);
        assert!(!verification.is_valid());
    }

    #[test]
    fn test_tampering_any_field_breaks_seal() {
        let sealer = Sealer::default();

        let mut config = create_sealed_config();
        config.budget_usd += 1.0;
        assert!(!sealer.verify(&config).unwrap().is_valid());

        let mut config = create_sealed_config();
        config.trust_threshold = 0.1;
        assert!(!sealer.verify(&config).unwrap().is_valid());

        let mut config = create_sealed_config();
        config.active = false;
        assert!(!sealer.verify(&config).unwrap().is_valid());

        let mut config = create_sealed_config();
        config.tier = TierName::Enterprise;
        assert!(!sealer.verify(&config).unwrap().is_valid());
    }

    #[test]
    fn test_resealing_after_mutation_restores_validity() {
        let sealer = Sealer::default();
        let mut config = create_sealed_config();

        config.budget_usd *= 1.25;
        assert!(!sealer.verify(&config).unwrap().is_valid());

        config.seal = Some(sealer.seal(&config).unwrap());
        assert!(sealer.verify(&config).unwrap().is_valid());
    }

    #[test]
    fn test_mismatch_reports_both_hashes() {
        let sealer = Sealer::default();
        let mut config = create_sealed_config();
        let expected = config.seal.as_ref().unwrap().subject_hash.clone();

        config.rate_limit_per_hour *= 2.0;
        match sealer.verify(&config).unwrap() {
            SealVerification::Mismatch {
                expected: e,
                computed,
            } => {
                assert_eq!(e, expected);
                assert_ne!(computed, expected);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }
}
