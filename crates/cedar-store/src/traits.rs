//! Ceiling store trait definition.

use async_trait::async_trait;
use cedar_types::{
    AdjustmentCause, AdjustmentEntry, AppliedDeltas, CeilingConfig, ConfigId, ListFilter, Result,
    TierCatalog, TierName,
};

/// A mutation applied to a config under its write lock. Returns the history
/// entry to append; the store validates, appends, re-seals, and publishes as
/// one atomic unit.
pub type Mutator = Box<dyn FnOnce(&mut CeilingConfig) -> AdjustmentEntry + Send>;

/// Trait for ceiling config storage backends.
#[async_trait]
pub trait CeilingStore: Send + Sync {
    /// Create a config at a tier's baseline. Fails with `AlreadyExists` if
    /// the id is taken.
    async fn create(&self, config_id: ConfigId, tier: TierName) -> Result<CeilingConfig>;

    /// Fetch a config snapshot. Fails with `UnknownTenant` if absent.
    async fn get(&self, config_id: &ConfigId) -> Result<CeilingConfig>;

    /// List config snapshots matching the filter.
    async fn list(&self, filter: ListFilter) -> Result<Vec<CeilingConfig>>;

    /// Apply a mutation under the per-key write lock, append exactly one
    /// history entry, re-seal, and publish. Fails with `LockTimeout` if the
    /// lock cannot be acquired within the backend's bound.
    async fn update(&self, config_id: &ConfigId, mutator: Mutator) -> Result<CeilingConfig>;

    /// Explicit tier change: ceilings reset to the new tier's baseline.
    async fn change_tier(&self, config_id: &ConfigId, tier: TierName) -> Result<CeilingConfig> {
        self.update(
            config_id,
            Box::new(move |config| {
                let from = config.tier;
                let baseline = &TierCatalog::get(tier).baseline;
                let deltas = AppliedDeltas {
                    budget_usd_before: config.budget_usd,
                    budget_usd_after: baseline.budget_usd,
                    rate_limit_before: config.rate_limit_per_hour,
                    rate_limit_after: baseline.rate_limit_per_hour,
                };

                config.tier = tier;
                config.budget_usd = baseline.budget_usd;
                config.latency_ceiling_seconds = baseline.latency_ceiling_seconds;
                config.trust_threshold = baseline.trust_threshold;
                config.success_rate_floor = baseline.success_rate_floor;
                config.rate_limit_per_hour = baseline.rate_limit_per_hour;

                AdjustmentEntry {
                    timestamp: chrono::Utc::now(),
                    score: None,
                    cause: AdjustmentCause::TierChanged { from, to: tier },
                    deltas,
                }
            }),
        )
        .await
    }

    /// Flag a config inactive. The record, its history, and its seal are
    /// retained for audit continuity.
    async fn deactivate(&self, config_id: &ConfigId) -> Result<CeilingConfig> {
        self.update(
            config_id,
            Box::new(|config| {
                let deltas = AppliedDeltas::unchanged(config);
                config.active = false;
                AdjustmentEntry {
                    timestamp: chrono::Utc::now(),
                    score: None,
                    cause: AdjustmentCause::Deactivated,
                    deltas,
                }
            }),
        )
        .await
    }

    /// Check whether a config exists.
    async fn exists(&self, config_id: &ConfigId) -> Result<bool> {
        match self.get(config_id).await {
            Ok(_) => Ok(true),
            Err(cedar_types::GovernanceError::UnknownTenant(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Number of stored configs (active and inactive).
    async fn count(&self) -> Result<usize> {
        Ok(self.list(ListFilter::default()).await?.len())
    }
}
