//! Governance facade.
//!
//! `GovernanceEngine` orchestrates the store, the scoring and adjustment
//! path, enforcement checks, seal verification, and the upgrade advisor,
//! and broadcasts governance events to interested observers.
//!
//! Reads that feed governance decisions verify the stored seal first and
//! refuse to act on tampered state; a seal mismatch is logged as a security
//! event and surfaced to the caller, never silently repaired.

use std::sync::Arc;

use cedar_seal::{SealVerification, Sealer};
use cedar_store::CeilingStore;
use cedar_types::{
    AdjustmentBand, CeilingConfig, ConfigId, GovernanceError, GovernanceEvent, ListFilter,
    PerformanceSample, PerformanceScore, Result, TenantStatus, TierName, UpgradeRecommendation,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use crate::advisor::{AdvisorConfig, UpgradeAdvisor, UtilizationTracker};
use crate::adjust::AdjustmentPolicy;
use crate::enforce::{enforce, CeilingKind, EnforcementOutcome};
use crate::scoring::ScoringEngine;

/// Log target for tamper alerts; routed separately from operational logs.
const SECURITY_TARGET: &str = "cedar::security";

/// Outcome of one reported performance window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// The config after adjustment (re-sealed).
    pub config: CeilingConfig,

    /// The score that drove the adjustment.
    pub score: PerformanceScore,

    /// The band the score landed in.
    pub band: AdjustmentBand,
}

/// The governance engine facade.
pub struct GovernanceEngine {
    store: Arc<dyn CeilingStore>,
    sealer: Sealer,
    utilization: UtilizationTracker,
    advisor_config: AdvisorConfig,
    event_tx: broadcast::Sender<GovernanceEvent>,
}

impl GovernanceEngine {
    /// Create an engine over a store.
    pub fn new(store: Arc<dyn CeilingStore>) -> Self {
        let (event_tx, _) = broadcast::channel(1024);
        Self {
            store,
            sealer: Sealer::new("cedar-engine"),
            utilization: UtilizationTracker::new(),
            advisor_config: AdvisorConfig::default(),
            event_tx,
        }
    }

    /// Override the advisor tuning knobs.
    pub fn with_advisor_config(mut self, advisor_config: AdvisorConfig) -> Self {
        self.advisor_config = advisor_config;
        self
    }

    /// Subscribe to governance events.
    pub fn subscribe(&self) -> broadcast::Receiver<GovernanceEvent> {
        self.event_tx.subscribe()
    }

    /// Onboard a tenant at a tier's baseline ceilings.
    #[instrument(skip(self), fields(config_id = %config_id, tier = %tier))]
    pub async fn onboard(&self, config_id: ConfigId, tier: TierName) -> Result<CeilingConfig> {
        let config = self.store.create(config_id.clone(), tier).await?;
        self.emit(GovernanceEvent::ConfigCreated { config_id, tier });
        info!(config_id = %config.config_id, tier = %tier, "tenant onboarded");
        Ok(config)
    }

    /// Fetch a config snapshot without seal verification.
    pub async fn get(&self, config_id: &ConfigId) -> Result<CeilingConfig> {
        self.store.get(config_id).await
    }

    /// List config snapshots.
    pub async fn list(&self, filter: ListFilter) -> Result<Vec<CeilingConfig>> {
        self.store.list(filter).await
    }

    /// Score a sample against the stored baseline. Pure: no store
    /// mutation, no utilization update, no event.
    pub async fn score(
        &self,
        config_id: &ConfigId,
        sample: &PerformanceSample,
    ) -> Result<PerformanceScore> {
        let config = self.verified_get(config_id).await?;
        ScoringEngine::score(&config, sample)
    }

    /// Report a completed performance window: score it, run the adjustment
    /// policy, track utilization, and broadcast the outcome. Mutation,
    /// history append, and re-seal happen atomically inside the store.
    #[instrument(skip(self, sample), fields(config_id = %config_id, window = %sample.sample_window_id))]
    pub async fn report_performance(
        &self,
        config_id: &ConfigId,
        sample: PerformanceSample,
    ) -> Result<PerformanceReport> {
        let config = self.verified_get(config_id).await?;
        let score = ScoringEngine::score(&config, &sample)?;

        // Utilization is measured against the ceilings that governed the
        // window, i.e. before this adjustment lands.
        self.utilization
            .record_budget(config_id, sample.observed_spend_usd / config.budget_usd);

        let updated = self
            .store
            .update(config_id, AdjustmentPolicy::mutator(score))
            .await?;
        let band = AdjustmentPolicy::classify(score.composite);

        self.emit(GovernanceEvent::CeilingAdjusted {
            config_id: config_id.clone(),
            band,
            composite: score.composite,
        });
        info!(
            config_id = %config_id,
            band = %band,
            composite = score.composite,
            budget_usd = updated.budget_usd,
            rate_limit_per_hour = updated.rate_limit_per_hour,
            "ceilings adjusted"
        );

        Ok(PerformanceReport {
            config: updated,
            score,
            band,
        })
    }

    /// Check an observed value against a tenant's current ceiling. Pure
    /// with respect to governance state; budget and rate observations also
    /// feed the ephemeral utilization gauge the advisor reads.
    pub async fn enforce(
        &self,
        config_id: &ConfigId,
        kind: CeilingKind,
        observed: f64,
    ) -> Result<EnforcementOutcome> {
        let config = self.verified_get(config_id).await?;
        let outcome = enforce(&config, kind, observed);

        match kind {
            CeilingKind::Budget => {
                self.utilization
                    .record_budget(config_id, observed / outcome.configured_limit);
            }
            CeilingKind::RateLimit => {
                self.utilization
                    .record_rate(config_id, observed / outcome.configured_limit);
            }
            _ => {}
        }

        Ok(outcome)
    }

    /// Verify a tenant's stored seal. Returns the verification report; a
    /// mismatch is logged as a security event and broadcast, never
    /// repaired.
    pub async fn verify_seal(&self, config_id: &ConfigId) -> Result<SealVerification> {
        let config = self.store.get(config_id).await?;
        let verification = self.sealer.verify(&config)?;
        if !verification.is_valid() {
            self.raise_seal_alert(config_id);
        }
        Ok(verification)
    }

    /// Produce an upgrade recommendation from the latest sealed state.
    #[instrument(skip(self), fields(config_id = %config_id))]
    pub async fn recommend(&self, config_id: &ConfigId) -> Result<UpgradeRecommendation> {
        let config = self.verified_get(config_id).await?;
        let recommendation = UpgradeAdvisor::recommend(
            &config,
            self.utilization.get(config_id),
            &self.advisor_config,
        );

        self.emit(GovernanceEvent::RecommendationIssued {
            config_id: config_id.clone(),
            target_tier: recommendation.target_tier,
            urgency: recommendation.urgency,
        });
        Ok(recommendation)
    }

    /// Explicit tier change; ceilings reset to the new baseline and the
    /// stale utilization gauge is dropped.
    #[instrument(skip(self), fields(config_id = %config_id, tier = %tier))]
    pub async fn change_tier(&self, config_id: &ConfigId, tier: TierName) -> Result<CeilingConfig> {
        let from = self.store.get(config_id).await?.tier;
        let config = self.store.change_tier(config_id, tier).await?;
        self.utilization.reset(config_id);

        self.emit(GovernanceEvent::TierChanged {
            config_id: config_id.clone(),
            from,
            to: tier,
        });
        info!(config_id = %config_id, from = %from, to = %tier, "tier changed");
        Ok(config)
    }

    /// Flag a tenant inactive; the record and its audit trail are kept.
    #[instrument(skip(self), fields(config_id = %config_id))]
    pub async fn deactivate(&self, config_id: &ConfigId) -> Result<CeilingConfig> {
        let config = self.store.deactivate(config_id).await?;
        self.emit(GovernanceEvent::ConfigDeactivated {
            config_id: config_id.clone(),
        });
        Ok(config)
    }

    /// Dashboard snapshot for one tenant. Read-only: never adjusts, never
    /// appends history.
    pub async fn status(&self, config_id: &ConfigId) -> Result<TenantStatus> {
        let config = self.store.get(config_id).await?;
        self.assemble_status(&config)
    }

    /// Dashboard snapshot for every tenant.
    pub async fn status_all(&self) -> Result<Vec<TenantStatus>> {
        let configs = self.store.list(ListFilter::default()).await?;
        configs
            .iter()
            .map(|config| self.assemble_status(config))
            .collect()
    }

    /// Number of stored configs.
    pub async fn tenant_count(&self) -> Result<usize> {
        self.store.count().await
    }

    fn assemble_status(&self, config: &CeilingConfig) -> Result<TenantStatus> {
        let seal_valid = self.sealer.verify(config)?.is_valid();
        if !seal_valid {
            self.raise_seal_alert(&config.config_id);
        }

        // Recommendations are only meaningful for intact, active configs;
        // assembling one is pure and emits nothing.
        let recommendation = (seal_valid && config.active).then(|| {
            UpgradeAdvisor::recommend(
                config,
                self.utilization.get(&config.config_id),
                &self.advisor_config,
            )
        });

        Ok(TenantStatus::from_config(config, seal_valid, recommendation))
    }

    /// Get a config and refuse to proceed when its seal does not match.
    async fn verified_get(&self, config_id: &ConfigId) -> Result<CeilingConfig> {
        let config = self.store.get(config_id).await?;
        if !self.sealer.verify(&config)?.is_valid() {
            self.raise_seal_alert(config_id);
            return Err(GovernanceError::SealInvalid(config_id.clone()));
        }
        Ok(config)
    }

    fn raise_seal_alert(&self, config_id: &ConfigId) {
        warn!(
            target: SECURITY_TARGET,
            config_id = %config_id,
            "seal verification failed; stored config does not match its seal"
        );
        self.emit(GovernanceEvent::SealVerificationFailed {
            config_id: config_id.clone(),
        });
    }

    fn emit(&self, event: GovernanceEvent) {
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cedar_store::{InMemoryCeilingStore, Mutator};
    use cedar_types::{AdjustmentBand, Urgency};

    fn create_test_engine() -> GovernanceEngine {
        GovernanceEngine::new(Arc::new(InMemoryCeilingStore::new()))
    }

    fn sample(success: f64, latency: f64, spend: f64) -> PerformanceSample {
        PerformanceSample {
            observed_success_rate: success,
            observed_latency_seconds: latency,
            observed_spend_usd: spend,
            sample_window_id: "w-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_excellent_window_raises_ceilings() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        let report = engine
            .report_performance(&id, sample(0.95, 60.0, 40.0))
            .await
            .unwrap();

        assert_eq!(report.band, AdjustmentBand::Excellent);
        assert_eq!(report.config.budget_usd, 62.5);
        assert_eq!(report.config.rate_limit_per_hour, 150.0);
        assert_eq!(report.config.adjustment_history.len(), 2);
    }

    #[tokio::test]
    async fn test_poor_window_lowers_ceilings_to_floor() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        let report = engine
            .report_performance(&id, sample(0.50, 200.0, 45.0))
            .await
            .unwrap();

        assert_eq!(report.band, AdjustmentBand::Poor);
        assert_eq!(report.config.budget_usd, 50.0 * 0.80);
        assert_eq!(report.config.rate_limit_per_hour, 100.0 * 0.70);

        // Further poor windows floor at the baseline.
        for _ in 0..5 {
            engine
                .report_performance(&id, sample(0.50, 200.0, 45.0))
                .await
                .unwrap();
        }
        let config = engine.get(&id).await.unwrap();
        assert_eq!(config.budget_usd, 50.0);
        assert_eq!(config.rate_limit_per_hour, 100.0);
    }

    #[tokio::test]
    async fn test_stable_window_appends_history_without_value_change() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        // Composite ~1.0: all three ratios near 1.
        for _ in 0..3 {
            let report = engine
                .report_performance(&id, sample(0.90, 120.0, 50.0))
                .await
                .unwrap();
            assert_eq!(report.band, AdjustmentBand::Stable);
        }

        let config = engine.get(&id).await.unwrap();
        assert_eq!(config.budget_usd, 50.0);
        assert_eq!(config.rate_limit_per_hour, 100.0);
        assert_eq!(config.adjustment_history.len(), 4);
    }

    #[tokio::test]
    async fn test_score_has_no_side_effects() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        let first = engine.score(&id, &sample(0.95, 60.0, 40.0)).await.unwrap();
        let second = engine.score(&id, &sample(0.95, 60.0, 40.0)).await.unwrap();
        assert_eq!(first, second);

        let config = engine.get(&id).await.unwrap();
        assert_eq!(config.adjustment_history.len(), 1);
        assert_eq!(config.budget_usd, 50.0);
    }

    #[tokio::test]
    async fn test_enforce_reports_margin() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine
            .onboard(id.clone(), TierName::Professional)
            .await
            .unwrap();

        let outcome = engine
            .enforce(&id, CeilingKind::Latency, 45.0)
            .await
            .unwrap();
        assert!(outcome.within_ceiling);
        assert_eq!(outcome.configured_limit, 60.0);
        assert_eq!(outcome.margin, 15.0);
    }

    #[tokio::test]
    async fn test_enforce_unknown_tenant() {
        let engine = create_test_engine();
        let err = engine
            .enforce(&ConfigId::new("ghost"), CeilingKind::Budget, 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::UnknownTenant(_)));
    }

    #[tokio::test]
    async fn test_verify_seal_on_intact_config() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        let verification = engine.verify_seal(&id).await.unwrap();
        assert!(verification.is_valid());
    }

    #[tokio::test]
    async fn test_sustained_excellence_recommendation() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        for _ in 0..3 {
            engine
                .report_performance(&id, sample(0.95, 60.0, 10.0))
                .await
                .unwrap();
        }

        let recommendation = engine.recommend(&id).await.unwrap();
        assert_eq!(recommendation.target_tier, TierName::Professional);
        assert_eq!(recommendation.projected_roi_multiple, 2.5);
        assert!(recommendation.urgency >= Urgency::Medium);
    }

    #[tokio::test]
    async fn test_enforce_feeds_rate_utilization() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        // 95 of 100 requests/hour used.
        engine
            .enforce(&id, CeilingKind::RateLimit, 95.0)
            .await
            .unwrap();

        let recommendation = engine.recommend(&id).await.unwrap();
        assert!(recommendation
            .reasons
            .iter()
            .any(|r| matches!(r, cedar_types::UpgradeReason::RateUtilizationHigh { .. })));
    }

    #[tokio::test]
    async fn test_tier_change_resets_utilization_gauge() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        engine
            .enforce(&id, CeilingKind::Budget, 49.0)
            .await
            .unwrap();
        engine
            .change_tier(&id, TierName::Professional)
            .await
            .unwrap();

        let recommendation = engine.recommend(&id).await.unwrap();
        assert!(recommendation.reasons.is_empty());
    }

    #[tokio::test]
    async fn test_status_is_read_only() {
        let engine = create_test_engine();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();
        engine
            .report_performance(&id, sample(0.95, 60.0, 40.0))
            .await
            .unwrap();

        let history_len = engine.get(&id).await.unwrap().adjustment_history.len();

        let status = engine.status(&id).await.unwrap();
        assert!(status.seal_valid);
        assert!(status.latest_score.is_some());
        assert!(status.recommendation.is_some());

        let statuses = engine.status_all().await.unwrap();
        assert_eq!(statuses.len(), 1);

        // Reading status appended nothing and adjusted nothing.
        let config = engine.get(&id).await.unwrap();
        assert_eq!(config.adjustment_history.len(), history_len);
        assert_eq!(config.budget_usd, 62.5);
    }

    #[tokio::test]
    async fn test_events_are_broadcast() {
        let engine = create_test_engine();
        let mut events = engine.subscribe();
        let id = ConfigId::new("tenant-1");

        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();
        engine
            .report_performance(&id, sample(0.95, 60.0, 40.0))
            .await
            .unwrap();

        assert!(matches!(
            events.recv().await.unwrap(),
            GovernanceEvent::ConfigCreated { .. }
        ));
        assert!(matches!(
            events.recv().await.unwrap(),
            GovernanceEvent::CeilingAdjusted {
                band: AdjustmentBand::Excellent,
                ..
            }
        ));
    }

    /// Store wrapper that corrupts every read, for exercising the tamper
    /// path end to end.
    struct TamperingStore {
        inner: InMemoryCeilingStore,
    }

    #[async_trait]
    impl CeilingStore for TamperingStore {
        async fn create(&self, config_id: ConfigId, tier: TierName) -> Result<CeilingConfig> {
            self.inner.create(config_id, tier).await
        }

        async fn get(&self, config_id: &ConfigId) -> Result<CeilingConfig> {
            let mut config = self.inner.get(config_id).await?;
            config.budget_usd += 1_000_000.0;
            Ok(config)
        }

        async fn list(&self, filter: ListFilter) -> Result<Vec<CeilingConfig>> {
            self.inner.list(filter).await
        }

        async fn update(&self, config_id: &ConfigId, mutator: Mutator) -> Result<CeilingConfig> {
            self.inner.update(config_id, mutator).await
        }
    }

    #[tokio::test]
    async fn test_tampered_state_is_refused_and_alerted() {
        let store = TamperingStore {
            inner: InMemoryCeilingStore::new(),
        };
        let engine = GovernanceEngine::new(Arc::new(store));
        let mut events = engine.subscribe();
        let id = ConfigId::new("tenant-1");
        engine.onboard(id.clone(), TierName::Freemium).await.unwrap();

        let err = engine
            .enforce(&id, CeilingKind::Budget, 1.0)
            .await
            .unwrap_err();
        assert_eq!(err, GovernanceError::SealInvalid(id.clone()));

        let verification = engine.verify_seal(&id).await.unwrap();
        assert!(!verification.is_valid());

        // Dashboard still answers, flagging the seal instead of failing.
        let status = engine.status(&id).await.unwrap();
        assert!(!status.seal_valid);
        assert!(status.recommendation.is_none());

        // ConfigCreated first, then the tamper alert.
        events.recv().await.unwrap();
        assert!(matches!(
            events.recv().await.unwrap(),
            GovernanceEvent::SealVerificationFailed { .. }
        ));
    }
}
