//! Dashboard status snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CeilingConfig;
use crate::ids::ConfigId;
use crate::recommend::UpgradeRecommendation;
use crate::sample::PerformanceScore;
use crate::tier::TierName;

/// Read-only per-tenant snapshot for the monitoring dashboard.
///
/// Assembling a status never mutates governance state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantStatus {
    pub config_id: ConfigId,
    pub tier: TierName,
    pub active: bool,

    /// Current ceilings.
    pub budget_usd: f64,
    pub latency_ceiling_seconds: f64,
    pub trust_threshold: f64,
    pub success_rate_floor: f64,
    pub rate_limit_per_hour: f64,

    /// Latest score from the adjustment history, if any scored entry exists.
    pub latest_score: Option<PerformanceScore>,

    /// Whether the stored seal matches the stored fields.
    pub seal_valid: bool,

    pub last_adjusted_at: DateTime<Utc>,

    /// Open recommendation, if the advisor was consulted.
    pub recommendation: Option<UpgradeRecommendation>,
}

impl TenantStatus {
    /// Build a status snapshot from a config plus externally computed
    /// seal validity and recommendation.
    pub fn from_config(
        config: &CeilingConfig,
        seal_valid: bool,
        recommendation: Option<UpgradeRecommendation>,
    ) -> Self {
        let latest_score = config
            .adjustment_history
            .iter()
            .rev()
            .find_map(|entry| entry.score);
        Self {
            config_id: config.config_id.clone(),
            tier: config.tier,
            active: config.active,
            budget_usd: config.budget_usd,
            latency_ceiling_seconds: config.latency_ceiling_seconds,
            trust_threshold: config.trust_threshold,
            success_rate_floor: config.success_rate_floor,
            rate_limit_per_hour: config.rate_limit_per_hour,
            latest_score,
            seal_valid,
            last_adjusted_at: config.last_adjusted_at,
            recommendation,
        }
    }
}
