//! Per-tenant ceiling configuration.
//!
//! A `CeilingConfig` is the unit of governance: one per tenant, created at
//! onboarding with tier defaults, mutated only through the adjustment policy
//! or an explicit tier change, never deleted (only marked inactive), and
//! sealed on every write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ConfigId;
use crate::sample::PerformanceScore;
use crate::tier::{TierCatalog, TierName};

/// Enforceable ceiling set for one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingConfig {
    /// Tenant identifier; unique across the store.
    pub config_id: ConfigId,

    /// Current service tier. Mutable only through an explicit tier change,
    /// never through the adjustment policy.
    pub tier: TierName,

    /// Spend ceiling in USD.
    pub budget_usd: f64,

    /// Latency ceiling in seconds.
    pub latency_ceiling_seconds: f64,

    /// Trust threshold in [0, 1] (floor-type ceiling).
    pub trust_threshold: f64,

    /// Required success rate in [0, 1] (floor-type ceiling).
    pub success_rate_floor: f64,

    /// Request-rate ceiling per hour.
    pub rate_limit_per_hour: f64,

    /// Inactive configs are retained for audit continuity.
    pub active: bool,

    /// When the config was created.
    pub created_at: DateTime<Utc>,

    /// When a ceiling was last adjusted.
    pub last_adjusted_at: DateTime<Utc>,

    /// Append-only record of every adjustment, including no-ops.
    pub adjustment_history: Vec<AdjustmentEntry>,

    /// Latest seal, absent only before the first sealing.
    pub seal: Option<SecuritySeal>,
}

impl CeilingConfig {
    /// Create a config at a tier's baseline ceilings. The caller is
    /// responsible for sealing before the config becomes visible.
    pub fn at_baseline(config_id: ConfigId, tier: TierName, now: DateTime<Utc>) -> Self {
        let baseline = &TierCatalog::get(tier).baseline;
        Self {
            config_id,
            tier,
            budget_usd: baseline.budget_usd,
            latency_ceiling_seconds: baseline.latency_ceiling_seconds,
            trust_threshold: baseline.trust_threshold,
            success_rate_floor: baseline.success_rate_floor,
            rate_limit_per_hour: baseline.rate_limit_per_hour,
            active: true,
            created_at: now,
            last_adjusted_at: now,
            adjustment_history: Vec::new(),
            seal: None,
        }
    }

    /// Check the config invariants: every numeric ceiling strictly positive,
    /// floor-type ceilings inside [0, 1].
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.budget_usd <= 0.0 {
            return Err(ConfigValidationError::NonPositiveCeiling("budget_usd"));
        }
        if self.latency_ceiling_seconds <= 0.0 {
            return Err(ConfigValidationError::NonPositiveCeiling(
                "latency_ceiling_seconds",
            ));
        }
        if self.rate_limit_per_hour <= 0.0 {
            return Err(ConfigValidationError::NonPositiveCeiling(
                "rate_limit_per_hour",
            ));
        }
        if !(0.0..=1.0).contains(&self.trust_threshold) {
            return Err(ConfigValidationError::OutOfUnitRange("trust_threshold"));
        }
        if !(0.0..=1.0).contains(&self.success_rate_floor) {
            return Err(ConfigValidationError::OutOfUnitRange("success_rate_floor"));
        }
        Ok(())
    }
}

/// Config invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("ceiling {0} must be strictly positive")]
    NonPositiveCeiling(&'static str),

    #[error("{0} must lie in [0, 1]")]
    OutOfUnitRange(&'static str),
}

/// Tamper-evident seal over a config snapshot.
///
/// `subject_hash` is the hex SHA-256 digest of the canonical serialization
/// of every config field except `seal` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySeal {
    pub subject_hash: String,

    /// When the seal was computed.
    pub sealed_at: DateTime<Utc>,

    /// Identity of the sealing component.
    pub sealer_id: String,
}

/// Band the adjustment policy placed a composite score in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentBand {
    /// composite > 1.3
    Excellent,
    /// 1.1 < composite <= 1.3
    Good,
    /// 0.8 <= composite <= 1.1
    Stable,
    /// composite < 0.8
    Poor,
}

impl std::fmt::Display for AdjustmentBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentBand::Excellent => write!(f, "excellent"),
            AdjustmentBand::Good => write!(f, "good"),
            AdjustmentBand::Stable => write!(f, "stable"),
            AdjustmentBand::Poor => write!(f, "poor"),
        }
    }
}

/// Why a history entry was appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AdjustmentCause {
    /// Config created at tier baseline.
    Created,

    /// The adjustment policy ran against a performance score.
    Scored { band: AdjustmentBand },

    /// Explicit tier change; ceilings reset to the new baseline.
    TierChanged { from: TierName, to: TierName },

    /// Config flagged inactive.
    Deactivated,
}

impl std::fmt::Display for AdjustmentCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentCause::Created => write!(f, "created"),
            AdjustmentCause::Scored { band } => write!(f, "scored ({})", band),
            AdjustmentCause::TierChanged { from, to } => {
                write!(f, "tier-changed ({} -> {})", from, to)
            }
            AdjustmentCause::Deactivated => write!(f, "deactivated"),
        }
    }
}

/// Ceiling values before and after one adjustment. Zero-delta entries are
/// recorded too so that "no adjustment" is itself auditable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedDeltas {
    pub budget_usd_before: f64,
    pub budget_usd_after: f64,
    pub rate_limit_before: f64,
    pub rate_limit_after: f64,
}

impl AppliedDeltas {
    /// Deltas recording no change to either ceiling.
    pub fn unchanged(config: &CeilingConfig) -> Self {
        Self {
            budget_usd_before: config.budget_usd,
            budget_usd_after: config.budget_usd,
            rate_limit_before: config.rate_limit_per_hour,
            rate_limit_after: config.rate_limit_per_hour,
        }
    }

    /// Whether the entry changed anything.
    pub fn is_noop(&self) -> bool {
        self.budget_usd_before == self.budget_usd_after
            && self.rate_limit_before == self.rate_limit_after
    }
}

/// One append-only audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentEntry {
    pub timestamp: DateTime<Utc>,

    /// The score that drove the adjustment, absent for administrative
    /// transitions (create, tier change, deactivate).
    pub score: Option<PerformanceScore>,

    pub cause: AdjustmentCause,

    pub deltas: AppliedDeltas,
}

/// Filter for listing configs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Only configs with this active flag.
    pub active: Option<bool>,

    /// Only configs at this tier.
    pub tier: Option<TierName>,
}

impl ListFilter {
    /// Whether a config passes the filter.
    pub fn matches(&self, config: &CeilingConfig) -> bool {
        if let Some(active) = self.active {
            if config.active != active {
                return false;
            }
        }
        if let Some(tier) = self.tier {
            if config.tier != tier {
                return false;
            }
        }
        true
    }
}
