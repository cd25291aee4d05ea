//! Governance events.
//!
//! The engine facade broadcasts these so operational surfaces (daemon,
//! monitors) can observe governance activity without polling the store.

use serde::{Deserialize, Serialize};

use crate::config::AdjustmentBand;
use crate::ids::ConfigId;
use crate::recommend::Urgency;
use crate::tier::TierName;

/// Events emitted by the governance engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum GovernanceEvent {
    /// A tenant config was created.
    ConfigCreated { config_id: ConfigId, tier: TierName },

    /// The adjustment policy ran; band may be Stable (no value change).
    CeilingAdjusted {
        config_id: ConfigId,
        band: AdjustmentBand,
        composite: f64,
    },

    /// An explicit tier change reset the ceilings.
    TierChanged {
        config_id: ConfigId,
        from: TierName,
        to: TierName,
    },

    /// A config was flagged inactive.
    ConfigDeactivated { config_id: ConfigId },

    /// Seal verification detected tamper or corruption. Surfaced, never
    /// auto-repaired.
    SealVerificationFailed { config_id: ConfigId },

    /// The advisor issued a recommendation.
    RecommendationIssued {
        config_id: ConfigId,
        target_tier: TierName,
        urgency: Urgency,
    },
}
