//! Upgrade recommendations.

use serde::{Deserialize, Serialize};

use crate::tier::TierName;

/// How urgently an upgrade is recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
        }
    }
}

/// Trigger condition behind a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum UpgradeReason {
    /// Budget utilization above the advisory threshold.
    BudgetUtilizationHigh { utilization: f64 },

    /// Rate-limit utilization above the advisory threshold.
    RateUtilizationHigh { utilization: f64 },

    /// Composite score in the excellent band across recent windows.
    SustainedExcellence { windows: usize },

    /// A higher tier exists to move to.
    TierHeadroom,
}

impl std::fmt::Display for UpgradeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpgradeReason::BudgetUtilizationHigh { utilization } => {
                write!(f, "budget utilization at {:.0}%", utilization * 100.0)
            }
            UpgradeReason::RateUtilizationHigh { utilization } => {
                write!(f, "rate-limit utilization at {:.0}%", utilization * 100.0)
            }
            UpgradeReason::SustainedExcellence { windows } => {
                write!(f, "excellent performance across {} windows", windows)
            }
            UpgradeReason::TierHeadroom => write!(f, "a higher tier is available"),
        }
    }
}

/// Ranked upgrade recommendation; ephemeral output, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecommendation {
    /// Tier to move to. Equals the current tier when no higher tier exists.
    pub target_tier: TierName,

    pub urgency: Urgency,

    /// Fixed upgrade economics for the transition, from the tier catalog.
    pub projected_roi_multiple: f64,

    /// Trigger conditions met, in evaluation order.
    pub reasons: Vec<UpgradeReason>,
}
