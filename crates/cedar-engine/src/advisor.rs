//! Upgrade advisor.
//!
//! Combines current utilization, recent scoring history, and the tier
//! catalog's documented upgrade economics into a ranked recommendation.
//! The ROI multiple is a fixed constant from the catalog, not a derived
//! metric.

use chrono::{DateTime, Utc};
use cedar_types::{
    AdjustmentBand, AdjustmentCause, CeilingConfig, ConfigId, TierCatalog, TierName,
    UpgradeReason, UpgradeRecommendation, Urgency,
};
use dashmap::DashMap;

/// Advisor tuning knobs.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Utilization fraction above which a ceiling counts as near-exhausted.
    pub utilization_threshold: f64,

    /// Number of consecutive scored windows that must land in the
    /// excellent band for the sustained-excellence trigger.
    pub sustained_windows: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            utilization_threshold: 0.8,
            sustained_windows: 3,
        }
    }
}

/// Latest observed utilization fractions for one tenant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utilization {
    /// Spend over budget ceiling, if observed.
    pub budget: Option<f64>,

    /// Request rate over rate ceiling, if observed.
    pub rate: Option<f64>,

    pub observed_at: DateTime<Utc>,
}

impl Utilization {
    fn empty() -> Self {
        Self {
            budget: None,
            rate: None,
            observed_at: Utc::now(),
        }
    }
}

/// Ephemeral in-memory gauge of per-tenant utilization.
///
/// Fed by the governance facade as samples and enforcement observations
/// arrive; holds only the latest window and is never persisted. Losing it
/// costs nothing but recommendation precision.
pub struct UtilizationTracker {
    gauges: DashMap<ConfigId, Utilization>,
}

impl UtilizationTracker {
    pub fn new() -> Self {
        Self {
            gauges: DashMap::new(),
        }
    }

    /// Record budget utilization for a tenant's latest window.
    pub fn record_budget(&self, config_id: &ConfigId, utilization: f64) {
        let mut gauge = self
            .gauges
            .entry(config_id.clone())
            .or_insert_with(Utilization::empty);
        gauge.budget = Some(utilization);
        gauge.observed_at = Utc::now();
    }

    /// Record rate-limit utilization for a tenant's latest window.
    pub fn record_rate(&self, config_id: &ConfigId, utilization: f64) {
        let mut gauge = self
            .gauges
            .entry(config_id.clone())
            .or_insert_with(Utilization::empty);
        gauge.rate = Some(utilization);
        gauge.observed_at = Utc::now();
    }

    /// Latest gauge for a tenant, if any observation arrived.
    pub fn get(&self, config_id: &ConfigId) -> Option<Utilization> {
        self.gauges.get(config_id).map(|gauge| *gauge)
    }

    /// Drop a tenant's gauge (e.g. after a tier change resets ceilings).
    pub fn reset(&self, config_id: &ConfigId) {
        self.gauges.remove(config_id);
    }
}

impl Default for UtilizationTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces upgrade recommendations.
pub struct UpgradeAdvisor;

impl UpgradeAdvisor {
    /// Recommend for one tenant. Pure given the config snapshot and the
    /// utilization gauge; evaluation order of the triggers is fixed so the
    /// reasons list is stable.
    pub fn recommend(
        config: &CeilingConfig,
        utilization: Option<Utilization>,
        advisor: &AdvisorConfig,
    ) -> UpgradeRecommendation {
        let Some(target_tier) = config.tier.next_tier() else {
            // Already at the top tier: nothing to move to.
            return UpgradeRecommendation {
                target_tier: config.tier,
                urgency: Urgency::Low,
                projected_roi_multiple: TierCatalog::upgrade_roi_multiple(config.tier),
                reasons: Vec::new(),
            };
        };

        let mut reasons = Vec::new();

        if let Some(gauge) = utilization {
            if let Some(budget) = gauge.budget {
                if budget > advisor.utilization_threshold {
                    reasons.push(UpgradeReason::BudgetUtilizationHigh {
                        utilization: budget,
                    });
                }
            }
            if let Some(rate) = gauge.rate {
                if rate > advisor.utilization_threshold {
                    reasons.push(UpgradeReason::RateUtilizationHigh { utilization: rate });
                }
            }
        }

        if sustained_excellence(config, advisor.sustained_windows) {
            reasons.push(UpgradeReason::SustainedExcellence {
                windows: advisor.sustained_windows,
            });
        }

        let urgency = match reasons.len() {
            0 => Urgency::Low,
            1 => Urgency::Medium,
            _ => Urgency::High,
        };

        // Headroom is context, not a trigger: it accompanies firing
        // triggers without raising urgency by itself.
        if !reasons.is_empty() {
            reasons.push(UpgradeReason::TierHeadroom);
        }

        UpgradeRecommendation {
            target_tier,
            urgency,
            projected_roi_multiple: TierCatalog::upgrade_roi_multiple(config.tier),
            reasons,
        }
    }
}

/// The last `windows` scored history entries all landed in the excellent
/// band (and at least that many scored entries exist).
fn sustained_excellence(config: &CeilingConfig, windows: usize) -> bool {
    if windows == 0 {
        return false;
    }
    let mut seen = 0;
    for entry in config.adjustment_history.iter().rev() {
        if let AdjustmentCause::Scored { band } = entry.cause {
            if band != AdjustmentBand::Excellent {
                return false;
            }
            seen += 1;
            if seen == windows {
                return true;
            }
        }
    }
    false
}
