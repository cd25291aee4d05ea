//! Banded ceiling adjustment policy.
//!
//! A deterministic thresholded rule maps a composite score to multipliers
//! on the budget and rate ceilings. The bands do not overlap; the first
//! match wins. Latency ceiling, trust threshold, and success-rate floor are
//! never mutated here. Downward adjustments floor at the tier baseline;
//! upward growth is uncapped.

use cedar_types::{
    AdjustmentBand, AdjustmentCause, AdjustmentEntry, AppliedDeltas, PerformanceScore, TierCatalog,
};
use cedar_store::Mutator;

/// The adjustment policy.
pub struct AdjustmentPolicy;

impl AdjustmentPolicy {
    /// Place a composite score in its band.
    pub fn classify(composite: f64) -> AdjustmentBand {
        if composite > 1.3 {
            AdjustmentBand::Excellent
        } else if composite > 1.1 {
            AdjustmentBand::Good
        } else if composite < 0.8 {
            AdjustmentBand::Poor
        } else {
            AdjustmentBand::Stable
        }
    }

    /// Budget and rate multipliers for a band.
    pub fn multipliers(band: AdjustmentBand) -> (f64, f64) {
        match band {
            AdjustmentBand::Excellent => (1.25, 1.50),
            AdjustmentBand::Good => (1.10, 1.20),
            AdjustmentBand::Stable => (1.0, 1.0),
            AdjustmentBand::Poor => (0.80, 0.70),
        }
    }

    /// Build the store mutation for one scored window. Applied under the
    /// per-key lock; the store appends the returned entry, re-seals, and
    /// publishes atomically. Stable windows record a zero-delta entry so
    /// "no adjustment" is auditable.
    pub fn mutator(score: PerformanceScore) -> Mutator {
        let band = Self::classify(score.composite);
        let (budget_factor, rate_factor) = Self::multipliers(band);

        Box::new(move |config| {
            let baseline = &TierCatalog::get(config.tier).baseline;

            let new_budget = floored(config.budget_usd * budget_factor, baseline.budget_usd);
            let new_rate = floored(
                config.rate_limit_per_hour * rate_factor,
                baseline.rate_limit_per_hour,
            );

            let deltas = AppliedDeltas {
                budget_usd_before: config.budget_usd,
                budget_usd_after: new_budget,
                rate_limit_before: config.rate_limit_per_hour,
                rate_limit_after: new_rate,
            };

            config.budget_usd = new_budget;
            config.rate_limit_per_hour = new_rate;

            AdjustmentEntry {
                timestamp: chrono::Utc::now(),
                score: Some(score),
                cause: AdjustmentCause::Scored { band },
                deltas,
            }
        })
    }
}

/// Downward moves never go below the tier baseline.
fn floored(value: f64, baseline: f64) -> f64 {
    value.max(baseline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_with_composite(composite: f64) -> PerformanceScore {
        PerformanceScore {
            success_rate_efficiency: composite,
            latency_efficiency: composite,
            budget_efficiency: composite,
            composite,
        }
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(
            AdjustmentPolicy::classify(1.31),
            AdjustmentBand::Excellent
        );
        assert_eq!(AdjustmentPolicy::classify(1.3), AdjustmentBand::Good);
        assert_eq!(AdjustmentPolicy::classify(1.11), AdjustmentBand::Good);
        assert_eq!(AdjustmentPolicy::classify(1.1), AdjustmentBand::Stable);
        assert_eq!(AdjustmentPolicy::classify(0.8), AdjustmentBand::Stable);
        assert_eq!(AdjustmentPolicy::classify(0.79), AdjustmentBand::Poor);
    }

    #[test]
    fn test_multipliers_per_band() {
        assert_eq!(
            AdjustmentPolicy::multipliers(AdjustmentBand::Excellent),
            (1.25, 1.50)
        );
        assert_eq!(
            AdjustmentPolicy::multipliers(AdjustmentBand::Good),
            (1.10, 1.20)
        );
        assert_eq!(
            AdjustmentPolicy::multipliers(AdjustmentBand::Stable),
            (1.0, 1.0)
        );
        assert_eq!(
            AdjustmentPolicy::multipliers(AdjustmentBand::Poor),
            (0.80, 0.70)
        );
    }

    #[test]
    fn test_stable_mutator_is_noop_on_values() {
        let mut config = cedar_types::CeilingConfig::at_baseline(
            cedar_types::ConfigId::new("t"),
            cedar_types::TierName::Freemium,
            chrono::Utc::now(),
        );
        let entry = AdjustmentPolicy::mutator(score_with_composite(1.0))(&mut config);

        assert!(entry.deltas.is_noop());
        assert_eq!(config.budget_usd, 50.0);
        assert_eq!(config.rate_limit_per_hour, 100.0);
        assert_eq!(
            entry.cause,
            AdjustmentCause::Scored {
                band: AdjustmentBand::Stable
            }
        );
    }

    #[test]
    fn test_poor_mutator_floors_at_baseline() {
        let mut config = cedar_types::CeilingConfig::at_baseline(
            cedar_types::ConfigId::new("t"),
            cedar_types::TierName::Freemium,
            chrono::Utc::now(),
        );

        // Repeated poor windows never drive a ceiling below the tier
        // baseline.
        for _ in 0..10 {
            AdjustmentPolicy::mutator(score_with_composite(0.5))(&mut config);
        }
        assert_eq!(config.budget_usd, 50.0);
        assert_eq!(config.rate_limit_per_hour, 100.0);
    }

    #[test]
    fn test_excellent_mutator_grows_uncapped() {
        let mut config = cedar_types::CeilingConfig::at_baseline(
            cedar_types::ConfigId::new("t"),
            cedar_types::TierName::Freemium,
            chrono::Utc::now(),
        );

        for _ in 0..20 {
            AdjustmentPolicy::mutator(score_with_composite(2.0))(&mut config);
        }
        assert!(config.budget_usd > 50.0 * 1.25_f64.powi(19));
    }

    #[test]
    fn test_mutator_touches_only_budget_and_rate() {
        let mut config = cedar_types::CeilingConfig::at_baseline(
            cedar_types::ConfigId::new("t"),
            cedar_types::TierName::Professional,
            chrono::Utc::now(),
        );
        let before = config.clone();

        AdjustmentPolicy::mutator(score_with_composite(2.0))(&mut config);

        assert_eq!(
            config.latency_ceiling_seconds,
            before.latency_ceiling_seconds
        );
        assert_eq!(config.trust_threshold, before.trust_threshold);
        assert_eq!(config.success_rate_floor, before.success_rate_floor);
        assert_eq!(config.tier, before.tier);
    }
}
