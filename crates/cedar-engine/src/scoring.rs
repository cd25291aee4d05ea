//! Performance scoring against tier baselines.
//!
//! Scoring is a pure function of the stored tier baseline and the supplied
//! sample; it never touches the store and has no observable side effect.

use cedar_types::{
    CeilingConfig, GovernanceError, PerformanceSample, PerformanceScore, Result, TierCatalog,
};

/// Computes performance scores.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Score a sample against the config's tier baseline.
    ///
    /// Fails with `InvalidSample` when a value is non-finite, when a
    /// denominator (`observed_latency_seconds`, `observed_spend_usd`) is
    /// zero or negative, or when the observed success rate is negative.
    /// Ratios are clamped at 0.0 below and unbounded above.
    pub fn score(config: &CeilingConfig, sample: &PerformanceSample) -> Result<PerformanceScore> {
        validate_sample(sample)?;

        let baseline = &TierCatalog::get(config.tier).baseline;
        Ok(PerformanceScore::from_ratios(
            sample.observed_success_rate / baseline.success_rate,
            baseline.latency_ceiling_seconds / sample.observed_latency_seconds,
            baseline.budget_usd / sample.observed_spend_usd,
        ))
    }
}

fn validate_sample(sample: &PerformanceSample) -> Result<()> {
    let fields = [
        ("observed_success_rate", sample.observed_success_rate),
        ("observed_latency_seconds", sample.observed_latency_seconds),
        ("observed_spend_usd", sample.observed_spend_usd),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(GovernanceError::InvalidSample(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
    }
    if sample.observed_latency_seconds <= 0.0 {
        return Err(GovernanceError::InvalidSample(format!(
            "observed_latency_seconds must be positive, got {}",
            sample.observed_latency_seconds
        )));
    }
    if sample.observed_spend_usd <= 0.0 {
        return Err(GovernanceError::InvalidSample(format!(
            "observed_spend_usd must be positive, got {}",
            sample.observed_spend_usd
        )));
    }
    if sample.observed_success_rate < 0.0 {
        return Err(GovernanceError::InvalidSample(format!(
            "observed_success_rate must be non-negative, got {}",
            sample.observed_success_rate
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedar_types::{ConfigId, TierName};
    use chrono::Utc;

    fn freemium_config() -> CeilingConfig {
        CeilingConfig::at_baseline(ConfigId::new("tenant-1"), TierName::Freemium, Utc::now())
    }

    fn sample(success: f64, latency: f64, spend: f64) -> PerformanceSample {
        PerformanceSample {
            observed_success_rate: success,
            observed_latency_seconds: latency,
            observed_spend_usd: spend,
            sample_window_id: "w-1".to_string(),
        }
    }

    #[test]
    fn test_scenario_a_excellent_window() {
        // Freemium baseline: success 0.90, latency 120s, budget $50.
        let score = ScoringEngine::score(&freemium_config(), &sample(0.95, 60.0, 40.0)).unwrap();

        assert!((score.success_rate_efficiency - 0.95 / 0.90).abs() < 1e-9);
        assert!((score.latency_efficiency - 2.0).abs() < 1e-9);
        assert!((score.budget_efficiency - 1.25).abs() < 1e-9);
        assert!((score.composite - 1.4351851851851851).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_b_poor_window() {
        let score = ScoringEngine::score(&freemium_config(), &sample(0.50, 200.0, 45.0)).unwrap();

        assert!((score.success_rate_efficiency - 0.50 / 0.90).abs() < 1e-9);
        assert!((score.latency_efficiency - 0.6).abs() < 1e-9);
        assert!((score.budget_efficiency - 50.0 / 45.0).abs() < 1e-9);
        assert!(score.composite < 0.8);
    }

    #[test]
    fn test_score_is_pure() {
        let config = freemium_config();
        let sample = sample(0.9, 100.0, 30.0);

        let first = ScoringEngine::score(&config, &sample).unwrap();
        let second = ScoringEngine::score(&config, &sample).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_latency_rejected() {
        let err = ScoringEngine::score(&freemium_config(), &sample(0.9, 0.0, 30.0)).unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidSample(_)));
    }

    #[test]
    fn test_negative_spend_rejected() {
        let err = ScoringEngine::score(&freemium_config(), &sample(0.9, 100.0, -5.0)).unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidSample(_)));
    }

    #[test]
    fn test_nan_rejected() {
        let err =
            ScoringEngine::score(&freemium_config(), &sample(f64::NAN, 100.0, 30.0)).unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidSample(_)));
    }

    #[test]
    fn test_ratios_unbounded_above() {
        // A tiny spend yields an arbitrarily large budget efficiency.
        let score = ScoringEngine::score(&freemium_config(), &sample(0.9, 120.0, 0.01)).unwrap();
        assert!(score.budget_efficiency > 1000.0);
    }
}
