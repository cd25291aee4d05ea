//! Performance samples and derived scores.

use serde::{Deserialize, Serialize};

/// Observed tenant performance for one sample window.
///
/// Produced by the external execution pipeline and consumed once by the
/// scoring engine; never persisted beyond the scoring window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// Fraction of work units that succeeded, in [0, 1].
    pub observed_success_rate: f64,

    /// Observed latency for the window, in seconds.
    pub observed_latency_seconds: f64,

    /// Observed spend for the window, in USD.
    pub observed_spend_usd: f64,

    /// Identifier of the sample window.
    pub sample_window_id: String,
}

/// Dimensionless performance score derived from a sample against a tier
/// baseline.
///
/// Each efficiency ratio is unbounded above and clamped to a minimum of 0.0;
/// the composite is the unweighted arithmetic mean of the three.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    /// observed success rate / tier baseline success rate.
    pub success_rate_efficiency: f64,

    /// tier latency ceiling / observed latency.
    pub latency_efficiency: f64,

    /// tier budget / observed spend.
    pub budget_efficiency: f64,

    pub composite: f64,
}

impl PerformanceScore {
    /// Build a score from the three efficiency ratios, clamping each at 0.0
    /// and taking the unweighted mean as the composite.
    pub fn from_ratios(success_rate: f64, latency: f64, budget: f64) -> Self {
        let success_rate_efficiency = success_rate.max(0.0);
        let latency_efficiency = latency.max(0.0);
        let budget_efficiency = budget.max(0.0);
        Self {
            success_rate_efficiency,
            latency_efficiency,
            budget_efficiency,
            composite: (success_rate_efficiency + latency_efficiency + budget_efficiency) / 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_is_unweighted_mean() {
        let score = PerformanceScore::from_ratios(1.0, 2.0, 3.0);
        assert!((score.composite - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratios_clamped_at_zero() {
        let score = PerformanceScore::from_ratios(-0.5, 1.0, 2.0);
        assert_eq!(score.success_rate_efficiency, 0.0);
        assert!((score.composite - 1.0).abs() < 1e-12);
    }
}
