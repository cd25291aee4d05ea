//! Stateless ceiling enforcement checks.

use cedar_types::{CeilingConfig, GovernanceError, Result};
use serde::{Deserialize, Serialize};

/// The closed set of enforceable ceiling types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeilingKind {
    Budget,
    Latency,
    TrustThreshold,
    SuccessRate,
    RateLimit,
}

impl CeilingKind {
    /// Whether this ceiling is a floor (higher observed values are safer).
    pub fn is_floor(&self) -> bool {
        matches!(self, CeilingKind::TrustThreshold | CeilingKind::SuccessRate)
    }
}

impl std::fmt::Display for CeilingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CeilingKind::Budget => write!(f, "budget"),
            CeilingKind::Latency => write!(f, "latency"),
            CeilingKind::TrustThreshold => write!(f, "trust_threshold"),
            CeilingKind::SuccessRate => write!(f, "success_rate"),
            CeilingKind::RateLimit => write!(f, "rate_limit"),
        }
    }
}

impl std::str::FromStr for CeilingKind {
    type Err = GovernanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "budget" => Ok(CeilingKind::Budget),
            "latency" => Ok(CeilingKind::Latency),
            "trust_threshold" => Ok(CeilingKind::TrustThreshold),
            "success_rate" => Ok(CeilingKind::SuccessRate),
            "rate_limit" => Ok(CeilingKind::RateLimit),
            other => Err(GovernanceError::UnknownCeilingType(other.to_string())),
        }
    }
}

/// Result of one enforcement check.
///
/// The margin is signed so that a positive value always means "safe": for
/// upper-bound ceilings it is `limit - observed`, for floor-type ceilings
/// it is `observed - limit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnforcementOutcome {
    pub within_ceiling: bool,
    pub configured_limit: f64,
    pub margin: f64,
}

/// Check an observed value against the config's current ceiling of the
/// given kind. Pure; the only input besides the arguments is the config
/// snapshot itself.
pub fn enforce(config: &CeilingConfig, kind: CeilingKind, observed: f64) -> EnforcementOutcome {
    let configured_limit = match kind {
        CeilingKind::Budget => config.budget_usd,
        CeilingKind::Latency => config.latency_ceiling_seconds,
        CeilingKind::TrustThreshold => config.trust_threshold,
        CeilingKind::SuccessRate => config.success_rate_floor,
        CeilingKind::RateLimit => config.rate_limit_per_hour,
    };

    let margin = if kind.is_floor() {
        observed - configured_limit
    } else {
        configured_limit - observed
    };

    EnforcementOutcome {
        within_ceiling: margin >= 0.0,
        configured_limit,
        margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedar_types::{ConfigId, TierName};
    use chrono::Utc;

    fn config_with_latency_60() -> CeilingConfig {
        // Professional baseline has a 60s latency ceiling.
        CeilingConfig::at_baseline(ConfigId::new("tenant-1"), TierName::Professional, Utc::now())
    }

    #[test]
    fn test_latency_within_ceiling() {
        let outcome = enforce(&config_with_latency_60(), CeilingKind::Latency, 45.0);
        assert!(outcome.within_ceiling);
        assert_eq!(outcome.configured_limit, 60.0);
        assert_eq!(outcome.margin, 15.0);
    }

    #[test]
    fn test_latency_violation() {
        let outcome = enforce(&config_with_latency_60(), CeilingKind::Latency, 90.0);
        assert!(!outcome.within_ceiling);
        assert_eq!(outcome.margin, -30.0);
    }

    #[test]
    fn test_floor_margin_sign() {
        // Professional success-rate floor is 0.95; observing 0.97 is safe
        // with a positive margin, 0.90 violates with a negative one.
        let config = config_with_latency_60();

        let safe = enforce(&config, CeilingKind::SuccessRate, 0.97);
        assert!(safe.within_ceiling);
        assert!((safe.margin - 0.02).abs() < 1e-9);

        let violating = enforce(&config, CeilingKind::SuccessRate, 0.90);
        assert!(!violating.within_ceiling);
        assert!(violating.margin < 0.0);
    }

    #[test]
    fn test_budget_and_rate_are_upper_bounds() {
        let config = config_with_latency_60();

        assert!(enforce(&config, CeilingKind::Budget, 199.0).within_ceiling);
        assert!(!enforce(&config, CeilingKind::Budget, 200.5).within_ceiling);
        assert!(enforce(&config, CeilingKind::RateLimit, 999.0).within_ceiling);
    }

    #[test]
    fn test_exact_limit_is_within() {
        let config = config_with_latency_60();
        let outcome = enforce(&config, CeilingKind::Latency, 60.0);
        assert!(outcome.within_ceiling);
        assert_eq!(outcome.margin, 0.0);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(
            "trust_threshold".parse::<CeilingKind>().unwrap(),
            CeilingKind::TrustThreshold
        );
        let err = "karma".parse::<CeilingKind>().unwrap_err();
        assert!(matches!(err, GovernanceError::UnknownCeilingType(_)));
    }
}
