//! Service tier catalog.
//!
//! The catalog is a static, read-only table of the named tiers and their
//! baseline ceilings. It is shared freely without locking; nothing in the
//! engine ever mutates it.

use serde::{Deserialize, Serialize};

/// Named service tier, totally ordered by rank (and by price).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TierName {
    Freemium,
    Professional,
    Enterprise,
}

impl TierName {
    /// Rank of the tier, 0 = lowest.
    pub fn rank(&self) -> usize {
        match self {
            TierName::Freemium => 0,
            TierName::Professional => 1,
            TierName::Enterprise => 2,
        }
    }

    /// The next tier up, if any.
    pub fn next_tier(&self) -> Option<TierName> {
        match self {
            TierName::Freemium => Some(TierName::Professional),
            TierName::Professional => Some(TierName::Enterprise),
            TierName::Enterprise => None,
        }
    }

    /// All tiers in rank order.
    pub fn all() -> [TierName; 3] {
        [
            TierName::Freemium,
            TierName::Professional,
            TierName::Enterprise,
        ]
    }
}

impl std::fmt::Display for TierName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TierName::Freemium => write!(f, "freemium"),
            TierName::Professional => write!(f, "professional"),
            TierName::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl std::str::FromStr for TierName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "freemium" => Ok(TierName::Freemium),
            "professional" => Ok(TierName::Professional),
            "enterprise" => Ok(TierName::Enterprise),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

/// Baseline ceilings a tier grants at onboarding (and the values downward
/// adjustments floor at).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBaseline {
    /// Monthly spend ceiling in USD.
    pub budget_usd: f64,

    /// Latency ceiling in seconds (lower is better).
    pub latency_ceiling_seconds: f64,

    /// Request-rate ceiling per hour.
    pub rate_limit_per_hour: f64,

    /// Success rate the tier is scored against.
    pub success_rate: f64,

    /// Default trust threshold (floor-type ceiling).
    pub trust_threshold: f64,

    /// Default success-rate floor.
    pub success_rate_floor: f64,
}

/// A catalog entry: tier name, list price, baseline ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceTier {
    pub name: TierName,

    /// List price per month in USD.
    pub monthly_price_usd: f64,

    pub baseline: TierBaseline,
}

/// The fixed tier catalog, in rank order.
const CATALOG: [ServiceTier; 3] = [
    ServiceTier {
        name: TierName::Freemium,
        monthly_price_usd: 0.0,
        baseline: TierBaseline {
            budget_usd: 50.0,
            latency_ceiling_seconds: 120.0,
            rate_limit_per_hour: 100.0,
            success_rate: 0.90,
            trust_threshold: 0.60,
            success_rate_floor: 0.90,
        },
    },
    ServiceTier {
        name: TierName::Professional,
        monthly_price_usd: 49.99,
        baseline: TierBaseline {
            budget_usd: 200.0,
            latency_ceiling_seconds: 60.0,
            rate_limit_per_hour: 1000.0,
            success_rate: 0.95,
            trust_threshold: 0.75,
            success_rate_floor: 0.95,
        },
    },
    ServiceTier {
        name: TierName::Enterprise,
        monthly_price_usd: 199.99,
        baseline: TierBaseline {
            budget_usd: 1000.0,
            latency_ceiling_seconds: 30.0,
            rate_limit_per_hour: 10000.0,
            success_rate: 0.99,
            trust_threshold: 0.90,
            success_rate_floor: 0.99,
        },
    },
];

/// Read-only accessor over the tier catalog.
pub struct TierCatalog;

impl TierCatalog {
    /// Look up a tier by name.
    pub fn get(name: TierName) -> &'static ServiceTier {
        &CATALOG[name.rank()]
    }

    /// All catalog entries in rank order.
    pub fn all() -> &'static [ServiceTier] {
        &CATALOG
    }

    /// Documented upgrade economics: projected ROI multiple for moving from
    /// `from` to the next tier up. A fixed marketing constant, not a derived
    /// metric.
    pub fn upgrade_roi_multiple(from: TierName) -> f64 {
        match from {
            TierName::Freemium => 2.5,
            TierName::Professional => 3.0,
            TierName::Enterprise => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(TierName::Freemium < TierName::Professional);
        assert!(TierName::Professional < TierName::Enterprise);
    }

    #[test]
    fn test_tier_display_roundtrip() {
        for tier in TierName::all() {
            let parsed: TierName = tier.to_string().parse().unwrap();
            assert_eq!(parsed, tier);
        }
        assert!("platinum".parse::<TierName>().is_err());
    }

    #[test]
    fn test_next_tier() {
        assert_eq!(
            TierName::Freemium.next_tier(),
            Some(TierName::Professional)
        );
        assert_eq!(TierName::Enterprise.next_tier(), None);
    }

    #[test]
    fn test_catalog_monotonic_in_rank() {
        // Each ceiling improves monotonically with rank: budgets and rate
        // limits grow, latency ceilings shrink, floors tighten.
        for pair in CATALOG.windows(2) {
            let (lower, upper) = (&pair[0].baseline, &pair[1].baseline);
            assert!(lower.budget_usd <= upper.budget_usd);
            assert!(lower.rate_limit_per_hour <= upper.rate_limit_per_hour);
            assert!(lower.latency_ceiling_seconds >= upper.latency_ceiling_seconds);
            assert!(lower.success_rate <= upper.success_rate);
            assert!(lower.trust_threshold <= upper.trust_threshold);
            assert!(lower.success_rate_floor <= upper.success_rate_floor);
        }
        assert!(CATALOG.windows(2).all(|p| p[0].monthly_price_usd < p[1].monthly_price_usd));
    }

    #[test]
    fn test_catalog_values() {
        let freemium = TierCatalog::get(TierName::Freemium);
        assert_eq!(freemium.baseline.budget_usd, 50.0);
        assert_eq!(freemium.baseline.latency_ceiling_seconds, 120.0);
        assert_eq!(freemium.baseline.rate_limit_per_hour, 100.0);

        let enterprise = TierCatalog::get(TierName::Enterprise);
        assert_eq!(enterprise.monthly_price_usd, 199.99);
        assert_eq!(enterprise.baseline.budget_usd, 1000.0);
    }

    #[test]
    fn test_upgrade_roi_constants() {
        assert_eq!(TierCatalog::upgrade_roi_multiple(TierName::Freemium), 2.5);
        assert_eq!(TierCatalog::upgrade_roi_multiple(TierName::Professional), 3.0);
    }
}
