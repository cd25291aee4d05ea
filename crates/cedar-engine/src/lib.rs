//! CEDAR Engine - Ceiling governance logic
//!
//! The engine sits on top of the ceiling store and implements the
//! governance path: score observed performance against tier baselines,
//! adjust budget and rate ceilings by banded multipliers, answer
//! enforcement checks, verify seals, and recommend tier upgrades.
//!
//! All public operations return tagged results over
//! [`cedar_types::GovernanceError`]; none of them leaves a config whose
//! stored seal disagrees with its stored fields.

#![deny(unsafe_code)]

pub mod adjust;
pub mod advisor;
pub mod enforce;
pub mod engine;
pub mod scoring;

pub use adjust::AdjustmentPolicy;
pub use advisor::{AdvisorConfig, UpgradeAdvisor, Utilization, UtilizationTracker};
pub use enforce::{enforce, CeilingKind, EnforcementOutcome};
pub use engine::{GovernanceEngine, PerformanceReport};
pub use scoring::ScoringEngine;
