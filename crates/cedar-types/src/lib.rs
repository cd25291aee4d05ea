//! CEDAR Types - Core types for ceiling governance
//!
//! CEDAR (Ceiling Enforcement & Dynamic Adjustment Runtime) maintains a set
//! of enforceable resource ceilings per tenant, re-scores observed
//! performance against tier baselines, adjusts ceilings up or down, and
//! seals every stored configuration with a tamper-evident digest.
//!
//! ## Architectural Boundaries
//!
//! - **cedar-types** owns: the data model, the tier catalog, and the error
//!   taxonomy shared by every other crate
//! - **cedar-store** owns: durable keyed storage and per-tenant write locks
//! - **cedar-engine** owns: scoring, adjustment, enforcement, and advisory
//!   logic on top of the store
//!
//! ## Key Concepts
//!
//! - **ServiceTier**: a named bundle of baseline ceilings and a price point
//! - **CeilingConfig**: the per-tenant unit of governance
//! - **PerformanceSample**: ephemeral observed performance for one window
//! - **SecuritySeal**: digest proving a config has not been altered outside
//!   the governance path

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod recommend;
pub mod sample;
pub mod status;
pub mod tier;

// Re-export main types
pub use config::{
    AdjustmentBand, AdjustmentCause, AdjustmentEntry, AppliedDeltas, CeilingConfig, ListFilter,
    SecuritySeal,
};
pub use error::{GovernanceError, Result};
pub use events::GovernanceEvent;
pub use ids::ConfigId;
pub use recommend::{UpgradeReason, UpgradeRecommendation, Urgency};
pub use sample::{PerformanceSample, PerformanceScore};
pub use status::TenantStatus;
pub use tier::{ServiceTier, TierBaseline, TierCatalog, TierName};
