//! CEDAR Seal - Tamper-evident seals over ceiling configs
//!
//! A seal is the hex SHA-256 digest of the canonical serialization of a
//! `CeilingConfig` with its `seal` field excluded. Canonicalization renders
//! JSON with recursively sorted object keys, so equivalent configs hash
//! identically regardless of in-memory or wire field ordering.
//!
//! Verification recomputes the digest and compares; a mismatch is surfaced
//! as a distinct condition and never silently corrected.

#![deny(unsafe_code)]

mod canonical;
mod sealer;

pub use canonical::canonical_bytes;
pub use sealer::{SealVerification, Sealer};
