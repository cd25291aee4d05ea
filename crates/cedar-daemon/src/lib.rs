//! CEDAR Daemon - REST surface over the governance engine
//!
//! Exposes tenant management, enforcement checks, performance reporting,
//! seal verification, and the read-only dashboard status endpoints. The
//! status endpoints never trigger an adjustment as a side effect of being
//! read.

#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::DaemonConfig;
pub use error::{DaemonError, DaemonResult};
pub use server::Server;
