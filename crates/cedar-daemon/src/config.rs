//! Daemon configuration.
//!
//! Layered in the usual order: built-in defaults, then an optional config
//! file, then `CEDAR__`-prefixed environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::DaemonResult;

/// Complete daemon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub advisor: AdvisorSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the REST API listens on.
    pub listen_addr: SocketAddr,
}

/// Store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Bound on per-tenant lock waits, in milliseconds.
    pub lock_timeout_ms: u64,
}

impl StoreConfig {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

/// Upgrade advisor settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorSettings {
    /// Consecutive excellent windows required for the sustained trigger.
    pub sustained_windows: usize,

    /// Utilization fraction above which a ceiling counts as near-exhausted.
    pub utilization_threshold: f64,
}

impl DaemonConfig {
    /// Load configuration; `path` points at an optional TOML/YAML file.
    pub fn load(path: Option<&str>) -> DaemonResult<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.listen_addr", "127.0.0.1:8080")?
            .set_default("store.lock_timeout_ms", 5000_i64)?
            .set_default("advisor.sustained_windows", 3_i64)?
            .set_default("advisor.utilization_threshold", 0.8)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("CEDAR").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
