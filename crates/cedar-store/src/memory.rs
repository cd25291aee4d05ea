//! In-memory ceiling store.
//!
//! Suitable for development, testing, and single-process deployments.
//! Each config lives behind its own `tokio::sync::Mutex`; readers take the
//! lock briefly to clone a snapshot, so they never observe a half-applied
//! write. Operations on different config ids proceed in parallel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cedar_seal::Sealer;
use cedar_types::{
    AdjustmentCause, AdjustmentEntry, AppliedDeltas, CeilingConfig, ConfigId, GovernanceError,
    ListFilter, Result, TierName,
};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::traits::{CeilingStore, Mutator};

/// Default bound on per-key lock waits.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory ceiling store.
pub struct InMemoryCeilingStore {
    configs: DashMap<ConfigId, Arc<Mutex<CeilingConfig>>>,
    sealer: Sealer,
    lock_timeout: Duration,
}

impl InMemoryCeilingStore {
    pub fn new() -> Self {
        Self {
            configs: DashMap::new(),
            sealer: Sealer::new("cedar-store"),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the per-key lock wait bound.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    fn cell(&self, config_id: &ConfigId) -> Result<Arc<Mutex<CeilingConfig>>> {
        self.configs
            .get(config_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GovernanceError::UnknownTenant(config_id.clone()))
    }

    async fn lock_with_timeout<'a>(
        &self,
        config_id: &ConfigId,
        cell: &'a Mutex<CeilingConfig>,
    ) -> Result<tokio::sync::MutexGuard<'a, CeilingConfig>> {
        tokio::time::timeout(self.lock_timeout, cell.lock())
            .await
            .map_err(|_| GovernanceError::LockTimeout(config_id.clone()))
    }
}

impl Default for InMemoryCeilingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CeilingStore for InMemoryCeilingStore {
    async fn create(&self, config_id: ConfigId, tier: TierName) -> Result<CeilingConfig> {
        use dashmap::mapref::entry::Entry;

        let now = chrono::Utc::now();
        let mut config = CeilingConfig::at_baseline(config_id.clone(), tier, now);
        config.adjustment_history.push(AdjustmentEntry {
            timestamp: now,
            score: None,
            cause: AdjustmentCause::Created,
            deltas: AppliedDeltas::unchanged(&config),
        });
        config
            .validate()
            .map_err(|e| GovernanceError::Validation(e.to_string()))?;
        config.seal = Some(self.sealer.seal(&config)?);

        match self.configs.entry(config_id.clone()) {
            Entry::Occupied(_) => Err(GovernanceError::AlreadyExists(config_id)),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(config.clone())));
                debug!(config_id = %config_id, tier = %tier, "config created");
                Ok(config)
            }
        }
    }

    async fn get(&self, config_id: &ConfigId) -> Result<CeilingConfig> {
        let cell = self.cell(config_id)?;
        let guard = self.lock_with_timeout(config_id, &cell).await?;
        Ok(guard.clone())
    }

    async fn list(&self, filter: ListFilter) -> Result<Vec<CeilingConfig>> {
        // Snapshot the cells first so no map ref is held across an await.
        let cells: Vec<Arc<Mutex<CeilingConfig>>> = self
            .configs
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let mut configs = Vec::with_capacity(cells.len());
        for cell in cells {
            let snapshot = cell.lock().await.clone();
            if filter.matches(&snapshot) {
                configs.push(snapshot);
            }
        }
        configs.sort_by(|a, b| a.config_id.cmp(&b.config_id));
        Ok(configs)
    }

    async fn update(&self, config_id: &ConfigId, mutator: Mutator) -> Result<CeilingConfig> {
        let cell = self.cell(config_id)?;
        let mut guard = self.lock_with_timeout(config_id, &cell).await?;

        // Work on a clone; the stored config is replaced only after the
        // mutation, history append, and re-seal all succeed.
        let mut working = guard.clone();
        let history_len = working.adjustment_history.len();

        let entry = mutator(&mut working);

        if working.adjustment_history.len() < history_len {
            return Err(GovernanceError::Validation(
                "adjustment history is append-only".to_string(),
            ));
        }
        working
            .validate()
            .map_err(|e| GovernanceError::Validation(e.to_string()))?;

        working.last_adjusted_at = entry.timestamp;
        working.adjustment_history.push(entry);
        working.seal = Some(self.sealer.seal(&working)?);

        *guard = working.clone();
        Ok(working)
    }
}
