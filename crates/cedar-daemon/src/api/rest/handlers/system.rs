//! Health, status, and dashboard handlers.

use axum::extract::State;
use axum::Json;
use cedar_types::TenantStatus;
use serde::Serialize;

use super::ApiError;
use crate::api::rest::state::AppState;

/// Liveness probe.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Daemon status response.
#[derive(Debug, Serialize)]
pub struct DaemonStatus {
    pub version: String,
    pub uptime: String,
    pub tenant_count: usize,
}

/// Daemon-level status: version, uptime, tenant count.
pub async fn daemon_status(
    State(state): State<AppState>,
) -> Result<Json<DaemonStatus>, ApiError> {
    let tenant_count = state.engine.tenant_count().await?;
    Ok(Json(DaemonStatus {
        version: state.version.clone(),
        uptime: state.uptime(),
        tenant_count,
    }))
}

/// Dashboard snapshot for every tenant: current ceilings, latest score,
/// seal validity, open recommendation. Strictly read-only.
pub async fn governance_status(
    State(state): State<AppState>,
) -> Result<Json<Vec<TenantStatus>>, ApiError> {
    Ok(Json(state.engine.status_all().await?))
}
