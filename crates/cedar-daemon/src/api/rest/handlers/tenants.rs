//! Tenant management and governance handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cedar_engine::{CeilingKind, EnforcementOutcome, PerformanceReport};
use cedar_seal::SealVerification;
use cedar_types::{
    CeilingConfig, ConfigId, ListFilter, PerformanceSample, TenantStatus, TierName,
    UpgradeRecommendation,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::api::rest::state::AppState;

/// Query parameters for listing tenants.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub active: Option<bool>,
    pub tier: Option<TierName>,
}

/// Body for tenant onboarding.
#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    pub config_id: String,
    pub tier: TierName,
}

/// Body for an enforcement check.
#[derive(Debug, Deserialize)]
pub struct EnforceRequest {
    pub ceiling_type: String,
    pub observed_value: f64,
}

/// Body for an explicit tier change.
#[derive(Debug, Deserialize)]
pub struct TierChangeRequest {
    pub tier: TierName,
}

/// Seal verification report.
#[derive(Debug, Serialize)]
pub struct SealReport {
    pub config_id: String,
    pub valid: bool,
    pub state: &'static str,
}

pub async fn list_tenants(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CeilingConfig>>, ApiError> {
    let filter = ListFilter {
        active: query.active,
        tier: query.tier,
    };
    Ok(Json(state.engine.list(filter).await?))
}

pub async fn create_tenant(
    State(state): State<AppState>,
    Json(request): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<CeilingConfig>), ApiError> {
    let config = state
        .engine
        .onboard(ConfigId::new(request.config_id), request.tier)
        .await?;
    Ok((StatusCode::CREATED, Json(config)))
}

pub async fn get_tenant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CeilingConfig>, ApiError> {
    Ok(Json(state.engine.get(&ConfigId::new(id)).await?))
}

pub async fn deactivate_tenant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CeilingConfig>, ApiError> {
    Ok(Json(state.engine.deactivate(&ConfigId::new(id)).await?))
}

pub async fn tenant_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TenantStatus>, ApiError> {
    Ok(Json(state.engine.status(&ConfigId::new(id)).await?))
}

pub async fn enforce_ceiling(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<EnforceRequest>,
) -> Result<Json<EnforcementOutcome>, ApiError> {
    let kind: CeilingKind = request.ceiling_type.parse()?;
    let outcome = state
        .engine
        .enforce(&ConfigId::new(id), kind, request.observed_value)
        .await?;
    Ok(Json(outcome))
}

pub async fn report_performance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(sample): Json<PerformanceSample>,
) -> Result<Json<PerformanceReport>, ApiError> {
    let report = state
        .engine
        .report_performance(&ConfigId::new(id), sample)
        .await?;
    Ok(Json(report))
}

pub async fn verify_seal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SealReport>, ApiError> {
    let verification = state.engine.verify_seal(&ConfigId::new(id.clone())).await?;
    let state_str = match verification {
        SealVerification::Valid => "valid",
        SealVerification::Mismatch { .. } => "mismatch",
        SealVerification::Unsealed => "unsealed",
    };
    Ok(Json(SealReport {
        config_id: id,
        valid: verification.is_valid(),
        state: state_str,
    }))
}

pub async fn recommendation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpgradeRecommendation>, ApiError> {
    Ok(Json(state.engine.recommend(&ConfigId::new(id)).await?))
}

pub async fn change_tier(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<TierChangeRequest>,
) -> Result<Json<CeilingConfig>, ApiError> {
    Ok(Json(
        state
            .engine
            .change_tier(&ConfigId::new(id), request.tier)
            .await?,
    ))
}
