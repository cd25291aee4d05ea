//! HTTP client for the CEDAR daemon.

use cedar_types::{
    AdjustmentBand, CeilingConfig, PerformanceSample, PerformanceScore, TenantStatus, TierName,
    UpgradeRecommendation,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{CliError, CliResult};

/// Enforcement check result, as returned by the daemon.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnforceResponse {
    pub within_ceiling: bool,
    pub configured_limit: f64,
    pub margin: f64,
}

/// Seal verification report, as returned by the daemon.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SealResponse {
    pub config_id: String,
    pub valid: bool,
    pub state: String,
}

/// Performance report, as returned by the daemon.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PerformanceResponse {
    pub config: CeilingConfig,
    pub score: PerformanceScore,
    pub band: AdjustmentBand,
}

/// Daemon status, as returned by the daemon.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DaemonStatusResponse {
    pub version: String,
    pub uptime: String,
    pub tenant_count: usize,
}

/// Error envelope the daemon wraps every failure in.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    kind: String,
    message: String,
}

/// Client for the CEDAR daemon REST API.
pub struct CedarClient {
    base_url: String,
    http: reqwest::Client,
}

impl CedarClient {
    /// Create a client for the given endpoint.
    pub fn new(endpoint: &str) -> CliResult<Self> {
        Ok(Self {
            base_url: format!("{}/api/v1", endpoint.trim_end_matches('/')),
            http: reqwest::Client::new(),
        })
    }

    pub async fn daemon_status(&self) -> CliResult<DaemonStatusResponse> {
        self.decode(self.http.get(self.url("/status")).send().await?)
            .await
    }

    pub async fn governance_status(&self) -> CliResult<Vec<TenantStatus>> {
        self.decode(
            self.http
                .get(self.url("/governance/status"))
                .send()
                .await?,
        )
        .await
    }

    pub async fn create_tenant(&self, config_id: &str, tier: TierName) -> CliResult<CeilingConfig> {
        self.decode(
            self.http
                .post(self.url("/tenants"))
                .json(&json!({ "config_id": config_id, "tier": tier }))
                .send()
                .await?,
        )
        .await
    }

    pub async fn list_tenants(
        &self,
        active: Option<bool>,
        tier: Option<TierName>,
    ) -> CliResult<Vec<CeilingConfig>> {
        let mut request = self.http.get(self.url("/tenants"));
        if let Some(active) = active {
            request = request.query(&[("active", active)]);
        }
        if let Some(tier) = tier {
            request = request.query(&[("tier", tier.to_string())]);
        }
        self.decode(request.send().await?).await
    }

    pub async fn get_tenant(&self, config_id: &str) -> CliResult<CeilingConfig> {
        self.decode(
            self.http
                .get(self.url(&format!("/tenants/{}", config_id)))
                .send()
                .await?,
        )
        .await
    }

    pub async fn deactivate_tenant(&self, config_id: &str) -> CliResult<CeilingConfig> {
        self.decode(
            self.http
                .delete(self.url(&format!("/tenants/{}", config_id)))
                .send()
                .await?,
        )
        .await
    }

    pub async fn change_tier(&self, config_id: &str, tier: TierName) -> CliResult<CeilingConfig> {
        self.decode(
            self.http
                .put(self.url(&format!("/tenants/{}/tier", config_id)))
                .json(&json!({ "tier": tier }))
                .send()
                .await?,
        )
        .await
    }

    pub async fn enforce(
        &self,
        config_id: &str,
        ceiling_type: &str,
        observed_value: f64,
    ) -> CliResult<EnforceResponse> {
        self.decode(
            self.http
                .post(self.url(&format!("/tenants/{}/enforce", config_id)))
                .json(&json!({
                    "ceiling_type": ceiling_type,
                    "observed_value": observed_value,
                }))
                .send()
                .await?,
        )
        .await
    }

    pub async fn report_performance(
        &self,
        config_id: &str,
        sample: &PerformanceSample,
    ) -> CliResult<PerformanceResponse> {
        self.decode(
            self.http
                .post(self.url(&format!("/tenants/{}/performance", config_id)))
                .json(sample)
                .send()
                .await?,
        )
        .await
    }

    pub async fn verify_seal(&self, config_id: &str) -> CliResult<SealResponse> {
        self.decode(
            self.http
                .get(self.url(&format!("/tenants/{}/seal", config_id)))
                .send()
                .await?,
        )
        .await
    }

    pub async fn recommendation(&self, config_id: &str) -> CliResult<UpgradeRecommendation> {
        self.decode(
            self.http
                .get(self.url(&format!("/tenants/{}/recommendation", config_id)))
                .send()
                .await?,
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body, or map the daemon's error envelope onto the
    /// CLI fault classes.
    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> CliResult<T> {
        if response.status().is_success() {
            return Ok(response.json::<T>().await?);
        }

        let status = response.status();
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => Err(CliError::Api {
                kind: envelope.error.kind,
                message: envelope.error.message,
            }),
            Err(_) => Err(CliError::Protocol(format!(
                "daemon returned {} without an error envelope",
                status
            ))),
        }
    }
}
