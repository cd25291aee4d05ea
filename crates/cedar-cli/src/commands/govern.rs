//! Governance commands: enforce, report, verify, recommend, status.

use cedar_types::{PerformanceSample, TenantStatus};
use serde::Serialize;
use tabled::Tabled;

use crate::client::CedarClient;
use crate::error::{CliError, CliResult};
use crate::output::{print_output, print_single, print_success, print_warning, OutputFormat};

/// Check an observed value against a tenant's ceiling. Exits non-zero with
/// the ceiling-violation code when the check fails.
pub async fn enforce(
    client: &CedarClient,
    id: &str,
    ceiling_type: &str,
    observed_value: f64,
    format: OutputFormat,
) -> CliResult<()> {
    let outcome = client.enforce(id, ceiling_type, observed_value).await?;
    print_single(&outcome, format);

    if outcome.within_ceiling {
        print_success(&format!(
            "{} within ceiling (margin {:.3})",
            ceiling_type, outcome.margin
        ));
        Ok(())
    } else {
        Err(CliError::CeilingViolation {
            observed: observed_value,
            limit: outcome.configured_limit,
            margin: outcome.margin,
        })
    }
}

/// Report a completed performance window; the daemon scores it and runs the
/// adjustment policy.
#[allow(clippy::too_many_arguments)]
pub async fn report(
    client: &CedarClient,
    id: &str,
    success_rate: f64,
    latency_seconds: f64,
    spend_usd: f64,
    window: String,
    format: OutputFormat,
) -> CliResult<()> {
    let sample = PerformanceSample {
        observed_success_rate: success_rate,
        observed_latency_seconds: latency_seconds,
        observed_spend_usd: spend_usd,
        sample_window_id: window,
    };

    let response = client.report_performance(id, &sample).await?;
    print_success(&format!(
        "window scored {:.3} ({}); budget {:.2}, rate {:.0}/h",
        response.score.composite,
        response.band,
        response.config.budget_usd,
        response.config.rate_limit_per_hour,
    ));
    print_single(&response, format);
    Ok(())
}

/// Force-verify a tenant's seal. Exits with the seal-invalid code on
/// mismatch.
pub async fn verify(client: &CedarClient, id: &str, format: OutputFormat) -> CliResult<()> {
    let response = client.verify_seal(id).await?;
    print_single(&response, format);

    if response.valid {
        print_success(&format!("seal intact for {}", id));
        Ok(())
    } else {
        print_warning(&format!("seal state: {}", response.state));
        Err(CliError::SealInvalid(id.to_string()))
    }
}

/// Request an upgrade recommendation.
pub async fn recommend(client: &CedarClient, id: &str, format: OutputFormat) -> CliResult<()> {
    let recommendation = client.recommendation(id).await?;
    print_single(&recommendation, format);
    Ok(())
}

/// Table row for the governance dashboard.
#[derive(Tabled, Serialize)]
struct StatusRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Budget (USD)")]
    budget_usd: f64,
    #[tabled(rename = "Rate/h")]
    rate_per_hour: f64,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Seal")]
    seal: String,
    #[tabled(rename = "Urgency")]
    urgency: String,
}

impl From<&TenantStatus> for StatusRow {
    fn from(status: &TenantStatus) -> Self {
        Self {
            id: status.config_id.to_string(),
            tier: status.tier.to_string(),
            budget_usd: status.budget_usd,
            rate_per_hour: status.rate_limit_per_hour,
            score: status
                .latest_score
                .map(|s| format!("{:.3}", s.composite))
                .unwrap_or_else(|| "-".to_string()),
            seal: if status.seal_valid { "valid" } else { "INVALID" }.to_string(),
            urgency: status
                .recommendation
                .as_ref()
                .map(|r| r.urgency.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Show daemon health plus the per-tenant governance dashboard.
pub async fn status(client: &CedarClient, format: OutputFormat) -> CliResult<()> {
    let daemon = client.daemon_status().await?;
    print_success(&format!(
        "cedard {} up {} ({} tenants)",
        daemon.version, daemon.uptime, daemon.tenant_count
    ));

    let statuses = client.governance_status().await?;
    let rows: Vec<StatusRow> = statuses.iter().map(StatusRow::from).collect();
    print_output(rows, format);
    Ok(())
}
