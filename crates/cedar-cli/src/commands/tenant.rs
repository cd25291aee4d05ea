//! Tenant management commands.

use cedar_types::{CeilingConfig, TierName};
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use crate::client::CedarClient;
use crate::error::CliResult;
use crate::output::{print_output, print_single, print_success, OutputFormat};

/// Tenant management commands.
#[derive(Subcommand)]
pub enum TenantCommands {
    /// Onboard a tenant at a tier's baseline ceilings
    Create {
        /// Tenant identifier
        id: String,

        /// Service tier (freemium, professional, enterprise)
        #[arg(long, default_value = "freemium")]
        tier: TierName,
    },

    /// List tenant configs
    List {
        /// Only active configs
        #[arg(long)]
        active_only: bool,

        /// Only configs at this tier
        #[arg(long)]
        tier: Option<TierName>,
    },

    /// Show one tenant config
    Get {
        /// Tenant identifier
        id: String,
    },

    /// Change a tenant's tier (ceilings reset to the new baseline)
    Tier {
        /// Tenant identifier
        id: String,

        /// Target tier
        tier: TierName,
    },

    /// Flag a tenant inactive; the record and audit trail are kept
    Deactivate {
        /// Tenant identifier
        id: String,
    },
}

/// Table row for tenant listings.
#[derive(Tabled, Serialize)]
struct TenantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Budget (USD)")]
    budget_usd: f64,
    #[tabled(rename = "Latency (s)")]
    latency_s: f64,
    #[tabled(rename = "Rate/h")]
    rate_per_hour: f64,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Adjustments")]
    adjustments: usize,
}

impl From<&CeilingConfig> for TenantRow {
    fn from(config: &CeilingConfig) -> Self {
        Self {
            id: config.config_id.to_string(),
            tier: config.tier.to_string(),
            budget_usd: config.budget_usd,
            latency_s: config.latency_ceiling_seconds,
            rate_per_hour: config.rate_limit_per_hour,
            active: config.active,
            adjustments: config.adjustment_history.len(),
        }
    }
}

/// Execute a tenant command.
pub async fn execute(
    command: TenantCommands,
    client: &CedarClient,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        TenantCommands::Create { id, tier } => {
            let config = client.create_tenant(&id, tier).await?;
            print_success(&format!("tenant {} onboarded at {}", config.config_id, tier));
            print_single(&config, format);
        }
        TenantCommands::List { active_only, tier } => {
            let active = active_only.then_some(true);
            let configs = client.list_tenants(active, tier).await?;
            let rows: Vec<TenantRow> = configs.iter().map(TenantRow::from).collect();
            print_output(rows, format);
        }
        TenantCommands::Get { id } => {
            let config = client.get_tenant(&id).await?;
            print_single(&config, format);
        }
        TenantCommands::Tier { id, tier } => {
            let config = client.change_tier(&id, tier).await?;
            print_success(&format!(
                "tenant {} moved to {}; ceilings reset to baseline",
                config.config_id, tier
            ));
            print_single(&config, format);
        }
        TenantCommands::Deactivate { id } => {
            let config = client.deactivate_tenant(&id).await?;
            print_success(&format!("tenant {} deactivated (record retained)", config.config_id));
        }
    }
    Ok(())
}
