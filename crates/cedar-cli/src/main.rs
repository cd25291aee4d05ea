//! CEDAR CLI - Operator interface for ceiling governance
//!
//! This CLI provides operators with a terminal interface to:
//! - Onboard tenants and manage their tiers
//! - Run enforcement checks against current ceilings
//! - Report performance windows for scoring and adjustment
//! - Force-verify config seals
//! - Request upgrade recommendations and the governance dashboard

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod commands;
mod error;
mod output;

use cedar_types::TierName;
use commands::{govern, tenant};
use error::CliResult;
use output::print_error;

/// CEDAR CLI application.
#[derive(Parser)]
#[command(name = "cedar")]
#[command(about = "CEDAR - Dynamic resource ceiling governance CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// CEDAR daemon endpoint
    #[arg(short, long, env = "CEDAR_ENDPOINT", default_value = "http://localhost:8080")]
    endpoint: String,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Manage tenant configs
    Tenant {
        #[command(subcommand)]
        command: tenant::TenantCommands,
    },

    /// Check an observed value against a tenant's ceiling
    Enforce {
        /// Tenant identifier
        id: String,

        /// Ceiling type (budget, latency, trust_threshold, success_rate, rate_limit)
        ceiling_type: String,

        /// Observed value
        observed_value: f64,
    },

    /// Report a completed performance window
    Report {
        /// Tenant identifier
        id: String,

        /// Observed success rate in [0, 1]
        #[arg(long)]
        success_rate: f64,

        /// Observed latency in seconds
        #[arg(long)]
        latency: f64,

        /// Observed spend in USD
        #[arg(long)]
        spend: f64,

        /// Sample window identifier
        #[arg(long, default_value = "manual")]
        window: String,
    },

    /// Force-verify a tenant's config seal
    Verify {
        /// Tenant identifier
        id: String,
    },

    /// Request an upgrade recommendation
    Recommend {
        /// Tenant identifier
        id: String,
    },

    /// Show daemon status and the governance dashboard
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let client = client::CedarClient::new(&cli.endpoint)?;

    match cli.command {
        Commands::Tenant { command } => tenant::execute(command, &client, cli.output).await,
        Commands::Enforce {
            id,
            ceiling_type,
            observed_value,
        } => govern::enforce(&client, &id, &ceiling_type, observed_value, cli.output).await,
        Commands::Report {
            id,
            success_rate,
            latency,
            spend,
            window,
        } => {
            govern::report(
                &client,
                &id,
                success_rate,
                latency,
                spend,
                window,
                cli.output,
            )
            .await
        }
        Commands::Verify { id } => govern::verify(&client, &id, cli.output).await,
        Commands::Recommend { id } => govern::recommend(&client, &id, cli.output).await,
        Commands::Status => govern::status(&client, cli.output).await,
    }
}
