//! CEDAR daemon entrypoint.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cedar_daemon::{DaemonConfig, Server};

/// CEDAR governance daemon.
#[derive(Parser)]
#[command(name = "cedard")]
#[command(about = "CEDAR - Dynamic resource ceiling governance daemon", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file path.
    #[arg(short, long, env = "CEDAR_CONFIG")]
    config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DaemonConfig::load(args.config.as_deref())?;
    let server = Server::new(config)?;
    server.run().await?;
    Ok(())
}
