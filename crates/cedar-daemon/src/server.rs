//! Server setup and lifecycle management.

use std::sync::Arc;

use cedar_engine::{AdvisorConfig, GovernanceEngine};
use cedar_store::InMemoryCeilingStore;
use tokio::net::TcpListener;

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};

/// CEDAR daemon server.
pub struct Server {
    config: DaemonConfig,
    engine: Arc<GovernanceEngine>,
}

impl Server {
    /// Create a new server with the given configuration.
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let store = Arc::new(
            InMemoryCeilingStore::new().with_lock_timeout(config.store.lock_timeout()),
        );

        let advisor = AdvisorConfig {
            sustained_windows: config.advisor.sustained_windows,
            utilization_threshold: config.advisor.utilization_threshold,
        };
        let engine = Arc::new(GovernanceEngine::new(store).with_advisor_config(advisor));

        Ok(Self { config, engine })
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        let state = AppState::new(self.engine.clone());
        let app = create_router(state);

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("CEDAR daemon listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("CEDAR daemon shutting down");
        Ok(())
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
