//! API Router configuration.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{system, tenants};
use super::state::AppState;

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health and status
        .route("/health", get(system::health_check))
        .route("/status", get(system::daemon_status))
        // Dashboard (read-only; never adjusts)
        .route("/governance/status", get(system::governance_status))
        // Tenants
        .route("/tenants", get(tenants::list_tenants))
        .route("/tenants", post(tenants::create_tenant))
        .route("/tenants/:id", get(tenants::get_tenant))
        .route("/tenants/:id", delete(tenants::deactivate_tenant))
        .route("/tenants/:id/status", get(tenants::tenant_status))
        .route("/tenants/:id/enforce", post(tenants::enforce_ceiling))
        .route("/tenants/:id/performance", post(tenants::report_performance))
        .route("/tenants/:id/seal", get(tenants::verify_seal))
        .route("/tenants/:id/recommendation", get(tenants::recommendation))
        .route("/tenants/:id/tier", put(tenants::change_tier));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
