//! Request handlers.

pub mod system;
pub mod tenants;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cedar_types::GovernanceError;
use serde_json::json;

/// Governance error carried into an HTTP response.
pub struct ApiError(pub GovernanceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GovernanceError::UnknownTenant(_) => StatusCode::NOT_FOUND,
            GovernanceError::AlreadyExists(_) => StatusCode::CONFLICT,
            GovernanceError::InvalidSample(_) | GovernanceError::UnknownCeilingType(_) => {
                StatusCode::BAD_REQUEST
            }
            GovernanceError::SealInvalid(_) => StatusCode::CONFLICT,
            GovernanceError::LockTimeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            GovernanceError::Validation(_) | GovernanceError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": {
                "kind": self.0.kind(),
                "message": self.0.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<GovernanceError> for ApiError {
    fn from(err: GovernanceError) -> Self {
        Self(err)
    }
}
