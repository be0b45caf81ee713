use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::errors::DashboardError;

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::AlreadyExists(_) => StatusCode::CONFLICT,
            DashboardError::Upstream(_) | DashboardError::Parse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Only a short message reaches the client; details stay in the log
impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            DashboardError::InvalidInput(msg) | DashboardError::NotFound(msg) => msg.clone(),
            DashboardError::AlreadyExists(what) => format!("already exists: {}", what),
            DashboardError::Upstream(_) | DashboardError::Parse(_) => {
                warn!(error = %self, "upstream failure");
                "upstream fetch failed".to_string()
            }
            _ => {
                error!(error = %self, "request failed");
                "internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
