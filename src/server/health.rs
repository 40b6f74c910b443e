//! `/health` endpoint.

use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Body of a `/health` response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub model: String,
    /// False when no API key was found at startup.
    pub model_configured: bool,
}

/// Answers health checks with the model name and key status fixed at startup.
pub struct HealthHandler {
    model: String,
    model_configured: bool,
}

impl HealthHandler {
    pub fn new(model: impl Into<String>, model_configured: bool) -> Self {
        Self {
            model: model.into(),
            model_configured,
        }
    }

    pub async fn handle(&self) -> Response {
        let health = HealthStatus {
            status: "healthy".to_string(),
            service: "scanreport".to_string(),
            model: self.model.clone(),
            model_configured: self.model_configured,
        };

        Json(health).into_response()
    }
}
