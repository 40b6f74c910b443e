//! Error types and response handling for the web server.
//!
//! Provides structured error classification, HTTP status code mapping,
//! and JSON error response generation.

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::intake::IntakeError;

/// Errors that can occur while serving a request or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Upload rejected before analysis
    #[error("{0}")]
    Intake(#[from] IntakeError),

    /// The model call failed
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// Malformed multipart body
    #[error("Invalid upload: {message}")]
    Multipart { status: StatusCode, message: String },

    /// The form had no `image` field
    #[error("No image file was provided")]
    MissingImage,

    /// Could not bind a listening socket
    #[error("Failed to bind: {0}")]
    Bind(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<axum::extract::multipart::MultipartError> for ServerError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ServerError::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl ServerError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Intake(IntakeError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Intake(IntakeError::UnsupportedFormat(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ServerError::Intake(_) => StatusCode::BAD_REQUEST,
            ServerError::Analysis(err) => match err {
                AnalysisError::NotConfigured { .. } => StatusCode::SERVICE_UNAVAILABLE,
                AnalysisError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                AnalysisError::Upstream { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
                AnalysisError::Blocked { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                AnalysisError::Connection(_)
                | AnalysisError::Upstream { .. }
                | AnalysisError::Parse(_)
                | AnalysisError::EmptyResponse => StatusCode::BAD_GATEWAY,
            },
            ServerError::Multipart { status, .. } => *status,
            ServerError::MissingImage => StatusCode::BAD_REQUEST,
            ServerError::Bind(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Intake(_) => "invalid_image",
            ServerError::Analysis(AnalysisError::NotConfigured { .. }) => "not_configured",
            ServerError::Analysis(AnalysisError::Timeout { .. }) => "request_timeout",
            ServerError::Analysis(AnalysisError::Blocked { .. }) => "blocked",
            ServerError::Analysis(_) => "analysis_failed",
            ServerError::Multipart { .. } => "invalid_request",
            ServerError::MissingImage => "missing_image",
            ServerError::Bind(_) => "bind_error",
            ServerError::Io(_) => "io_error",
        }
    }
}

/// Builder for standardized error responses
pub struct ErrorResponse;

impl ErrorResponse {
    /// Create a JSON error response from a ServerError
    pub fn from_error(err: &ServerError, request_id: &str) -> Response {
        let body = serde_json::json!({
            "error": {
                "type": err.error_type(),
                "message": err.to_string(),
                "request_id": request_id
            }
        });

        let mut response = Response::new(Body::from(body.to_string()));
        *response.status_mut() = err.status_code();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/json"),
        );
        response
    }
}

/// A [`ServerError`] tagged with the request it belongs to.
#[derive(Debug)]
pub struct ApiError {
    pub error: ServerError,
    pub request_id: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ErrorResponse::from_error(&self.error, &self.request_id)
    }
}
