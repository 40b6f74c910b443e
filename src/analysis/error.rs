//! Error types for the upstream model call.

use thiserror::Error;

/// Errors that can occur while asking the model for a report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No API key was available when the client was built
    #[error("Model API key not configured: {reason}")]
    NotConfigured { reason: String },

    /// Failed to reach the model endpoint
    #[error("Connection to model API failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// The call exceeded the configured timeout
    #[error("Model request timed out after {duration}s")]
    Timeout { duration: u64 },

    /// The API answered with a non-success status
    #[error("Model API error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// The prompt or image was rejected by the provider's safety filters
    #[error("Request blocked by the model provider: {reason}")]
    Blocked { reason: String },

    /// The response body was not in the expected shape
    #[error("Failed to parse model response: {0}")]
    Parse(String),

    /// The response contained no text
    #[error("Model returned an empty response")]
    EmptyResponse,
}
