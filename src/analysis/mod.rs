//! Upstream model call: one image and the report prompt in, raw text out.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{GeminiClient, ModelSettings, TimeoutConfig};
pub use error::AnalysisError;
pub use prompt::{build_prompt, REPORT_PROMPT};
