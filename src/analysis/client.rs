//! Client for the hosted multimodal model (Gemini `generateContent`).

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::config::{Config, CredentialStatus, Defaults, SecureString};
use crate::intake::ImageUpload;

use super::error::AnalysisError;
use super::prompt::build_prompt;

/// Longest upstream error body carried into an error message.
const MAX_ERROR_MESSAGE_CHARS: usize = 500;

#[derive(Debug, Clone, Copy)]
pub struct TimeoutConfig {
    pub request: Duration,
    pub connect: Duration,
}

impl From<&Defaults> for TimeoutConfig {
    fn from(defaults: &Defaults) -> Self {
        Self {
            request: Duration::from_secs(defaults.timeout_seconds as u64),
            connect: Duration::from_secs(defaults.connect_timeout_seconds as u64),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from(&Defaults::default())
    }
}

/// Everything the client needs, resolved up front.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub base_url: String,
    pub model: String,
    pub credential: CredentialStatus,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub timeouts: TimeoutConfig,
}

impl ModelSettings {
    /// Build settings from config plus an already-resolved credential.
    pub fn from_config(config: &Config, credential: CredentialStatus) -> Self {
        Self {
            base_url: config.model.base_url.clone(),
            model: config.model.model.clone(),
            credential,
            temperature: config.model.temperature,
            max_output_tokens: config.model.max_output_tokens,
            timeouts: TimeoutConfig::from(&config.defaults),
        }
    }
}

/// Sends one image plus the report prompt and returns the model's text.
pub struct GeminiClient {
    client: Client,
    settings: ModelSettings,
}

impl GeminiClient {
    pub fn new(settings: ModelSettings) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .connect_timeout(settings.timeouts.connect)
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    pub fn is_configured(&self) -> bool {
        self.settings.credential.key().is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Ask the model for a diagnostic report on `image`.
    ///
    /// Failures are returned as-is; the call is never retried.
    pub async fn analyze(
        &self,
        image: &ImageUpload,
        notes: Option<&str>,
    ) -> Result<String, AnalysisError> {
        let api_key = match &self.settings.credential {
            CredentialStatus::Configured(key) => key,
            CredentialStatus::Unconfigured { reason } => {
                return Err(AnalysisError::NotConfigured {
                    reason: reason.clone(),
                })
            }
        };

        let request = self.build_request(image, notes);
        let url = self.endpoint();

        tracing::debug!(
            url = %url,
            model = %self.settings.model,
            image_bytes = image.len(),
            "Sending analysis request"
        );

        let start = Instant::now();
        let limit = self.settings.timeouts.request;
        let text = match timeout(limit, self.send(&url, api_key, &request)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(AnalysisError::Timeout {
                    duration: limit.as_secs(),
                })
            }
        };

        tracing::info!(
            model = %self.settings.model,
            latency_ms = start.elapsed().as_millis() as u64,
            response_chars = text.len(),
            "Analysis complete"
        );

        Ok(text)
    }

    async fn send(
        &self,
        url: &str,
        api_key: &SecureString,
        request: &GenerateRequest,
    ) -> Result<String, AnalysisError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = upstream_error_message(&body);
            tracing::error!(status = %status, error = %message, "Model API error");
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AnalysisError::Parse(format!("Failed to parse response JSON: {}", e)))?;

        extract_text(parsed)
    }

    fn build_request(&self, image: &ImageUpload, notes: Option<&str>) -> GenerateRequest {
        let generation_config =
            if self.settings.temperature.is_some() || self.settings.max_output_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: self.settings.temperature,
                    max_output_tokens: self.settings.max_output_tokens,
                })
            } else {
                None
            };

        GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![
                    RequestPart::Text {
                        text: build_prompt(notes),
                    },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: image.base64_data(),
                        },
                    },
                ],
            }],
            generation_config,
        }
    }
}

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// `generateContent` response body, reduced to what we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Join the text parts of the first candidate, skipping thought summaries.
fn extract_text(response: GenerateResponse) -> Result<String, AnalysisError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AnalysisError::Blocked { reason });
        }
        return Err(AnalysisError::EmptyResponse);
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|part| !part.thought)
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        if let Some(reason) = candidate.finish_reason.filter(|r| r == "SAFETY") {
            return Err(AnalysisError::Blocked { reason });
        }
        return Err(AnalysisError::EmptyResponse);
    }

    Ok(text)
}

/// Pull `error.message` out of a Google API error body, or fall back to the raw text.
fn upstream_error_message(body: &str) -> String {
    let from_envelope = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        });

    match from_envelope {
        Some(message) => message,
        None if body.trim().is_empty() => "empty error body".to_string(),
        None => body.trim().chars().take(MAX_ERROR_MESSAGE_CHARS).collect(),
    }
}
