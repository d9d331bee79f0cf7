use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::TARGET_LLM_REQUEST;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(20);

/// Why a remote analysis produced no text.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("API request timed out.")]
    Timeout,
    #[error("API Request Failed - {0}")]
    Transport(String),
    #[error("Unexpected API response format.")]
    UnexpectedShape,
    #[error("No response from AI.")]
    EmptyResponse,
}

impl AnalysisError {
    /// The text shown in place of an analysis that failed.
    pub fn as_report_text(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Renders an analysis outcome as report text.
pub fn analysis_text(outcome: Result<String, AnalysisError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(e) => e.as_report_text(),
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Pulls `candidates[0].content.parts[0].text` out of a generateContent response body.
pub fn extract_response_text(body: &str) -> Result<String, AnalysisError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|_| AnalysisError::UnexpectedShape)?;

    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .ok_or(AnalysisError::UnexpectedShape)?;

    content
        .parts
        .into_iter()
        .next()
        .and_then(|part| part.text)
        .ok_or(AnalysisError::EmptyResponse)
}

/// Client for a Gemini-style generateContent endpoint.
#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
    generation: GenerationConfig,
}

impl AnalysisClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            timeout,
            generation: GenerationConfig::default(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// Sends one prompt. There is no retry: a timeout or failure is returned to the caller.
    pub async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.generation,
        };

        debug!(target: TARGET_LLM_REQUEST, "Sending analysis request to {} with prompt: {}", self.url(), prompt);

        let request = async {
            let response = self
                .client
                .post(self.url())
                .header("x-goog-api-key", &self.api_key)
                .json(&payload)
                .send()
                .await?
                .error_for_status()?;
            response.text().await
        };

        let body = match timeout(self.timeout, request).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) if e.is_timeout() => {
                warn!(target: TARGET_LLM_REQUEST, "Analysis request timed out");
                return Err(AnalysisError::Timeout);
            }
            Ok(Err(e)) => {
                warn!(target: TARGET_LLM_REQUEST, "Analysis request failed: {}", e);
                return Err(AnalysisError::Transport(e.without_url().to_string()));
            }
            Err(_) => {
                warn!(
                    target: TARGET_LLM_REQUEST,
                    "Analysis request timed out after {} seconds",
                    self.timeout.as_secs()
                );
                return Err(AnalysisError::Timeout);
            }
        };

        let text = match extract_response_text(&body) {
            Ok(text) => text,
            Err(e) => {
                warn!(target: TARGET_LLM_REQUEST, "Could not read analysis response ({}): {}", e, body);
                return Err(e);
            }
        };

        info!(target: TARGET_LLM_REQUEST, "Received {} characters of analysis", text.len());
        Ok(text)
    }
}
