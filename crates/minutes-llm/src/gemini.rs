//! Google Gemini adapter over the `generateContent` REST endpoint.
//!
//! The API key travels in the `x-goog-api-key` header, never in the URL.
//! Requests ask for a JSON response MIME type so the model emits a bare
//! object.

use async_trait::async_trait;
use minutes_core::text::truncate_chars;
use serde::Deserialize;
use serde_json::json;

use crate::error::AnalysisError;
use crate::provider::{http_client, LlmProvider, ERROR_BODY_CHARS};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const TEMPERATURE: f32 = 0.1;
const NAME: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Creates a provider pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, model: Option<&str>, timeout_secs: u64) -> Result<Self, AnalysisError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a provider with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            client: http_client(timeout_secs)?,
            api_key: api_key.to_owned(),
            model: model.unwrap_or(DEFAULT_MODEL).to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "responseMimeType": "application/json",
            },
        });

        tracing::debug!(model = %self.model, prompt_chars = prompt.chars().count(), "gemini request");

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AnalysisError::provider(
                NAME,
                format!(
                    "HTTP {} - {}",
                    status.as_u16(),
                    truncate_chars(&text, ERROR_BODY_CHARS)
                ),
            ));
        }

        let envelope: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| AnalysisError::provider(NAME, format!("malformed response: {e}")))?;
        extract_text(envelope)
    }
}

fn extract_text(envelope: GenerateResponse) -> Result<String, AnalysisError> {
    let Some(candidate) = envelope.candidates.into_iter().next() else {
        let reason = envelope
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "unknown".to_string());
        return Err(AnalysisError::provider(
            NAME,
            format!("no candidates in response (block reason: {reason})"),
        ));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(AnalysisError::provider(
            NAME,
            format!("empty completion (finish reason: {reason})"),
        ));
    }
    Ok(text)
}
