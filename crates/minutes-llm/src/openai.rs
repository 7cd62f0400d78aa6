//! OpenAI chat-completions adapter.

use async_trait::async_trait;
use minutes_core::text::truncate_chars;
use serde::Deserialize;
use serde_json::json;

use crate::error::AnalysisError;
use crate::provider::{http_client, LlmProvider, ERROR_BODY_CHARS};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
const TEMPERATURE: f32 = 0.1;
const NAME: &str = "openai";

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Creates a provider pointed at the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, model: Option<&str>, timeout_secs: u64) -> Result<Self, AnalysisError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a provider with a custom base URL, which must include the
    /// version segment (`…/v1`).
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
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let body = json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "response_format": {"type": "json_object"},
            "messages": [{"role": "user", "content": prompt}],
        });

        tracing::debug!(model = %self.model, prompt_chars = prompt.chars().count(), "openai request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
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

        let envelope: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| AnalysisError::provider(NAME, format!("malformed response: {e}")))?;

        let Some(choice) = envelope.choices.into_iter().next() else {
            return Err(AnalysisError::provider(NAME, "no choices in response"));
        };
        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(AnalysisError::provider(
                NAME,
                format!(
                    "empty completion (finish reason: {})",
                    choice.finish_reason.as_deref().unwrap_or("unknown")
                ),
            )),
        }
    }
}
