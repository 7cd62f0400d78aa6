use std::sync::Arc;

use minutes_core::{AppConfig, LlmProviderKind};

use crate::error::AnalysisError;
use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;

/// Maximum characters of an error body kept in [`AnalysisError::Provider`].
pub(crate) const ERROR_BODY_CHARS: usize = 300;

/// Single-shot text completion against a hosted model.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Sends `prompt` as one user turn and returns the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError>;
}

/// Builds the provider selected by `LLM_PROVIDER`.
///
/// # Errors
///
/// Returns [`AnalysisError::Http`] if the HTTP client cannot be constructed.
pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn LlmProvider>, AnalysisError> {
    let model = config.llm_model.as_deref();
    let provider: Arc<dyn LlmProvider> = match config.llm_provider {
        LlmProviderKind::Google => Arc::new(GeminiProvider::new(
            &config.llm_api_key,
            model,
            config.http_timeout_secs,
        )?),
        LlmProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
            &config.llm_api_key,
            model,
            config.http_timeout_secs,
        )?),
    };
    tracing::info!(
        provider = provider.name(),
        model = model.unwrap_or("default"),
        "LLM provider selected"
    );
    Ok(provider)
}

pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .connect_timeout(std::time::Duration::from_secs(10))
        .user_agent("meeting-note-bot/0.1")
        .build()
}
