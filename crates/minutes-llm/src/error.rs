use minutes_core::SchemaViolation;
use thiserror::Error;

/// Errors returned while producing a validated summary.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered, but not with usable completion text: non-2xx
    /// status, quota or safety block, or an unexpected envelope.
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// The completion text does not satisfy the summary schema.
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

impl AnalysisError {
    pub(crate) fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }
}
