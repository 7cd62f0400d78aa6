//! LLM access for meeting analysis.
//!
//! [`LlmProvider`] abstracts a single text-completion call; the Gemini and
//! OpenAI adapters implement it over HTTP. [`Analyzer`] builds the analysis
//! prompt, calls the provider once, and validates the reply into a
//! [`StructuredSummary`](minutes_core::StructuredSummary).

pub mod analyzer;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod prompt;
pub mod provider;

pub use analyzer::Analyzer;
pub use error::AnalysisError;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider::{build_provider, LlmProvider};
