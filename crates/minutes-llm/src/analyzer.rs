//! Analysis orchestrator: one provider call, then strict validation.

use std::sync::Arc;

use minutes_core::title::TitleCheck;
use minutes_core::{
    compose_guidance, parse_condensed_summary, parse_structured_summary, CondensedSummary,
    StructuredSummary, TitlePolicy, TitleSources,
};

use crate::error::AnalysisError;
use crate::prompt::{analysis_prompt, condensed_prompt};
use crate::provider::LlmProvider;

pub struct Analyzer {
    provider: Arc<dyn LlmProvider>,
    policy: TitlePolicy,
}

impl Analyzer {
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, policy: TitlePolicy) -> Self {
        Self { provider, policy }
    }

    /// Produces a validated [`StructuredSummary`] for `transcript`.
    ///
    /// No retries: a single provider call either yields schema-valid output or
    /// an error.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Http`] / [`AnalysisError::Provider`] when the call
    ///   fails or returns no completion text.
    /// - [`AnalysisError::Schema`] when the completion does not validate.
    pub async fn analyze(
        &self,
        transcript: &str,
        guidance: Option<&str>,
    ) -> Result<StructuredSummary, AnalysisError> {
        tracing::info!(
            provider = self.provider.name(),
            guided = guidance.is_some(),
            "starting meeting analysis"
        );
        let raw = self
            .provider
            .complete(&analysis_prompt(transcript, guidance))
            .await?;
        let summary = parse_structured_summary(&raw)?;
        tracing::info!(title = %summary.title, "meeting analysis complete");
        Ok(summary)
    }

    /// Analyzes an uploaded transcript, composing guidance from the filename
    /// stem and the text typed alongside the upload, then reviews the title
    /// against [`TitlePolicy`].
    ///
    /// Title review is advisory: inconsistencies are logged, never returned.
    ///
    /// # Errors
    ///
    /// Same as [`Analyzer::analyze`].
    pub async fn analyze_upload(
        &self,
        transcript: &str,
        filename_stem: Option<&str>,
        user_text: Option<&str>,
    ) -> Result<StructuredSummary, AnalysisError> {
        let guidance = compose_guidance(filename_stem, user_text);
        let summary = self.analyze(transcript, guidance.as_deref()).await?;

        let sources = TitleSources {
            user_text: user_text.map(str::trim).filter(|t| !t.is_empty()),
            filename_hint: filename_stem,
            transcript,
        };
        self.review_title(&summary.title, &sources);
        Ok(summary)
    }

    /// Produces the condensed email summary.
    ///
    /// # Errors
    ///
    /// Same as [`Analyzer::analyze`].
    pub async fn analyze_condensed(
        &self,
        transcript: &str,
    ) -> Result<CondensedSummary, AnalysisError> {
        let raw = self.provider.complete(&condensed_prompt(transcript)).await?;
        let summary = parse_condensed_summary(&raw)?;
        tracing::info!(title = %summary.title, "email summary complete");
        Ok(summary)
    }

    fn review_title(&self, title: &str, sources: &TitleSources<'_>) {
        match self.policy.check_title(title, sources) {
            TitleCheck::Consistent => {}
            TitleCheck::Malformed => {
                tracing::warn!(title, "generated title does not match YYYYMMDD_subject_topic format");
            }
            TitleCheck::SubjectMismatch { found, expected } => {
                tracing::warn!(
                    title,
                    found = %found,
                    expected = %expected.name,
                    expected_source = ?expected.source,
                    "generated title subject differs from derived subject"
                );
            }
            TitleCheck::UnsupportedSubject { found } => {
                tracing::warn!(title, found = %found, "generated title subject appears in no source");
            }
        }
    }
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
