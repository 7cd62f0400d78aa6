//! One transcript upload, end to end.
//!
//! `Received → Downloaded → Analyzing → Analyzed → Publishing → Published →
//! Notifying → Done`, with `Failed(stage)` reachable from the download,
//! analysis and publish stages only. Notification never fails a run.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use minutes_core::text::truncate_chars;
use minutes_core::{decode_transcript, file_stem};
use minutes_llm::Analyzer;
use minutes_notify::{DispatchOutcome, Dispatcher};
use minutes_notion::Publisher;
use tracing::Instrument;
use uuid::Uuid;

use crate::stats::PipelineStats;

/// Maximum characters of an error description shown to the uploader.
pub const USER_ERROR_CHARS: usize = 100;

/// Characters of the uploader's message echoed in the analyzing line; keeps
/// the status under Discord's 2000-character message limit.
const STATUS_USER_TEXT_CHARS: usize = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Download,
    Analysis,
    Publish,
}

impl FailedStage {
    fn status_prefix(self) -> &'static str {
        match self {
            FailedStage::Download => "❌ 파일 읽기 실패",
            FailedStage::Analysis => "❌ AI 분석 실패",
            FailedStage::Publish => "❌ Notion 저장 실패",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Received,
    Downloaded,
    Analyzing,
    Analyzed,
    Publishing,
    Published,
    Notifying,
    Done,
    Failed(FailedStage),
}

/// Receives every state transition of a run.
///
/// `message` carries the user-facing status line for states that have one.
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn transition(&self, state: RunState, message: Option<&str>);
}

/// Identifies one uploaded transcript.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub file_name: String,
    pub channel_id: String,
    /// Text typed alongside the upload, if any.
    pub user_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineFailure {
    pub stage: FailedStage,
    /// Error description, at most [`USER_ERROR_CHARS`] characters.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    Done {
        title: String,
        executive_summary: Vec<String>,
        page_url: String,
        dispatch: DispatchOutcome,
    },
    Failed(PipelineFailure),
}

pub struct PipelineCoordinator {
    analyzer: Arc<Analyzer>,
    publisher: Arc<Publisher>,
    dispatcher: Arc<Dispatcher>,
    stats: Arc<PipelineStats>,
}

impl PipelineCoordinator {
    #[must_use]
    pub fn new(
        analyzer: Arc<Analyzer>,
        publisher: Arc<Publisher>,
        dispatcher: Arc<Dispatcher>,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self {
            analyzer,
            publisher,
            dispatcher,
            stats,
        }
    }

    /// Drives one run to `Done` or `Failed`, reporting each transition to
    /// `sink`. `download` yields the attachment bytes.
    ///
    /// Stats record a success only on `Done`.
    pub async fn run<D>(
        &self,
        request: RunRequest,
        download: D,
        sink: &dyn StatusSink,
    ) -> RunReport
    where
        D: Future<Output = Result<Vec<u8>, String>> + Send,
    {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "pipeline_run",
            %run_id,
            file = %request.file_name,
            channel_id = %request.channel_id,
        );
        self.drive(request, download, sink).instrument(span).await
    }

    async fn drive<D>(
        &self,
        request: RunRequest,
        download: D,
        sink: &dyn StatusSink,
    ) -> RunReport
    where
        D: Future<Output = Result<Vec<u8>, String>> + Send,
    {
        let file = request.file_name.as_str();
        let user_text = request
            .user_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        tracing::info!("transcript received");
        sink.transition(
            RunState::Received,
            Some(&format!("📥 Downloading **{file}**...")),
        )
        .await;

        let fetched = download.await;
        sink.transition(RunState::Downloaded, None).await;
        let bytes = match fetched {
            Ok(bytes) => bytes,
            Err(e) => {
                return fail(sink, FailedStage::Download, &format!("download failed: {e}")).await
            }
        };
        let transcript = match decode_transcript(bytes) {
            Ok(text) => text,
            Err(e) => return fail(sink, FailedStage::Download, &e.to_string()).await,
        };
        tracing::info!(chars = transcript.chars().count(), "transcript decoded");

        sink.transition(RunState::Analyzing, Some(&analyzing_status(file, user_text)))
            .await;
        let summary = match self
            .analyzer
            .analyze_upload(&transcript, Some(file_stem(file)), user_text)
            .await
        {
            Ok(summary) => summary,
            Err(e) => return fail(sink, FailedStage::Analysis, &e.to_string()).await,
        };
        sink.transition(RunState::Analyzed, None).await;

        sink.transition(RunState::Publishing, Some("📝 Saving to Notion..."))
            .await;
        let page_url = match self.publisher.publish(&summary, &request.channel_id).await {
            Ok(url) => url,
            Err(e) => return fail(sink, FailedStage::Publish, &e.to_string()).await,
        };
        sink.transition(RunState::Published, None).await;

        sink.transition(RunState::Notifying, Some("📤 Sending email via Make.com..."))
            .await;
        let dispatch = self.dispatcher.notify(&summary, Some(&page_url)).await;

        self.stats.record_success(Utc::now());
        tracing::info!(
            title = %summary.title,
            page_url = %page_url,
            notified = dispatch.success,
            "pipeline run complete"
        );
        sink.transition(RunState::Done, None).await;

        RunReport::Done {
            title: summary.title,
            executive_summary: summary.executive_summary,
            page_url,
            dispatch,
        }
    }
}

fn analyzing_status(file: &str, user_text: Option<&str>) -> String {
    match user_text {
        Some(text) => format!(
            "🧠 Analyzing **{file}** with custom instructions: \"{}\"...",
            truncate_chars(text, STATUS_USER_TEXT_CHARS)
        ),
        None => format!("🧠 Analyzing **{file}** with AI... (This may take a minute)"),
    }
}

async fn fail(sink: &dyn StatusSink, stage: FailedStage, detail: &str) -> RunReport {
    tracing::error!(stage = ?stage, error = %detail, "pipeline run failed");
    let message = truncate_chars(detail, USER_ERROR_CHARS).to_string();
    sink.transition(
        RunState::Failed(stage),
        Some(&format!("{}: {message}", stage.status_prefix())),
    )
    .await;
    RunReport::Failed(PipelineFailure { stage, message })
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
