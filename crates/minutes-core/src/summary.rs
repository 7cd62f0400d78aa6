//! Structured summary schema: the typed contract LLM output must satisfy.
//!
//! Field names on the wire follow the JSON the prompt asks the model to emit
//! (`meeting_title`, `discussions`, …); the Rust names follow the domain.
//! Parsing is strict: a missing scalar, a `null` list, a wrongly typed
//! element, or an empty title is a [`SchemaViolation`]. Nothing is coerced.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::truncate_chars;

/// Maximum characters of raw model output kept on a [`SchemaViolation`].
pub const RAW_EXCERPT_CHARS: usize = 500;

/// LLM output that does not match the expected schema.
#[derive(Debug, Error)]
#[error("LLM output does not match the {schema} schema: {reason}")]
pub struct SchemaViolation {
    pub schema: &'static str,
    pub reason: String,
    /// Leading [`RAW_EXCERPT_CHARS`] characters of the offending output.
    pub raw_excerpt: String,
}

impl SchemaViolation {
    fn new(schema: &'static str, reason: impl Into<String>, raw: &str) -> Self {
        Self {
            schema,
            reason: reason.into(),
            raw_excerpt: truncate_chars(raw, RAW_EXCERPT_CHARS).to_string(),
        }
    }
}

/// Full meeting analysis: the canonical output of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredSummary {
    #[serde(rename = "meeting_title")]
    pub title: String,
    #[serde(rename = "meeting_date")]
    pub date: String,
    pub attendees: Vec<String>,
    #[serde(rename = "meeting_purpose")]
    pub purpose: String,
    pub executive_summary: Vec<String>,
    #[serde(rename = "discussions")]
    pub discussion_topics: Vec<DiscussionTopic>,
    /// Optional on the wire; absent means "no decision structure discussed".
    #[serde(default)]
    pub decision_structure: Vec<DecisionStructureItem>,
    pub key_risks: Vec<String>,
    pub decisions: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionTopic {
    #[serde(rename = "topic_title")]
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionStructureItem {
    pub category: String,
    pub subject: String,
    pub influence: String,
    pub criteria: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub subject: String,
    pub action: String,
    pub due_date: String,
    pub purpose: String,
    pub risk: String,
}

/// Short email-oriented summary, produced by its own instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondensedSummary {
    #[serde(rename = "meeting_title")]
    pub title: String,
    #[serde(rename = "meeting_date")]
    pub date: String,
    /// Two or three sentences.
    #[serde(rename = "executive_summary")]
    pub summary: String,
    pub key_points: Vec<String>,
    pub decisions: Vec<String>,
    pub next_actions: Vec<CondensedAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondensedAction {
    pub task: String,
    pub assignee: String,
}

/// JSON shape embedded in the full analysis prompt.
pub const STRUCTURED_SCHEMA_HINT: &str = r#"{
  "meeting_title": "string - YYYYMMDD_고객명_회의내용1줄요약 관련 회의",
  "meeting_date": "string - 회의 일시 (없으면 \"미기재\")",
  "attendees": ["string - 참석자"],
  "meeting_purpose": "string - 회의 목적 1줄",
  "executive_summary": ["string - 핵심 요약 10~15줄"],
  "discussions": [{"topic_title": "string - 논점 제목", "content": "string - 문단형 서술 요약"}],
  "decision_structure": [{"category": "string - 구분", "subject": "string - 주체", "influence": "string - 영향력", "criteria": "string - 기준", "comment": "string - 코멘트"}],
  "key_risks": ["string - 핵심 리스크"],
  "decisions": ["string - 결정사항"],
  "action_items": [{"subject": "string - 주체", "action": "string - 액션", "due_date": "string - 기한 (없으면 \"미정\")", "purpose": "string - 목적", "risk": "string - 리스크"}]
}"#;

/// JSON shape embedded in the condensed (email) prompt.
pub const CONDENSED_SCHEMA_HINT: &str = r#"{
  "meeting_title": "string - 회의 제목",
  "meeting_date": "string - 회의 일시",
  "executive_summary": "string - 핵심 요약 2~3문장",
  "key_points": ["string - 핵심 포인트 3~5개, 한 줄씩"],
  "decisions": ["string - 확정된 결정사항"],
  "next_actions": [{"task": "string - 할 일", "assignee": "string - 담당자"}]
}"#;

/// Parses and validates raw model output as a [`StructuredSummary`].
///
/// # Errors
///
/// Returns [`SchemaViolation`] if the text is not a JSON object of the
/// expected shape or the title is blank.
pub fn parse_structured_summary(raw: &str) -> Result<StructuredSummary, SchemaViolation> {
    let summary: StructuredSummary = decode("meeting analysis", raw)?;
    if summary.title.trim().is_empty() {
        return Err(SchemaViolation::new(
            "meeting analysis",
            "meeting_title is empty",
            raw,
        ));
    }
    Ok(summary)
}

/// Parses and validates raw model output as a [`CondensedSummary`].
///
/// # Errors
///
/// Returns [`SchemaViolation`] if the text is not a JSON object of the
/// expected shape or the title is blank.
pub fn parse_condensed_summary(raw: &str) -> Result<CondensedSummary, SchemaViolation> {
    let summary: CondensedSummary = decode("email summary", raw)?;
    if summary.title.trim().is_empty() {
        return Err(SchemaViolation::new(
            "email summary",
            "meeting_title is empty",
            raw,
        ));
    }
    Ok(summary)
}

fn decode<T: DeserializeOwned>(schema: &'static str, raw: &str) -> Result<T, SchemaViolation> {
    let payload = extract_json_object(raw);
    serde_json::from_str(payload).map_err(|e| SchemaViolation::new(schema, e.to_string(), raw))
}

/// Strips a Markdown code fence, or any prose around the outermost JSON
/// object, from model output.
#[must_use]
pub fn extract_json_object(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(end) = rest.rfind("```") {
            return rest[..end].trim();
        }
    }

    if !trimmed.starts_with('{') {
        if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
            if start < end {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
