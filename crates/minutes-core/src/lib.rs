//! Core types for the meeting-minutes bot.
//!
//! Holds everything that does not talk to the network: environment
//! configuration, the channel → Notion destination map, the structured
//! summary schema and its validation, the title derivation policy, and the
//! Markdown / plain-text / HTML renderers.

pub mod app_config;
pub mod channel_map;
pub mod config;
pub mod render;
pub mod summary;
pub mod text;
pub mod title;
pub mod transcript;

pub use app_config::{AppConfig, LlmProviderKind, LogFormat};
pub use channel_map::{ChannelDestinationMap, Destination};
pub use config::{load_app_config, load_app_config_from_env};
pub use summary::{
    parse_condensed_summary, parse_structured_summary, ActionItem, CondensedAction,
    CondensedSummary, DecisionStructureItem, DiscussionTopic, SchemaViolation, StructuredSummary,
};
pub use render::{render_condensed_markdown, render_html, render_markdown, render_plain_text};
pub use title::{
    compose_guidance, DerivedSubject, SubjectSource, TitleCheck, TitlePolicy, TitleSources,
};
pub use transcript::{decode_transcript, file_stem, is_supported_transcript, TranscriptError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
