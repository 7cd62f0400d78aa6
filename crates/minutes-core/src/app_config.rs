use std::net::SocketAddr;

use crate::channel_map::ChannelDestinationMap;

/// Which LLM backend analyses transcripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Google,
    OpenAi,
}

impl std::fmt::Display for LlmProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderKind::Google => write!(f, "google"),
            LlmProviderKind::OpenAi => write!(f, "openai"),
        }
    }
}

/// Output format of the process-wide tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Clone)]
pub struct AppConfig {
    pub discord_bot_token: String,
    pub notion_api_key: String,
    pub notion_database_id: String,
    pub notion_title_property: String,
    pub channel_destinations: ChannelDestinationMap,
    pub llm_provider: LlmProviderKind,
    pub llm_api_key: String,
    pub llm_model: Option<String>,
    pub make_webhook_url: Option<String>,
    pub own_org_names: Vec<String>,
    pub bind_addr: SocketAddr,
    pub render_external_url: Option<String>,
    pub self_ping_interval_secs: u64,
    pub http_timeout_secs: u64,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("discord_bot_token", &"[redacted]")
            .field("notion_api_key", &"[redacted]")
            .field("notion_database_id", &self.notion_database_id)
            .field("notion_title_property", &self.notion_title_property)
            .field("channel_destinations", &self.channel_destinations)
            .field("llm_provider", &self.llm_provider)
            .field("llm_api_key", &"[redacted]")
            .field("llm_model", &self.llm_model)
            .field(
                "make_webhook_url",
                &self.make_webhook_url.as_ref().map(|_| "[redacted]"),
            )
            .field("own_org_names", &self.own_org_names)
            .field("bind_addr", &self.bind_addr)
            .field("render_external_url", &self.render_external_url)
            .field("self_ping_interval_secs", &self.self_ping_interval_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}
