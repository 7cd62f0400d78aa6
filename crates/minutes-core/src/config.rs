use crate::app_config::{AppConfig, LlmProviderKind, LogFormat};
use crate::channel_map::{ChannelDestinationMap, Destination};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let discord_bot_token = require("DISCORD_BOT_TOKEN")?;
    let notion_api_key = require("NOTION_API_KEY")?;
    let notion_database_id = or_default("NOTION_DATABASE_ID", "");
    let notion_title_property = or_default("NOTION_TITLE_PROPERTY", "이름");

    let llm_provider = parse_llm_provider(&or_default("LLM_PROVIDER", "google"))?;
    let llm_api_key = match llm_provider {
        LlmProviderKind::Google => require("GOOGLE_API_KEY")?,
        LlmProviderKind::OpenAi => require("OPENAI_API_KEY")?,
    };
    let llm_model = optional("LLM_MODEL");

    let make_webhook_url = optional("MAKE_WEBHOOK_URL");
    let own_org_names = optional("OWN_ORG_NAMES")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let port = parse_u16("PORT", "10000")?;
    let bind_addr = SocketAddr::from(([0, 0, 0, 0], port));
    let render_external_url =
        optional("RENDER_EXTERNAL_URL").map(|url| url.trim_end_matches('/').to_string());
    let self_ping_interval_secs = parse_u64("SELF_PING_INTERVAL", "780")?;
    let http_timeout_secs = parse_u64("HTTP_TIMEOUT_SECS", "120")?;

    let log_level = or_default("LOG_LEVEL", "info");
    let log_format = parse_log_format(&or_default("LOG_FORMAT", "json"))?;

    let channel_destinations = ChannelDestinationMap::from_json(
        optional("CHANNEL_NOTION_MAP").as_deref(),
        Destination {
            api_key: notion_api_key.clone(),
            database_id: notion_database_id.clone(),
        },
    );

    Ok(AppConfig {
        discord_bot_token,
        notion_api_key,
        notion_database_id,
        notion_title_property,
        channel_destinations,
        llm_provider,
        llm_api_key,
        llm_model,
        make_webhook_url,
        own_org_names,
        bind_addr,
        render_external_url,
        self_ping_interval_secs,
        http_timeout_secs,
        log_level,
        log_format,
    })
}

fn parse_llm_provider(s: &str) -> Result<LlmProviderKind, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "google" | "gemini" => Ok(LlmProviderKind::Google),
        "openai" => Ok(LlmProviderKind::OpenAi),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LLM_PROVIDER".to_string(),
            reason: format!("unknown provider '{other}', expected 'google' or 'openai'"),
        }),
    }
}

fn parse_log_format(s: &str) -> Result<LogFormat, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" | "text" => Ok(LogFormat::Pretty),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LOG_FORMAT".to_string(),
            reason: format!("unknown format '{other}', expected 'json' or 'pretty'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
