use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("DISCORD_BOT_TOKEN", "discord-token");
    m.insert("NOTION_API_KEY", "secret_notion");
    m.insert("NOTION_DATABASE_ID", "db-default");
    m.insert("GOOGLE_API_KEY", "google-key");
    m
}

#[test]
fn parse_llm_provider_accepts_known_values() {
    assert_eq!(parse_llm_provider("google").unwrap(), LlmProviderKind::Google);
    assert_eq!(parse_llm_provider("Gemini").unwrap(), LlmProviderKind::Google);
    assert_eq!(parse_llm_provider("openai").unwrap(), LlmProviderKind::OpenAi);
}

#[test]
fn parse_llm_provider_unknown_fails() {
    let err = parse_llm_provider("anthropic").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LLM_PROVIDER"));
}

#[test]
fn parse_log_format_unknown_fails() {
    let err = parse_log_format("xml").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LOG_FORMAT"));
}

#[test]
fn build_app_config_fails_without_discord_token() {
    let mut map = full_env();
    map.remove("DISCORD_BOT_TOKEN");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DISCORD_BOT_TOKEN"),
        "expected MissingEnvVar(DISCORD_BOT_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_required_var_as_missing() {
    let mut map = full_env();
    map.insert("NOTION_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NOTION_API_KEY"),
        "expected MissingEnvVar(NOTION_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_requires_key_for_selected_provider() {
    let mut map = full_env();
    map.insert("LLM_PROVIDER", "openai");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OPENAI_API_KEY"),
        "expected MissingEnvVar(OPENAI_API_KEY), got: {result:?}"
    );

    map.insert("OPENAI_API_KEY", "openai-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.llm_provider, LlmProviderKind::OpenAi);
    assert_eq!(cfg.llm_api_key, "openai-key");
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.llm_provider, LlmProviderKind::Google);
    assert_eq!(cfg.llm_api_key, "google-key");
    assert!(cfg.llm_model.is_none());
    assert_eq!(cfg.notion_database_id, "db-default");
    assert_eq!(cfg.notion_title_property, "이름");
    assert!(cfg.make_webhook_url.is_none());
    assert!(cfg.own_org_names.is_empty());
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:10000");
    assert!(cfg.render_external_url.is_none());
    assert_eq!(cfg.self_ping_interval_secs, 780);
    assert_eq!(cfg.http_timeout_secs, 120);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.log_format, LogFormat::Json);
    assert!(cfg.channel_destinations.is_empty());
}

#[test]
fn build_app_config_port_override() {
    let mut map = full_env();
    map.insert("PORT", "8080");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
}

#[test]
fn build_app_config_port_invalid() {
    let mut map = full_env();
    map.insert("PORT", "not-a-port");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PORT"),
        "expected InvalidEnvVar(PORT), got: {result:?}"
    );
}

#[test]
fn build_app_config_self_ping_interval_invalid() {
    let mut map = full_env();
    map.insert("SELF_PING_INTERVAL", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SELF_PING_INTERVAL"),
        "expected InvalidEnvVar(SELF_PING_INTERVAL), got: {result:?}"
    );
}

#[test]
fn build_app_config_trims_render_url_slash() {
    let mut map = full_env();
    map.insert("RENDER_EXTERNAL_URL", "https://bot.onrender.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.render_external_url.as_deref(),
        Some("https://bot.onrender.com")
    );
}

#[test]
fn build_app_config_splits_own_org_names() {
    let mut map = full_env();
    map.insert("OWN_ORG_NAMES", "브리지텍, Bridgetec ,,");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.own_org_names, vec!["브리지텍", "Bridgetec"]);
}

#[test]
fn build_app_config_loads_channel_map() {
    let mut map = full_env();
    map.insert(
        "CHANNEL_NOTION_MAP",
        r#"{"123": {"api_key": "secret_team", "page_id": "db-team"}}"#,
    );
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.channel_destinations.len(), 1);
    let dest = cfg.channel_destinations.resolve("123");
    assert_eq!(dest.api_key, "secret_team");
    assert_eq!(dest.database_id, "db-team");
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = full_env();
    map.insert("MAKE_WEBHOOK_URL", "https://hook.make.com/abc");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("discord-token"));
    assert!(!rendered.contains("secret_notion"));
    assert!(!rendered.contains("google-key"));
    assert!(!rendered.contains("hook.make.com"));
}
