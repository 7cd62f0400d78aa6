//! Channel → Notion destination lookup.
//!
//! Built once at startup from `CHANNEL_NOTION_MAP`, a JSON object keyed by
//! Discord channel id:
//!
//! ```json
//! {"1234567890": {"api_key": "secret_…", "page_id": "<database id>"}}
//! ```
//!
//! Each field of an entry falls back to the global default independently.
//! A missing channel is not an error; only an unresolvable database id is,
//! and that is for the publisher to decide.

use std::collections::HashMap;

/// Credential and database id a rendered page is written to.
#[derive(Clone, PartialEq, Eq)]
pub struct Destination {
    pub api_key: String,
    pub database_id: String,
}

impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Destination")
            .field("api_key", &"[redacted]")
            .field("database_id", &self.database_id)
            .finish()
    }
}

#[derive(Clone, Default)]
struct DestinationOverride {
    api_key: Option<String>,
    database_id: Option<String>,
}

/// Immutable channel id → destination map with a global default.
#[derive(Clone)]
pub struct ChannelDestinationMap {
    default: Destination,
    overrides: HashMap<String, DestinationOverride>,
}

impl ChannelDestinationMap {
    /// A map with no per-channel overrides.
    #[must_use]
    pub fn new(default: Destination) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Adds an override for `channel_id`. Blank values are treated as absent.
    #[must_use]
    pub fn with_override(
        mut self,
        channel_id: impl Into<String>,
        api_key: Option<&str>,
        database_id: Option<&str>,
    ) -> Self {
        self.overrides.insert(
            channel_id.into(),
            DestinationOverride {
                api_key: non_blank(api_key),
                database_id: non_blank(database_id),
            },
        );
        self
    }

    /// Parses the `CHANNEL_NOTION_MAP` JSON.
    ///
    /// Invalid JSON or a non-object top level is logged and yields a map with
    /// no overrides. Entries that are not objects are skipped, so those
    /// channels resolve to the default.
    #[must_use]
    pub fn from_json(raw: Option<&str>, default: Destination) -> Self {
        let mut map = Self::new(default);
        let Some(raw) = raw else {
            return map;
        };

        let parsed: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "invalid CHANNEL_NOTION_MAP JSON; using empty mapping");
                return map;
            }
        };

        let Some(entries) = parsed.as_object() else {
            tracing::warn!("CHANNEL_NOTION_MAP is not a JSON object; using empty mapping");
            return map;
        };

        for (channel_id, entry) in entries {
            let Some(fields) = entry.as_object() else {
                tracing::warn!(
                    channel_id = %channel_id,
                    "CHANNEL_NOTION_MAP entry is not an object; channel uses defaults"
                );
                continue;
            };
            let api_key = fields.get("api_key").and_then(serde_json::Value::as_str);
            let page_id = fields.get("page_id").and_then(serde_json::Value::as_str);
            map = map.with_override(channel_id.clone(), api_key, page_id);
        }

        tracing::info!(channels = map.len(), "loaded channel mapping");
        map
    }

    /// Resolves the destination for `channel_id`, falling back field by
    /// field to the default.
    #[must_use]
    pub fn resolve(&self, channel_id: &str) -> Destination {
        match self.overrides.get(channel_id) {
            Some(o) => Destination {
                api_key: o
                    .api_key
                    .clone()
                    .unwrap_or_else(|| self.default.api_key.clone()),
                database_id: o
                    .database_id
                    .clone()
                    .unwrap_or_else(|| self.default.database_id.clone()),
            },
            None => self.default.clone(),
        }
    }

    /// Whether `channel_id` has an explicit override.
    #[must_use]
    pub fn has_override(&self, channel_id: &str) -> bool {
        self.overrides.contains_key(channel_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl std::fmt::Debug for ChannelDestinationMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut channels: Vec<&String> = self.overrides.keys().collect();
        channels.sort();
        f.debug_struct("ChannelDestinationMap")
            .field("default", &self.default)
            .field("channels", &channels)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
