use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// Posts a JSON document to a webhook.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// Returns the HTTP status code, or a description of the transport
    /// failure when no response was received.
    async fn post_json(&self, url: &str, payload: &Value) -> Result<u16, String>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns the `reqwest` error if the client cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("meeting-note-bot/0.1")
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<u16, String> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}
