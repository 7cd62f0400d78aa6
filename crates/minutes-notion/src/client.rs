//! HTTP client for the Notion REST API.
//!
//! Only the two calls publishing needs: create a database page with its
//! first batch of children, and append further children to a block.
//! Credentials are passed per call because each channel may map to its own
//! integration token.

use std::time::Duration;

use async_trait::async_trait;
use minutes_core::text::truncate_chars;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::blocks::{chunk_text, Block};
use crate::error::PublishError;

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const ERROR_BODY_CHARS: usize = 300;

/// Page returned by a successful create call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPage {
    pub id: String,
    pub url: String,
}

/// Knowledge-base writes used by the [`Publisher`](crate::Publisher).
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// Creates a page in `database_id` titled `title`, with `blocks` as its
    /// initial children.
    async fn create_page(
        &self,
        api_key: &str,
        database_id: &str,
        title_property: &str,
        title: &str,
        blocks: &[Block],
    ) -> Result<CreatedPage, PublishError>;

    /// Appends `blocks` after the existing children of `page_id`.
    async fn append_blocks(
        &self,
        api_key: &str,
        page_id: &str,
        blocks: &[Block],
    ) -> Result<(), PublishError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// reqwest-backed [`NotionApi`].
pub struct NotionClient {
    client: Client,
    base_url: String,
}

impl NotionClient {
    /// Creates a client pointed at the production Notion API.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, PublishError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("meeting-note-bot/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn authorized(builder: RequestBuilder, api_key: &str) -> RequestBuilder {
        builder
            .bearer_auth(api_key)
            .header("Notion-Version", NOTION_VERSION)
    }

    /// Maps a non-success response to [`PublishError::Api`], using Notion's
    /// `{code, message}` error body when present.
    async fn check_status(response: Response) -> Result<Response, PublishError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await?;
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody {
                code: Some(code),
                message: Some(message),
            }) => format!("{code}: {message}"),
            _ => truncate_chars(&text, ERROR_BODY_CHARS).to_string(),
        };
        Err(PublishError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn create_page(
        &self,
        api_key: &str,
        database_id: &str,
        title_property: &str,
        title: &str,
        blocks: &[Block],
    ) -> Result<CreatedPage, PublishError> {
        let title_segments: Vec<Value> = chunk_text(title)
            .into_iter()
            .map(|chunk| json!({"text": {"content": chunk}}))
            .collect();
        let body = json!({
            "parent": {"database_id": database_id},
            "properties": {title_property: {"title": title_segments}},
            "children": blocks.iter().map(Block::to_value).collect::<Vec<_>>(),
        });

        let request = self.client.post(format!("{}/pages", self.base_url));
        let response = Self::authorized(request, api_key).json(&body).send().await?;
        let response = Self::check_status(response).await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| PublishError::Api {
            status,
            message: format!("malformed page response: {e}"),
        })
    }

    async fn append_blocks(
        &self,
        api_key: &str,
        page_id: &str,
        blocks: &[Block],
    ) -> Result<(), PublishError> {
        let body = json!({
            "children": blocks.iter().map(Block::to_value).collect::<Vec<_>>(),
        });
        let request = self
            .client
            .patch(format!("{}/blocks/{page_id}/children", self.base_url));
        let response = Self::authorized(request, api_key).json(&body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
