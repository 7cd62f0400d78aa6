use std::sync::Arc;

use minutes_core::{render_html, render_markdown, StructuredSummary};
use serde::Serialize;

use crate::transport::WebhookTransport;

/// Detail reported when no webhook URL is configured.
pub const NOT_CONFIGURED: &str = "not configured";

const SUCCESS_STATUSES: [u16; 3] = [200, 201, 202];

/// Result of one notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub success: bool,
    pub detail: String,
}

impl DispatchOutcome {
    fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

/// JSON body posted to the webhook.
#[derive(Debug, Serialize)]
pub struct NotificationPayload<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub summary: &'a [String],
    /// HTML email body.
    pub email_body: String,
    /// Markdown attachment.
    pub md_content: String,
    pub notion_url: Option<&'a str>,
}

impl<'a> NotificationPayload<'a> {
    #[must_use]
    pub fn new(summary: &'a StructuredSummary, notion_url: Option<&'a str>) -> Self {
        Self {
            title: &summary.title,
            date: &summary.date,
            summary: &summary.executive_summary,
            email_body: render_html(summary),
            md_content: render_markdown(summary),
            notion_url,
        }
    }
}

pub struct Dispatcher {
    transport: Arc<dyn WebhookTransport>,
    webhook_url: Option<String>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(transport: Arc<dyn WebhookTransport>, webhook_url: Option<String>) -> Self {
        if webhook_url.is_none() {
            tracing::warn!("MAKE_WEBHOOK_URL is not set; notifications will be skipped");
        }
        Self {
            transport,
            webhook_url,
        }
    }

    /// Posts the rendered summary and the Notion page link to the webhook.
    ///
    /// Never fails: a missing webhook, a transport error, or a status outside
    /// 200/201/202 comes back as an unsuccessful [`DispatchOutcome`].
    pub async fn notify(
        &self,
        summary: &StructuredSummary,
        notion_url: Option<&str>,
    ) -> DispatchOutcome {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::warn!(title = %summary.title, "webhook not configured, skipping notification");
            return DispatchOutcome::failed(NOT_CONFIGURED);
        };

        let payload = match serde_json::to_value(NotificationPayload::new(summary, notion_url)) {
            Ok(payload) => payload,
            Err(e) => return DispatchOutcome::failed(format!("payload encoding failed: {e}")),
        };

        tracing::info!(title = %summary.title, "sending webhook notification");
        match self.transport.post_json(url, &payload).await {
            Ok(status) if SUCCESS_STATUSES.contains(&status) => {
                tracing::info!(status, "webhook accepted notification");
                DispatchOutcome {
                    success: true,
                    detail: format!("webhook returned status {status}"),
                }
            }
            Ok(status) => {
                tracing::error!(status, "webhook rejected notification");
                DispatchOutcome::failed(format!("webhook returned status {status}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "webhook request failed");
                DispatchOutcome::failed(e)
            }
        }
    }
}
