//! Knowledge-base publisher: one summary → one Notion database page.

use std::sync::Arc;

use minutes_core::{ChannelDestinationMap, StructuredSummary};

use crate::blocks::{render_blocks, Block};
use crate::client::NotionApi;
use crate::error::PublishError;

/// Notion accepts at most this many children per create or append request.
pub const MAX_BLOCKS_PER_REQUEST: usize = 100;

pub struct Publisher {
    api: Arc<dyn NotionApi>,
    destinations: Arc<ChannelDestinationMap>,
    title_property: String,
}

impl Publisher {
    #[must_use]
    pub fn new(
        api: Arc<dyn NotionApi>,
        destinations: Arc<ChannelDestinationMap>,
        title_property: impl Into<String>,
    ) -> Self {
        Self {
            api,
            destinations,
            title_property: title_property.into(),
        }
    }

    /// Publishes `summary` to the database mapped to `channel_id` and returns
    /// the page URL.
    ///
    /// 1. Resolve the channel's credentials and database, falling back to the
    ///    defaults field by field.
    /// 2. Render the block tree.
    /// 3. Create the page with the first [`MAX_BLOCKS_PER_REQUEST`] blocks.
    /// 4. Append the remaining blocks in order, one batch per request.
    ///
    /// Makes exactly `max(1, ceil(blocks / 100))` write calls on success.
    ///
    /// # Errors
    ///
    /// - [`PublishError::Configuration`] if no database id resolves.
    /// - [`PublishError::Http`] / [`PublishError::Api`] if page creation fails.
    /// - [`PublishError::PartialAppend`] if an append fails after the page was
    ///   created; the page is not removed.
    pub async fn publish(
        &self,
        summary: &StructuredSummary,
        channel_id: &str,
    ) -> Result<String, PublishError> {
        self.publish_blocks(&summary.title, &render_blocks(summary), channel_id)
            .await
    }

    /// Same as [`Publisher::publish`] for an already rendered block tree.
    ///
    /// # Errors
    ///
    /// See [`Publisher::publish`].
    pub async fn publish_blocks(
        &self,
        title: &str,
        blocks: &[Block],
        channel_id: &str,
    ) -> Result<String, PublishError> {
        let destination = self.destinations.resolve(channel_id);
        if destination.database_id.trim().is_empty() {
            return Err(PublishError::Configuration {
                channel_id: channel_id.to_string(),
            });
        }
        tracing::info!(
            channel_id,
            custom_destination = self.destinations.has_override(channel_id),
            title,
            blocks = blocks.len(),
            "creating Notion page"
        );

        let mut batches = blocks.chunks(MAX_BLOCKS_PER_REQUEST);
        let first = batches.next().unwrap_or_default();
        let page = self
            .api
            .create_page(
                &destination.api_key,
                &destination.database_id,
                &self.title_property,
                title,
                first,
            )
            .await?;
        tracing::info!(page_id = %page.id, url = %page.url, blocks = first.len(), "Notion page created");

        for (i, batch) in batches.enumerate() {
            let batch_number = i + 2;
            self.api
                .append_blocks(&destination.api_key, &page.id, batch)
                .await
                .map_err(|source| PublishError::PartialAppend {
                    page_id: page.id.clone(),
                    batch: batch_number,
                    source: Box::new(source),
                })?;
            tracing::info!(page_id = %page.id, batch = batch_number, blocks = batch.len(), "appended blocks");
        }

        Ok(page.url)
    }
}

#[cfg(test)]
#[path = "publisher_test.rs"]
mod tests;
