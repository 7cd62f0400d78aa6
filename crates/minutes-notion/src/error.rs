use thiserror::Error;

/// Errors returned while publishing a summary to Notion.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Neither the channel override nor the defaults name a database.
    #[error("no Notion database configured for channel {channel_id}")]
    Configuration { channel_id: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Notion answered with a non-success status or an unreadable body.
    #[error("Notion API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The page exists but a later batch of blocks could not be appended.
    /// The page is left in place, holding the batches written so far.
    #[error("page {page_id} created but appending batch {batch} failed: {source}")]
    PartialAppend {
        page_id: String,
        batch: usize,
        #[source]
        source: Box<PublishError>,
    },
}
