//! Notion publishing: block-tree rendering, the REST client, and the
//! [`Publisher`] that writes one summary as one database page.

pub mod blocks;
pub mod client;
pub mod error;
pub mod publisher;

pub use blocks::{chunk_text, render_blocks, Block, MAX_TEXT_CHARS};
pub use client::{CreatedPage, NotionApi, NotionClient};
pub use error::PublishError;
pub use publisher::{Publisher, MAX_BLOCKS_PER_REQUEST};
