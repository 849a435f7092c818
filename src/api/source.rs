//! Seams between the crawl engine and the remote site.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::media::{ItemDescriptor, Media};

/// One page of the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<ItemDescriptor>,
    pub next_cursor: Option<String>,
    pub has_next: bool,
}

/// Paginated access to one account's feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Discover the account and return its id with the first page.
    async fn fetch_first_page(&self, handle: &str) -> Result<(String, Page)>;

    /// Fetch the page following `cursor`.
    ///
    /// Fails with [`Error::FeedExhausted`](crate::Error::FeedExhausted) when the
    /// server has no data for the account/cursor pair.
    async fn fetch_next_page(&self, account_id: &str, cursor: &str) -> Result<Page>;

    /// Fetch the full media detail of an item.
    async fn resolve_media(&self, handle: &str, item: &ItemDescriptor) -> Result<Media>;
}

/// A body being streamed from the network.
pub struct MediaStream {
    /// Declared content length, if the server sent one.
    pub content_length: Option<u64>,
    pub chunks: BoxStream<'static, Result<Bytes>>,
}

/// Raw file fetching used by the downloader.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    async fn open(&self, url: &str) -> Result<MediaStream>;
}
