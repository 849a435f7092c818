//! Expansion of feed items into media URLs.

use crate::api::source::FeedSource;
use crate::error::Result;
use crate::media::item::{ItemDescriptor, Media, MediaUrl};

/// Resolve an item into its ordered list of media URLs.
///
/// A plain image whose URL is already embedded in the feed skips the detail
/// fetch; everything else goes through [`FeedSource::resolve_media`].
pub async fn resolve(
    feed: &dyn FeedSource,
    handle: &str,
    item: &ItemDescriptor,
) -> Result<Vec<MediaUrl>> {
    if let Some(url) = embedded_image(item) {
        return Ok(vec![MediaUrl::image(url)]);
    }

    tracing::debug!("Fetching media detail for {}", item.shortcode);
    let media: Media = feed.resolve_media(handle, item).await?;
    Ok(media.into_urls())
}

fn embedded_image(item: &ItemDescriptor) -> Option<&str> {
    if item.is_video || item.has_multiple_media {
        return None;
    }
    item.display_url.as_deref()
}
