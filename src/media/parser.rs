//! Conversion of API responses into feed pages and media.

use crate::api::source::Page;
use crate::api::types::{
    ShortcodeMedia, SidecarNode, TimelineMedia, TimelineNode, TYPENAME_IMAGE, TYPENAME_SIDECAR,
    TYPENAME_VIDEO,
};
use crate::error::{Error, Result};
use crate::media::item::{ItemDescriptor, Media, MediaUrl};

/// Build a feed page from one timeline response.
pub fn parse_timeline(media: TimelineMedia) -> Page {
    Page {
        items: media
            .edges
            .into_iter()
            .map(|edge| parse_timeline_node(edge.node))
            .collect(),
        next_cursor: media.page_info.end_cursor,
        has_next: media.page_info.has_next_page,
    }
}

fn parse_timeline_node(node: TimelineNode) -> ItemDescriptor {
    let has_multiple_media = node.typename.as_deref() == Some(TYPENAME_SIDECAR);

    // Only a plain image carries its final URL in the feed.
    let display_url = if !node.is_video && !has_multiple_media {
        node.display_url
    } else {
        None
    };

    ItemDescriptor {
        shortcode: node.shortcode,
        is_video: node.is_video,
        has_multiple_media,
        display_url,
    }
}

/// Convert a post detail into media.
///
/// Returns `None` for post kinds that carry no downloadable media.
pub fn parse_shortcode_media(media: ShortcodeMedia) -> Result<Option<Media>> {
    match media.typename.as_str() {
        TYPENAME_VIDEO => {
            let url = media
                .video_url
                .ok_or_else(|| Error::MissingField("shortcode_media.video_url".into()))?;
            Ok(Some(Media::Video(MediaUrl::video(url))))
        }
        TYPENAME_IMAGE => {
            let url = media
                .display_url
                .ok_or_else(|| Error::MissingField("shortcode_media.display_url".into()))?;
            Ok(Some(Media::Image(MediaUrl::image(url))))
        }
        TYPENAME_SIDECAR => {
            let children = media
                .edge_sidecar_to_children
                .ok_or_else(|| Error::MissingField("edge_sidecar_to_children".into()))?;
            let urls = children
                .edges
                .into_iter()
                .map(|edge| parse_sidecar_node(edge.node))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(Media::Gallery(urls)))
        }
        other => {
            tracing::warn!("Unknown media kind '{}', nothing to download", other);
            Ok(None)
        }
    }
}

fn parse_sidecar_node(node: SidecarNode) -> Result<MediaUrl> {
    if node.is_video {
        node.video_url
            .map(MediaUrl::video)
            .ok_or_else(|| Error::MissingField("sidecar child video_url".into()))
    } else {
        node.display_url
            .map(MediaUrl::image)
            .ok_or_else(|| Error::MissingField("sidecar child display_url".into()))
    }
}
