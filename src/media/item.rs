//! Feed item and media URL representation.

/// Kind of a single media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn from_is_video(is_video: bool) -> Self {
        if is_video {
            MediaType::Video
        } else {
            MediaType::Image
        }
    }
}

/// One entry of a feed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Post shortcode, used to address the detail page.
    pub shortcode: String,

    /// Whether the post itself is a video.
    pub is_video: bool,

    /// Whether the post is a gallery of several media.
    pub has_multiple_media: bool,

    /// Full image URL when the feed already embeds it.
    pub display_url: Option<String>,
}

impl ItemDescriptor {
    pub fn new(shortcode: impl Into<String>, is_video: bool, has_multiple_media: bool) -> Self {
        Self {
            shortcode: shortcode.into(),
            is_video,
            has_multiple_media,
            display_url: None,
        }
    }

    pub fn with_display_url(mut self, url: impl Into<String>) -> Self {
        self.display_url = Some(url.into());
        self
    }
}

/// A single downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrl {
    pub url: String,
    pub is_video: bool,
}

impl MediaUrl {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_video: false,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_video: true,
        }
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_is_video(self.is_video)
    }
}

/// Resolved media of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Image(MediaUrl),
    Video(MediaUrl),
    /// Children in upstream order; may mix photos and videos.
    Gallery(Vec<MediaUrl>),
}

impl Media {
    /// Flatten into the ordered list of files to fetch.
    pub fn into_urls(self) -> Vec<MediaUrl> {
        match self {
            Media::Image(url) | Media::Video(url) => vec![url],
            Media::Gallery(children) => children,
        }
    }
}
