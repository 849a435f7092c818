//! Media-type filtering of feed items.

use crate::config::DownloadType;
use crate::media::item::ItemDescriptor;

/// Whether an item matches the requested media-type selection.
pub fn matches(item: &ItemDescriptor, filter: DownloadType) -> bool {
    match filter {
        DownloadType::Both => true,
        DownloadType::Photo => !item.is_video,
        DownloadType::Video => item.is_video,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ItemDescriptor> {
        vec![
            ItemDescriptor::new("a", false, false),
            ItemDescriptor::new("b", true, false),
            ItemDescriptor::new("c", false, true),
            ItemDescriptor::new("d", true, true),
        ]
    }

    #[test]
    fn test_photo_and_video_partition_both() {
        let items = items();
        for item in &items {
            let photo = matches(item, DownloadType::Photo);
            let video = matches(item, DownloadType::Video);
            assert!(photo != video, "{} must match exactly one kind", item.shortcode);
            assert_eq!(photo || video, matches(item, DownloadType::Both));
        }
    }

    #[test]
    fn test_photo_filter() {
        let selected: Vec<_> = items()
            .into_iter()
            .filter(|i| matches(i, DownloadType::Photo))
            .map(|i| i.shortcode)
            .collect();
        assert_eq!(selected, ["a", "c"]);
    }
}
