//! Per-run download statistics.

use crate::media::MediaType;

/// Counters for the current run only; never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub pic_count: u64,
    pub vid_count: u64,
    /// Targets that already existed on disk.
    pub already_complete: u64,
    /// Items rejected by the media-type filter.
    pub filtered: u64,
    /// Pages completed in this run.
    pub pages: u32,
}

impl RunStats {
    /// Record a newly materialized file.
    pub fn record_download(&mut self, media_type: MediaType) {
        match media_type {
            MediaType::Image => self.pic_count += 1,
            MediaType::Video => self.vid_count += 1,
        }
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count
    }
}
