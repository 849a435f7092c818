//! Checkpoint module: resumable crawl progress.

pub mod record;
pub mod store;

pub use record::{Checkpoint, ResumeIntent};
pub use store::{CheckpointStore, STATE_FILE_NAME};
