//! ig-spider - resumable downloader for an Instagram account's feed.
//!
//! The crawler walks the account's timeline page by page, downloads every
//! photo and video that matches the selected type, and records its position
//! in a checkpoint file so a later run can pick up where this one stopped.
//!
//! # Features
//!
//! - Cursor-based pagination with a page budget
//! - Photo/video/both filtering, gallery expansion
//! - Atomic downloads (temp file + rename), skip-if-exists
//! - Checkpointed resume (`--continue`, `--after`)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::{atomic::AtomicBool, Arc};
//! use ig_spider::{
//!     Checkpoint, CheckpointStore, ClientConfig, CrawlSettings, Crawler, DownloadType,
//!     InstagramApi,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = InstagramApi::new(&ClientConfig::default())?;
//!     let store = CheckpointStore::in_directory(std::path::Path::new("."));
//!     let crawler = Crawler::new(
//!         &api,
//!         &api,
//!         store,
//!         CrawlSettings::new("."),
//!         Arc::new(AtomicBool::new(false)),
//!     );
//!
//!     let report = crawler
//!         .run(Checkpoint::fresh("natgeo", DownloadType::Photo, 2))
//!         .await;
//!     println!("Downloaded {} items", report.stats.total_downloaded());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{FeedSource, InstagramApi, MediaTransport, Page};
pub use checkpoint::{Checkpoint, CheckpointStore, ResumeIntent};
pub use config::{BudgetPolicy, ClientConfig, Config, DownloadType};
pub use download::{CrawlReport, CrawlSettings, Crawler, DownloadOutcome, TerminalState};
pub use error::{Error, Result};
pub use media::{ItemDescriptor, Media, MediaUrl};
