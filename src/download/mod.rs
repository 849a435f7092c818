//! Download module for feed crawling.
//!
//! This module provides:
//! - Per-run statistics
//! - Interrupt-aware waiting on network calls
//! - Atomic, idempotent media file downloading
//! - The paginated crawl engine

pub mod crawler;
pub mod interrupt;
pub mod media;
pub mod state;

pub use crawler::{AbortCause, CrawlReport, CrawlSettings, Crawler, TerminalState};
pub use media::{DownloadOutcome, Downloader};
pub use state::RunStats;
