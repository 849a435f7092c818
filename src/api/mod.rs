//! Remote feed access.
//!
//! This module provides:
//! - The `FeedSource` and `MediaTransport` traits the crawler depends on
//! - The HTTP client implementing both
//! - Page scraping helpers and response types

pub mod client;
pub mod scrape;
pub mod source;
pub mod types;

pub use client::InstagramApi;
pub use source::{FeedSource, MediaStream, MediaTransport, Page};
