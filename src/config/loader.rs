//! Configuration structures and loading logic.

use crate::config::modes::DownloadType;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Page budget used when none is given.
pub const DEFAULT_MAX_PAGES: u32 = 9999;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Remote site and HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Site root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Items requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Known-good GraphQL query hash. Skips discovery when set.
    #[serde(default)]
    pub query_hash: Option<String>,
}

/// Crawl options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Account to crawl (fresh runs only).
    #[serde(default)]
    pub username: Option<String>,

    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Media types to download.
    #[serde(default)]
    pub download_type: DownloadType,

    /// Page budget for this run.
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Stop the whole run at the first file that already exists.
    #[serde(default)]
    pub stop_on_existing: bool,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Whether to show skipped downloads.
    #[serde(default)]
    pub show_skipped_downloads: bool,

    /// Jittered delay range in milliseconds before each next-page request.
    #[serde(default)]
    pub page_delay_ms: (u64, u64),
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            page_size: default_page_size(),
            query_hash: None,
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            username: None,
            download_directory: None,
            download_type: DownloadType::default(),
            max_pages: None,
            stop_on_existing: false,
            show_downloads: true,
            show_skipped_downloads: false,
            page_delay_ms: (0, 0),
        }
    }
}

fn default_base_url() -> String {
    "https://www.instagram.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string()
}

fn default_page_size() -> u32 {
    12
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the effective page budget.
    pub fn max_pages(&self) -> u32 {
        self.options.max_pages.unwrap_or(DEFAULT_MAX_PAGES)
    }
}
