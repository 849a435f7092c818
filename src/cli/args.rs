//! Command-line argument definitions using clap.

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{BudgetPolicy, Config, DownloadType};

/// Instagram feed downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "ig-spider",
    version,
    about = "Download the photos and videos from an Instagram user's page",
    long_about = "Download the photos and videos from an Instagram user's page.\n\n\
                  Progress is saved to ig_spider.meta in the download directory, so a \
                  later run can continue where this one stopped."
)]
#[command(group(ArgGroup::new("target").args(["username", "resume", "after"])))]
pub struct Args {
    /// The username.
    #[arg(short, long)]
    pub username: Option<String>,

    /// Continue the last download task.
    #[arg(short = 'C', long = "continue")]
    pub resume: bool,

    /// Download posts after the last downloaded post.
    #[arg(short = 'A', long)]
    pub after: bool,

    /// The maximum number of pages to download (default 9999).
    #[arg(short, long = "max-pages")]
    pub max_pages: Option<u32>,

    /// The download type.
    #[arg(short = 't', long = "type", value_enum, ignore_case = true)]
    pub download_type: Option<DownloadTypeArg>,

    /// Stop the program when it first sees an already downloaded file.
    #[arg(short = 'S', long)]
    pub stop_on_existing: bool,

    /// The directory to save downloads in (default current directory).
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "ig-spider.toml")]
    pub config: PathBuf,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI download type argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum DownloadTypeArg {
    /// Photos only.
    Photo,
    /// Videos only.
    Video,
    /// Photos and videos.
    Both,
}

impl From<DownloadTypeArg> for DownloadType {
    fn from(arg: DownloadTypeArg) -> Self {
        match arg {
            DownloadTypeArg::Photo => DownloadType::Photo,
            DownloadTypeArg::Video => DownloadType::Video,
            DownloadTypeArg::Both => DownloadType::Both,
        }
    }
}

impl Args {
    /// How this run relates to the stored checkpoint, if at all.
    pub fn budget_policy(&self) -> Option<BudgetPolicy> {
        if self.resume {
            Some(BudgetPolicy::Additive)
        } else if self.after {
            Some(BudgetPolicy::Absolute)
        } else {
            None
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(username) = &self.username {
            config.options.username = Some(username.clone());
        }

        if let Some(dir) = &self.download_directory {
            config.options.download_directory = Some(dir.clone());
        }

        if let Some(download_type) = self.download_type {
            config.options.download_type = download_type.into();
        }

        if let Some(max_pages) = self.max_pages {
            config.options.max_pages = Some(max_pages);
        }

        if self.stop_on_existing {
            config.options.stop_on_existing = true;
        }

        if self.quiet {
            config.options.show_downloads = false;
            config.options.show_skipped_downloads = false;
        }
    }
}
