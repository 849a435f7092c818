//! Paginated crawl with checkpointed resume.
//!
//! A run moves through `Init -> SeedPage -> Paging` and ends in one of the
//! [`TerminalState`]s. Pages are processed strictly one after another and the
//! checkpoint only advances once every item of a page has been handled, so a
//! persisted cursor always sits on a page boundary.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::api::{FeedSource, MediaTransport, Page};
use crate::checkpoint::{Checkpoint, CheckpointStore};
use crate::download::interrupt::until_shutdown;
use crate::download::media::{DownloadOutcome, Downloader};
use crate::download::state::RunStats;
use crate::error::{Error, Result};
use crate::fs::{get_account_folder, DownloadTarget};
use crate::media::{matches, resolve};

/// Why a run stopped early.
#[derive(Debug)]
pub enum AbortCause {
    /// A target already existed and stop-on-existing was set.
    ExistingFile(PathBuf),
    /// The user interrupted the run.
    Interrupted,
    /// An unrecovered feed or download error.
    Failed(Error),
}

/// How a run ended.
#[derive(Debug)]
pub enum TerminalState {
    /// The feed has no more pages.
    Exhausted,
    /// The page budget is spent but the feed continues.
    LimitReached,
    Aborted(AbortCause),
}

/// Settings of one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Root directory; files go to `<download_dir>/<username>/`.
    pub download_dir: PathBuf,
    pub stop_on_existing: bool,
    /// Jittered delay range in milliseconds before each next-page request.
    pub page_delay_ms: (u64, u64),
    pub show_progress: bool,
    pub show_skipped: bool,
}

impl CrawlSettings {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            stop_on_existing: false,
            page_delay_ms: (0, 0),
            show_progress: false,
            show_skipped: false,
        }
    }
}

/// Outcome of [`Crawler::run`].
#[derive(Debug)]
pub struct CrawlReport {
    pub terminal: TerminalState,
    pub stats: RunStats,
    /// State as persisted at the end of the run.
    pub checkpoint: Checkpoint,
    /// Set when the final checkpoint could not be written.
    pub flush_error: Option<Error>,
}

/// Drives one account's crawl.
pub struct Crawler<'a> {
    feed: &'a dyn FeedSource,
    downloader: Downloader<'a>,
    store: CheckpointStore,
    settings: CrawlSettings,
    shutdown: Arc<AtomicBool>,
}

impl<'a> Crawler<'a> {
    pub fn new(
        feed: &'a dyn FeedSource,
        transport: &'a dyn MediaTransport,
        store: CheckpointStore,
        settings: CrawlSettings,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        let downloader =
            Downloader::new(transport, shutdown.clone()).with_progress(settings.show_progress);
        Self {
            feed,
            downloader,
            store,
            settings,
            shutdown,
        }
    }

    fn interrupted(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Crawl from `checkpoint` until a terminal state, then persist it once.
    pub async fn run(&self, mut checkpoint: Checkpoint) -> CrawlReport {
        let mut stats = RunStats::default();

        let terminal = match self.crawl(&mut checkpoint, &mut stats).await {
            Ok(terminal) => terminal,
            Err(Error::AbortRequested(path)) => {
                tracing::info!("File {} already exists, stopping", path.display());
                TerminalState::Aborted(AbortCause::ExistingFile(path))
            }
            Err(e) => {
                tracing::error!("Crawl failed: {}", e);
                TerminalState::Aborted(AbortCause::Failed(e))
            }
        };

        let flush_error = match self.store.save(&checkpoint) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    "Failed to save checkpoint to {}: {}",
                    self.store.path().display(),
                    e
                );
                Some(e)
            }
        };

        tracing::info!(
            "Done: {} items downloaded, {} pages completed",
            stats.total_downloaded(),
            checkpoint.page_index
        );

        CrawlReport {
            terminal,
            stats,
            checkpoint,
            flush_error,
        }
    }

    async fn crawl(
        &self,
        checkpoint: &mut Checkpoint,
        stats: &mut RunStats,
    ) -> Result<TerminalState> {
        let account_dir = get_account_folder(&self.settings.download_dir, &checkpoint.username)?;

        tracing::info!("Getting info of {}", checkpoint.username);
        let first = self.feed.fetch_first_page(&checkpoint.username);
        let Some(first) = until_shutdown(&self.shutdown, first).await else {
            return Ok(TerminalState::Aborted(AbortCause::Interrupted));
        };
        let (account_id, seed) = first?;

        if checkpoint.page_index == 0 && checkpoint.within_budget() {
            tracing::info!("Downloading page 1");
            let outcome = self
                .process_page(checkpoint, &seed, &account_dir, stats)
                .await?;
            if let Some(terminal) = outcome {
                return Ok(terminal);
            }
            checkpoint.complete_page(seed.next_cursor, seed.has_next);
            stats.pages += 1;
        }

        while checkpoint.within_budget() && checkpoint.has_next {
            if self.interrupted() {
                return Ok(TerminalState::Aborted(AbortCause::Interrupted));
            }

            let cursor = checkpoint
                .cursor
                .clone()
                .ok_or_else(|| Error::MissingField("page_info.end_cursor".into()))?;

            if until_shutdown(&self.shutdown, self.page_delay()).await.is_none() {
                return Ok(TerminalState::Aborted(AbortCause::Interrupted));
            }

            let next = self.feed.fetch_next_page(&account_id, &cursor);
            let page = match until_shutdown(&self.shutdown, next).await {
                None => return Ok(TerminalState::Aborted(AbortCause::Interrupted)),
                Some(Ok(page)) => page,
                Some(Err(Error::FeedExhausted)) => {
                    tracing::info!("No more data");
                    return Ok(TerminalState::Exhausted);
                }
                Some(Err(e)) => return Err(e),
            };

            tracing::info!("Downloading page {}", checkpoint.page_index + 1);
            let outcome = self
                .process_page(checkpoint, &page, &account_dir, stats)
                .await?;
            if let Some(terminal) = outcome {
                return Ok(terminal);
            }
            checkpoint.complete_page(page.next_cursor, page.has_next);
            stats.pages += 1;
        }

        if checkpoint.has_next {
            Ok(TerminalState::LimitReached)
        } else {
            tracing::info!("No more pages");
            Ok(TerminalState::Exhausted)
        }
    }

    /// Filter, resolve and download every item of a page in order.
    ///
    /// Returns a terminal state if the page could not be finished.
    async fn process_page(
        &self,
        checkpoint: &Checkpoint,
        page: &Page,
        account_dir: &Path,
        stats: &mut RunStats,
    ) -> Result<Option<TerminalState>> {
        for item in &page.items {
            if self.interrupted() {
                return Ok(Some(TerminalState::Aborted(AbortCause::Interrupted)));
            }

            if !matches(item, checkpoint.download_type) {
                stats.filtered += 1;
                continue;
            }

            let resolved = resolve(self.feed, &checkpoint.username, item);
            let Some(urls) = until_shutdown(&self.shutdown, resolved).await else {
                return Ok(Some(TerminalState::Aborted(AbortCause::Interrupted)));
            };
            let urls = urls?;
            for media in urls {
                let target = DownloadTarget::new(account_dir, &media.url)?;
                match self
                    .downloader
                    .ensure_downloaded(&target, self.settings.stop_on_existing)
                    .await?
                {
                    DownloadOutcome::Downloaded(path) => {
                        stats.record_download(media.media_type());
                        if self.settings.show_progress {
                            tracing::info!("Downloaded {}", path.display());
                        }
                    }
                    DownloadOutcome::AlreadyComplete(path) => {
                        stats.already_complete += 1;
                        if self.settings.show_skipped {
                            tracing::info!("File {} already exists, skipping", path.display());
                        }
                    }
                    DownloadOutcome::Skipped => {
                        return Ok(Some(TerminalState::Aborted(AbortCause::Interrupted)));
                    }
                }
            }
        }

        Ok(None)
    }

    async fn page_delay(&self) {
        let (min, max) = self.settings.page_delay_ms;
        if max == 0 {
            return;
        }
        let delay_ms = rand::thread_rng().gen_range(min..=max);
        sleep(Duration::from_millis(delay_ms)).await;
    }
}
