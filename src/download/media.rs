//! Media file downloading.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::api::MediaTransport;
use crate::download::interrupt::until_shutdown;
use crate::error::{Error, Result};
use crate::fs::{temp_path, DownloadTarget};
use crate::output::transfer_bar;

/// Result of [`Downloader::ensure_downloaded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was fetched and renamed into place.
    Downloaded(PathBuf),
    /// An interrupt stopped the transfer; at most a temp file remains.
    Skipped,
    /// The final file was already present; no network access happened.
    AlreadyComplete(PathBuf),
}

/// Fetches one file at a time with atomic materialization.
pub struct Downloader<'a> {
    transport: &'a dyn MediaTransport,
    shutdown: Arc<AtomicBool>,
    show_progress: bool,
}

impl<'a> Downloader<'a> {
    pub fn new(transport: &'a dyn MediaTransport, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            transport,
            shutdown,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn interrupted(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Make sure `target` exists locally.
    ///
    /// An existing final file is never touched. With `stop_on_existing` it
    /// fails with [`Error::AbortRequested`] instead of reporting it complete.
    pub async fn ensure_downloaded(
        &self,
        target: &DownloadTarget,
        stop_on_existing: bool,
    ) -> Result<DownloadOutcome> {
        let final_path = &target.local_path;

        if fs::try_exists(final_path).await? {
            if stop_on_existing {
                return Err(Error::AbortRequested(final_path.clone()));
            }
            return Ok(DownloadOutcome::AlreadyComplete(final_path.clone()));
        }

        if self.interrupted() {
            return Ok(DownloadOutcome::Skipped);
        }

        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = temp_path(final_path);
        let opened = self.transport.open(&target.remote_url);
        let Some(opened) = until_shutdown(&self.shutdown, opened).await else {
            tracing::debug!("Transfer of {} abandoned before it started", target.remote_url);
            return Ok(DownloadOutcome::Skipped);
        };
        let mut stream = opened?;
        let progress = transfer_bar(stream.content_length, self.show_progress);

        let mut file = File::create(&tmp).await?;
        let mut received: u64 = 0;

        loop {
            let chunk = match until_shutdown(&self.shutdown, stream.chunks.next()).await {
                Some(None) => break,
                Some(Some(chunk)) if !self.interrupted() => chunk,
                _ => {
                    progress.abandon();
                    file.flush().await?;
                    tracing::debug!("Transfer of {} abandoned", target.remote_url);
                    return Ok(DownloadOutcome::Skipped);
                }
            };

            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            };
            file.write_all(&chunk).await?;
            received += chunk.len() as u64;
            progress.set_position(received);
        }

        file.flush().await?;
        file.sync_all().await?;
        drop(file);
        progress.finish_and_clear();

        if let Some(total) = stream.content_length {
            if received < total {
                return Err(Error::TransientFetch(format!(
                    "Transfer of {} ended after {} of {} bytes",
                    target.remote_url, received, total
                )));
            }
        }

        fs::rename(&tmp, final_path).await?;
        Ok(DownloadOutcome::Downloaded(final_path.clone()))
    }
}
