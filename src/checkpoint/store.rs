//! Loading and atomically saving checkpoints.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::checkpoint::record::Checkpoint;
use crate::error::{Error, Result};
use crate::fs::temp_path;

/// Checkpoint file name inside the download directory.
pub const STATE_FILE_NAME: &str = "ig_spider.meta";

/// A checkpoint file on disk.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store for a download directory.
    pub fn in_directory(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the checkpoint, or `None` if no file exists.
    pub fn load(&self) -> Result<Option<Checkpoint>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::CorruptState {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    /// Load the checkpoint, failing if it does not exist.
    pub fn load_required(&self) -> Result<Checkpoint> {
        self.load()?
            .ok_or_else(|| Error::CheckpointNotFound(self.path.clone()))
    }

    /// Write the checkpoint via a temp file and rename.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        let content = serde_json::to_string(checkpoint)?;
        let tmp = temp_path(&self.path);

        let mut file = File::create(&tmp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        tracing::debug!("Checkpoint saved to {}", self.path.display());
        Ok(())
    }
}
