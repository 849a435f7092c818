//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::naming::{filename_from_url, sanitize_filename};

/// Local destination of one remote file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub local_path: PathBuf,
    pub remote_url: String,
}

impl DownloadTarget {
    /// Place `remote_url` under `account_dir`, named after its last path segment.
    pub fn new(account_dir: &Path, remote_url: &str) -> Result<Self> {
        Ok(Self {
            local_path: account_dir.join(filename_from_url(remote_url)?),
            remote_url: remote_url.to_string(),
        })
    }
}

/// Get the folder holding one account's files.
pub fn get_account_folder(base_dir: &Path, username: &str) -> Result<PathBuf> {
    let folder = sanitize_filename(username.trim_start_matches('@'))?;
    Ok(base_dir.join(folder))
}

/// Fail unless `dir` is an existing directory.
pub fn require_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::DirectoryNotFound(dir.to_path_buf()))
    }
}
