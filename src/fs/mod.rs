//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename derivation from media URLs

pub mod naming;
pub mod paths;

pub use naming::{filename_from_url, sanitize_filename, temp_path, TEMP_SUFFIX};
pub use paths::{get_account_folder, require_directory, DownloadTarget};
