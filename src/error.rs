//! Error types for the ig-spider application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    // Checkpoint errors
    #[error("Can not find checkpoint file: {0}")]
    CheckpointNotFound(PathBuf),

    #[error("Checkpoint file {path} is corrupt: {message}")]
    CorruptState { path: PathBuf, message: String },

    // Feed errors
    #[error("No more data for this account")]
    FeedExhausted,

    #[error("Unexpected response, missing {0}. Make sure you give the correct username")]
    MissingField(String),

    #[error("Network error: {0}")]
    TransientFetch(String),

    // Download errors
    #[error("File {0} already exists, stopping")]
    AbortRequested(PathBuf),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Any transport failure is a transient fetch error.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::TransientFetch(err.to_string())
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
