//! Filename derivation and manipulation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix of in-progress files; removed only by the final rename.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename is a relative directory reference or
/// contains a path separator.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name == "." || name == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    // Separators would leave the target directory
    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    // Sanitize remaining problematic characters
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Reject empty or whitespace-only names
    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Derive the local filename from the last path segment of a URL.
///
/// The query string is ignored, so signed CDN URLs map to stable names.
pub fn filename_from_url(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)?;
    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    sanitize_filename(segment)
}

/// Temp sibling of `path` used while it is being written.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_valid() {
        assert_eq!(sanitize_filename("normal.jpg").unwrap(), "normal.jpg");
        assert_eq!(sanitize_filename("file:name.jpg").unwrap(), "file_name.jpg");
        assert_eq!(sanitize_filename("a..b.jpg").unwrap(), "a..b.jpg");
    }

    #[test]
    fn test_double_dot_basename_from_url() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/v/clip..final.mp4?sig=1").unwrap(),
            "clip..final.mp4"
        );
    }

    #[test]
    fn test_sanitize_filename_rejects() {
        assert!(sanitize_filename("../etc/passwd").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename(".").is_err());
        assert!(sanitize_filename("path/to/file.jpg").is_err());
        assert!(sanitize_filename("file\0name.jpg").is_err());
        assert!(sanitize_filename("   ").is_err());
    }

    #[test]
    fn test_filename_from_url_strips_query() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/v/t51/12345_n.jpg?_nc_ht=x&oh=abc").unwrap(),
            "12345_n.jpg"
        );
        assert_eq!(
            filename_from_url("https://cdn.example.com/a/b/clip.mp4").unwrap(),
            "clip.mp4"
        );
    }

    #[test]
    fn test_filename_from_url_without_name() {
        assert!(filename_from_url("https://cdn.example.com/").is_err());
        assert!(filename_from_url("not a url").is_err());
    }

    #[test]
    fn test_temp_path_appends_suffix() {
        assert_eq!(
            temp_path(Path::new("/data/user/a.jpg")),
            PathBuf::from("/data/user/a.jpg.tmp")
        );
    }
}
