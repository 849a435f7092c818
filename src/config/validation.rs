//! Configuration validation logic.

use std::sync::OnceLock;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Maximum username length.
const MAX_USERNAME_LENGTH: usize = 30;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9._]+$").expect("valid username regex"))
}

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(username) = &config.options.username {
        validate_username(username)?;
    }

    if config.client.page_size == 0 {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: "Page size must be at least 1".to_string(),
        });
    }

    let (min, max) = config.options.page_delay_ms;
    if min > max {
        return Err(Error::ConfigValidation {
            field: "page_delay_ms".to_string(),
            message: format!("Delay range is inverted ({} > {})", min, max),
        });
    }

    url::Url::parse(&config.client.base_url)?;

    Ok(())
}

/// Validate an account handle.
pub fn validate_username(username: &str) -> Result<()> {
    let clean = username.trim_start_matches('@');

    if clean.is_empty() {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: "Please provide a username".to_string(),
        });
    }

    if clean.len() > MAX_USERNAME_LENGTH {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "Username '{}' is too long (maximum {} characters)",
                username, MAX_USERNAME_LENGTH
            ),
        });
    }

    if !username_pattern().is_match(clean) || clean.contains("..") {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "Username '{}' contains invalid characters. Only letters, digits, '.' and '_' allowed.",
                username
            ),
        });
    }

    Ok(())
}
