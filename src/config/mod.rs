//! Configuration module for ig-spider.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Media-type and budget enums
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{ClientConfig, Config, OptionsConfig, DEFAULT_MAX_PAGES};
pub use modes::{BudgetPolicy, DownloadType};
pub use validation::{validate_config, validate_username};
