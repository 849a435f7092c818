//! Media-type selection and page budget policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kinds of feed items to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DownloadType {
    /// Photos only.
    Photo,
    /// Videos only.
    Video,
    /// Everything (default).
    #[default]
    Both,
}

impl fmt::Display for DownloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadType::Photo => write!(f, "PHOTO"),
            DownloadType::Video => write!(f, "VIDEO"),
            DownloadType::Both => write!(f, "BOTH"),
        }
    }
}

impl FromStr for DownloadType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PHOTO" => Ok(DownloadType::Photo),
            "VIDEO" => Ok(DownloadType::Video),
            "BOTH" => Ok(DownloadType::Both),
            _ => Err(format!("Unknown download type: {}", s)),
        }
    }
}

/// How a resumed run computes its page limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetPolicy {
    /// `--continue`: keep the stored settings and extend the stored limit.
    /// Without an explicit budget the prior run's unfinished pages are used.
    Additive,
    /// `--after`: keep only the stored position; budget and type come from
    /// this invocation.
    Absolute,
}

impl fmt::Display for BudgetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetPolicy::Additive => write!(f, "continue"),
            BudgetPolicy::Absolute => write!(f, "after"),
        }
    }
}
