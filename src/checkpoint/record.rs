//! Persisted crawl progress and resume intents.

use serde::{Deserialize, Serialize};

use crate::checkpoint::store::CheckpointStore;
use crate::config::{validate_username, BudgetPolicy, Config, DownloadType, DEFAULT_MAX_PAGES};
use crate::error::{Error, Result};

/// Crawl progress that survives process restarts.
///
/// Field names on disk are kept stable so older state files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Continuation token of the last completed page.
    #[serde(rename = "end_cursor")]
    pub cursor: Option<String>,

    /// Account handle.
    pub username: String,

    /// Number of completed pages.
    #[serde(rename = "last_page")]
    pub page_index: u32,

    pub download_type: DownloadType,

    /// Page index at which the run stops.
    #[serde(rename = "max_page")]
    pub page_limit: u32,

    /// Whether the feed had more pages after the last completed one.
    #[serde(default = "default_true")]
    pub has_next: bool,
}

fn default_true() -> bool {
    true
}

impl Checkpoint {
    /// Start a new crawl of `username`.
    pub fn fresh(username: impl Into<String>, download_type: DownloadType, max_pages: u32) -> Self {
        Self {
            cursor: None,
            username: username.into(),
            page_index: 0,
            download_type,
            page_limit: max_pages,
            has_next: true,
        }
    }

    /// Continue a stored crawl according to `intent`.
    pub fn resumed(
        username: impl Into<String>,
        download_type: DownloadType,
        intent: &ResumeIntent,
        requested_pages: Option<u32>,
    ) -> Self {
        Self {
            cursor: intent.cursor.clone(),
            username: username.into(),
            page_index: intent.pages_done,
            download_type,
            page_limit: intent.page_limit(requested_pages),
            has_next: intent.has_next,
        }
    }

    /// Build the starting checkpoint of a run.
    ///
    /// Without a policy this is a fresh crawl of the configured username.
    /// `--continue` keeps the stored download type, `--after` takes the
    /// configured one.
    pub fn for_run(
        config: &Config,
        store: &CheckpointStore,
        policy: Option<BudgetPolicy>,
    ) -> Result<Self> {
        let Some(policy) = policy else {
            let username = config
                .options
                .username
                .as_deref()
                .ok_or_else(|| Error::ConfigValidation {
                    field: "username".to_string(),
                    message: "Please provide a username".to_string(),
                })?;
            return Ok(Self::fresh(
                username.trim_start_matches('@'),
                config.options.download_type,
                config.max_pages(),
            ));
        };

        let stored = store.load_required()?;
        validate_username(&stored.username)?;

        let intent = ResumeIntent::from_checkpoint(&stored, policy);
        let download_type = match policy {
            BudgetPolicy::Additive => stored.download_type,
            BudgetPolicy::Absolute => config.options.download_type,
        };

        Ok(Self::resumed(
            stored.username,
            download_type,
            &intent,
            config.options.max_pages,
        ))
    }

    /// Record a fully processed page.
    pub fn complete_page(&mut self, next_cursor: Option<String>, has_next: bool) {
        self.cursor = next_cursor;
        self.has_next = has_next;
        self.page_index += 1;
    }

    /// Whether the page budget allows another page.
    pub fn within_budget(&self) -> bool {
        self.page_index < self.page_limit
    }
}

/// Where a resumed run starts and how its budget is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeIntent {
    pub cursor: Option<String>,
    pub pages_done: u32,
    pub has_next: bool,
    pub budget_policy: BudgetPolicy,
    /// Pages the stored run still had budgeted.
    pub remaining: u32,
}

impl ResumeIntent {
    pub fn from_checkpoint(checkpoint: &Checkpoint, budget_policy: BudgetPolicy) -> Self {
        Self {
            cursor: checkpoint.cursor.clone(),
            pages_done: checkpoint.page_index,
            has_next: checkpoint.has_next,
            budget_policy,
            remaining: checkpoint.page_limit.saturating_sub(checkpoint.page_index),
        }
    }

    /// Page limit of the new run.
    pub fn page_limit(&self, requested_pages: Option<u32>) -> u32 {
        let budget = match (self.budget_policy, requested_pages) {
            (_, Some(pages)) => pages,
            (BudgetPolicy::Additive, None) => self.remaining,
            (BudgetPolicy::Absolute, None) => DEFAULT_MAX_PAGES,
        };
        self.pages_done.saturating_add(budget)
    }
}
