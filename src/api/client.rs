//! HTTP feed client.

use std::time::Duration;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::{Client, Response, StatusCode};
use tokio::sync::RwLock;

use crate::api::scrape::{extract_query_ids, extract_shared_data, find_container_script};
use crate::api::source::{FeedSource, MediaStream, MediaTransport, Page};
use crate::api::types::{GraphqlResponse, TimelineMedia};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::media::{parse_shortcode_media, parse_timeline, ItemDescriptor, Media};

/// GraphQL pagination endpoint, relative to the base URL.
const QUERY_PATH: &str = "/graphql/query/";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Feed client with query identifier discovery.
pub struct InstagramApi {
    client: Client,
    base_url: String,
    page_size: u32,
    /// Candidates discovered from the profile's script bundle.
    query_ids: RwLock<Vec<String>>,
    /// Identifier known to work for this run.
    query_id: RwLock<Option<String>>,
}

/// Result of one pagination request with a given query identifier.
enum QueryOutcome {
    Page(TimelineMedia),
    /// The server answered but has no data for the account/cursor.
    NoUser,
    /// The identifier was not accepted.
    Rejected,
}

impl InstagramApi {
    /// Create a new client.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
            query_ids: RwLock::new(Vec::new()),
            query_id: RwLock::new(config.query_hash.clone()),
        })
    }

    /// Make a GET request, failing on non-success status.
    async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::TransientFetch(format!("HTTP {} for {}", status, url)));
        }

        Ok(response)
    }

    /// Read the query identifier candidates referenced by a profile page.
    async fn discover_query_ids(&self, profile_html: &str) -> Result<()> {
        if self.query_id.read().await.is_some() {
            return Ok(());
        }

        let Some(script_path) = find_container_script(profile_html) else {
            tracing::warn!("Profile page does not reference a query script");
            return Ok(());
        };

        let script = self
            .get(&format!("{}{}", self.base_url, script_path))
            .await?
            .text()
            .await?;
        let ids = extract_query_ids(&script);
        tracing::debug!("Found {} query id candidates", ids.len());

        *self.query_ids.write().await = ids;
        Ok(())
    }

    /// Request one page with a specific query identifier.
    async fn query_page(
        &self,
        query_id: &str,
        account_id: &str,
        cursor: &str,
    ) -> Result<QueryOutcome> {
        let variables = serde_json::json!({
            "id": account_id,
            "first": self.page_size,
            "after": cursor,
        })
        .to_string();

        let url = format!("{}{}", self.base_url, QUERY_PATH);
        tracing::debug!("GET {} query_hash={}", url, query_id);

        let response = self
            .client
            .get(&url)
            .query(&[("query_hash", query_id), ("variables", variables.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(Error::TransientFetch(format!("HTTP {} for {}", status, url)));
        }
        if !status.is_success() {
            tracing::debug!("Query id {} rejected with HTTP {}", query_id, status);
            return Ok(QueryOutcome::Rejected);
        }

        let text = response.text().await?;
        let parsed: GraphqlResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Query id {} returned unreadable body: {}", query_id, e);
                return Ok(QueryOutcome::Rejected);
            }
        };

        Ok(match parsed.data {
            None => QueryOutcome::Rejected,
            Some(data) => match data.user {
                None => QueryOutcome::NoUser,
                Some(user) => match user.edge_owner_to_timeline_media {
                    Some(media) => QueryOutcome::Page(media),
                    None => QueryOutcome::Rejected,
                },
            },
        })
    }
}

#[async_trait]
impl FeedSource for InstagramApi {
    async fn fetch_first_page(&self, handle: &str) -> Result<(String, Page)> {
        let url = format!("{}/{}/", self.base_url, handle);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::MissingField(format!("profile page for '{}'", handle)));
        }
        if !status.is_success() {
            return Err(Error::TransientFetch(format!("HTTP {} for {}", status, url)));
        }

        let html = response.text().await?;
        let shared = extract_shared_data(&html)?;
        let profile = shared
            .entry_data
            .profile_page
            .into_iter()
            .next()
            .ok_or_else(|| Error::MissingField("entry_data.ProfilePage".into()))?;

        self.discover_query_ids(&html).await?;

        let user = profile.graphql.user;
        Ok((user.id, parse_timeline(user.edge_owner_to_timeline_media)))
    }

    async fn fetch_next_page(&self, account_id: &str, cursor: &str) -> Result<Page> {
        let cached = self.query_id.read().await.clone();
        let candidates = match &cached {
            Some(id) => vec![id.clone()],
            None => self.query_ids.read().await.clone(),
        };

        if candidates.is_empty() {
            return Err(Error::MissingField("query id".into()));
        }

        let mut saw_no_user = false;
        for id in &candidates {
            match self.query_page(id, account_id, cursor).await? {
                QueryOutcome::Page(media) => {
                    if cached.is_none() {
                        tracing::debug!("Using query id {}", id);
                        *self.query_id.write().await = Some(id.clone());
                    }
                    return Ok(parse_timeline(media));
                }
                QueryOutcome::NoUser => saw_no_user = true,
                QueryOutcome::Rejected => {}
            }
        }

        if saw_no_user {
            Err(Error::FeedExhausted)
        } else {
            Err(Error::MissingField("edge_owner_to_timeline_media".into()))
        }
    }

    async fn resolve_media(&self, handle: &str, item: &ItemDescriptor) -> Result<Media> {
        let url = format!("{}/p/{}/?taken-by={}", self.base_url, item.shortcode, handle);
        let html = self.get(&url).await?.text().await?;

        let shared = extract_shared_data(&html)?;
        let post = shared
            .entry_data
            .post_page
            .into_iter()
            .next()
            .ok_or_else(|| Error::MissingField("entry_data.PostPage".into()))?;

        Ok(parse_shortcode_media(post.graphql.shortcode_media)?
            .unwrap_or_else(|| Media::Gallery(Vec::new())))
    }
}

#[async_trait]
impl MediaTransport for InstagramApi {
    async fn open(&self, url: &str) -> Result<MediaStream> {
        let response = self.get(url).await?;
        let content_length = response.content_length();
        let chunks = response.bytes_stream().map_err(Error::from).boxed();

        Ok(MediaStream {
            content_length,
            chunks,
        })
    }
}
