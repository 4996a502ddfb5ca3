//! HTTP gateway for the external web search provider

use crate::config::SearchServiceConfig;
use crate::error::{MedInfoError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider hard limit on hits per request
const PROVIDER_PAGE_SIZE: usize = 10;

/// Provider hard limit on total hits per query
const PROVIDER_MAX_RESULTS: usize = 100;

/// A single normalized web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Search service trait — orchestrators run against injected providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a web search, paginating until `result_count` hits are gathered
    async fn search(&self, query: &str, result_count: usize) -> Result<Vec<SearchResult>>;

    /// Best-effort product photo lookup; absence is never an error
    async fn find_image(&self, name: &str) -> Option<String>;
}

/// Web search client over a programmable search engine API
pub struct WebSearchClient {
    http_client: reqwest::Client,
    config: SearchServiceConfig,
}

impl WebSearchClient {
    /// Create a new client from configuration
    pub fn new(config: SearchServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(MedInfoError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(SearchServiceConfig::default())
    }

    /// Fail closed when credentials are absent: no network call is made
    fn credentials(&self) -> Result<(&str, &str)> {
        match (self.config.api_key.as_deref(), self.config.engine_id.as_deref()) {
            (Some(key), Some(cx)) => Ok((key, cx)),
            _ => Err(MedInfoError::Config(
                "web search API credentials are not configured".to_string(),
            )),
        }
    }
}

/// Paginated `(start, num)` request pairs covering `result_count` hits.
///
/// The provider serves at most [`PROVIDER_PAGE_SIZE`] hits per request and
/// [`PROVIDER_MAX_RESULTS`] in total; `result_count` is clamped into [1, 100].
fn pagination_plan(result_count: usize) -> Vec<(usize, usize)> {
    let count = result_count.clamp(1, PROVIDER_MAX_RESULTS);
    let mut plan = Vec::new();
    let mut start = 1;
    while start <= count {
        plan.push((start, (count - start + 1).min(PROVIDER_PAGE_SIZE)));
        start += PROVIDER_PAGE_SIZE;
    }
    plan
}

fn connectivity_error(err: reqwest::Error) -> MedInfoError {
    if err.is_timeout() {
        MedInfoError::Network("the search provider took too long to respond".to_string())
    } else {
        MedInfoError::Network(format!("could not reach the search provider: {}", err))
    }
}

/// Pull the provider's own message out of an error body, if it has one
fn provider_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    struct ErrorDetails {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| "an unknown search provider error occurred".to_string())
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

impl SearchItem {
    fn into_result(self) -> SearchResult {
        SearchResult {
            title: self.title,
            snippet: self.snippet.replace('\n', " "),
            link: self.link,
        }
    }
}

#[async_trait]
impl SearchProvider for WebSearchClient {
    async fn search(&self, query: &str, result_count: usize) -> Result<Vec<SearchResult>> {
        let (api_key, engine_id) = self.credentials()?;

        tracing::debug!("Web search: '{}' ({} results)", query, result_count);

        let mut all_results = Vec::new();
        for (start, num) in pagination_plan(result_count) {
            let response = self
                .http_client
                .get(&self.config.endpoint)
                .query(&[("q", query), ("key", api_key), ("cx", engine_id)])
                .query(&[("num", num), ("start", start)])
                .send()
                .await
                .map_err(connectivity_error)?;

            if !response.status().is_success() {
                let status = response.status();
                let message = provider_message(&response.text().await.unwrap_or_default());
                return Err(MedInfoError::Provider(format!(
                    "search API error (HTTP {}): {}",
                    status.as_u16(),
                    message
                )));
            }

            let page: SearchPage = response
                .json()
                .await
                .map_err(|e| MedInfoError::Provider(format!("unexpected search response: {}", e)))?;

            all_results.extend(page.items.into_iter().map(SearchItem::into_result));
        }

        Ok(all_results)
    }

    async fn find_image(&self, name: &str) -> Option<String> {
        let (api_key, engine_id) = self.credentials().ok()?;

        // A more specific query to get clean product shots
        let query = format!("{} tablet strip box", name);
        tracing::debug!("Image search: '{}'", query);

        let response = self
            .http_client
            .get(&self.config.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("key", api_key),
                ("cx", engine_id),
                ("searchType", "image"),
                ("imgSize", "medium"),
            ])
            .query(&[("num", 1usize)])
            .timeout(Duration::from_secs(self.config.image_timeout_secs))
            .send()
            .await
            .ok()?;

        let page: SearchPage = response.error_for_status().ok()?.json().await.ok()?;
        page.items.into_iter().next().map(|item| item.link)
    }
}
