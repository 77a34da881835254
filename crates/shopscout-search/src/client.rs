//! HTTP client for the programmable web-search API.
//!
//! Wraps `reqwest` with typed error handling and target normalization.
//! One call maps to one upstream page: the API serves at most
//! [`MAX_PAGE_SIZE`] results per request and paginates with a 1-based
//! `start` offset, so broader coverage comes from the caller issuing more
//! query × offset combinations, not from this layer looping.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::types::{SearchItem, SearchResponse, SearchTarget};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/";

/// Hard page size of the upstream API; `limit` is clamped to this.
pub const MAX_PAGE_SIZE: u32 = 10;

/// Client for the programmable search API.
///
/// Use [`SearchClient::new`] for production or
/// [`SearchClient::with_base_url`] to point at a mock server in tests.
pub struct SearchClient {
    client: Client,
    api_key: String,
    engine_id: String,
    base_url: Url,
}

impl SearchClient {
    /// Creates a new client pointed at the production search API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        engine_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, engine_id, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        engine_id: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the endpoint path instead of replacing a segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            engine_id: engine_id.to_owned(),
            base_url,
        })
    }

    /// Runs one page of a search and returns normalized targets.
    ///
    /// `sites` scopes the search: exactly one hostname uses the API's
    /// native site-restriction parameter; two or more are OR-joined as
    /// `site:` terms inside the query text (the native parameter takes a
    /// single value only). `start` is the API's 1-based result offset
    /// (1, 11, 21, …). With `image_mode`, results are image hits and the
    /// originating page comes from the image context link.
    ///
    /// # Errors
    ///
    /// - [`SearchError::UnexpectedStatus`] — any non-2xx status. Not
    ///   retried here.
    /// - [`SearchError::Http`] — network or TLS failure.
    /// - [`SearchError::Deserialize`] — response body is not valid JSON.
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        sites: &[String],
        image_mode: bool,
        start: u32,
    ) -> Result<Vec<SearchTarget>, SearchError> {
        let url = self.build_url(query, limit, sites, image_mode, start)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                query: query.to_owned(),
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<SearchResponse>(&body).map_err(|e| SearchError::Deserialize {
                context: format!("search results for \"{query}\""),
                source: e,
            })?;

        tracing::debug!(
            query,
            start,
            image_mode,
            raw = parsed.items.len(),
            "search page fetched"
        );

        Ok(normalize_items(parsed.items, image_mode))
    }

    fn build_url(
        &self,
        query: &str,
        limit: u32,
        sites: &[String],
        image_mode: bool,
        start: u32,
    ) -> Result<Url, SearchError> {
        let mut url = self
            .base_url
            .join("customsearch/v1")
            .map_err(|e| SearchError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("cx", &self.engine_id);
            pairs.append_pair("q", &scoped_query(query, sites));
            pairs.append_pair("num", &limit.min(MAX_PAGE_SIZE).to_string());
            pairs.append_pair("start", &start.max(1).to_string());
            if sites.len() == 1 {
                pairs.append_pair("siteSearch", &sites[0]);
            }
            if image_mode {
                pairs.append_pair("searchType", "image");
            }
        }

        Ok(url)
    }
}

/// Folds a multi-site scope into the query text as OR-joined `site:` terms.
/// Single-site scopes are handled by the native parameter instead and
/// leave the query untouched.
fn scoped_query(query: &str, sites: &[String]) -> String {
    if sites.len() < 2 {
        return query.to_owned();
    }
    let joined = sites
        .iter()
        .map(|s| format!("site:{s}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("{query} {joined}")
}

/// Normalizes raw items into [`SearchTarget`]s.
///
/// Image mode: the item link IS the image; the page URL is the context
/// link, falling back to the item link when no context is present. Link
/// mode: the item link is the page; no image URL. Items without any URL
/// carry no identity and are dropped.
fn normalize_items(items: Vec<SearchItem>, image_mode: bool) -> Vec<SearchTarget> {
    items
        .into_iter()
        .filter_map(|item| {
            let target = if image_mode {
                let context = item.image.and_then(|i| i.context_link);
                SearchTarget {
                    title: item.title,
                    page_url: context.or_else(|| item.link.clone()),
                    image_url: item.link,
                }
            } else {
                SearchTarget {
                    title: item.title,
                    page_url: item.link,
                    image_url: None,
                }
            };
            target.identity_key().is_some().then_some(target)
        })
        .collect()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
