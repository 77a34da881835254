//! Candidate page fetching.
//!
//! A page is only worth extracting when it comes back 2xx with an HTML
//! content type inside the hydration timeout. Everything else is a typed
//! skip — fetch problems are never surfaced as request errors.

use std::time::Duration;

use reqwest::{header, Client, Url};

use crate::error::ExtractError;
use crate::skip::SkipReason;

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a fetcher with the hydration timeout and identifying
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one candidate page and returns its HTML body.
    ///
    /// Skips (never errors): network failure or timeout → `FetchFailed`,
    /// non-2xx → `BadStatus`, 2xx without an HTML content type → `NotHtml`.
    pub async fn fetch_html(&self, url: &Url) -> Result<String, SkipReason> {
        let response = self
            .client
            .get(url.clone())
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(url = %url, error = %e, "page fetch failed");
                SkipReason::FetchFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "page fetch non-2xx");
            return Err(SkipReason::BadStatus);
        }

        if !is_html(&response) {
            return Err(SkipReason::NotHtml);
        }

        response.text().await.map_err(|e| {
            tracing::debug!(url = %url, error = %e, "page body read failed");
            SkipReason::FetchFailed
        })
    }
}

fn is_html(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            let ct = ct.to_ascii_lowercase();
            ct.contains("text/html") || ct.contains("application/xhtml")
        })
}
