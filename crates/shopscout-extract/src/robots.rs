//! Robots-exclusion politeness gate.
//!
//! The gate is advisory and fails open: a missing, slow, or non-2xx
//! robots.txt never blocks the pipeline. Only an actual disallow
//! directive for our agent excludes a target.

use std::time::Duration;

use reqwest::{Client, Url};
use robotstxt::DefaultMatcher;

use crate::error::ExtractError;

pub struct PolitenessGate {
    client: Client,
    /// Product token matched against `User-agent:` groups, e.g. `"shopscout"`.
    agent: String,
}

impl PolitenessGate {
    /// Creates a gate with the (short) robots timeout. The matching agent
    /// token is the product part of `user_agent`, up to the first `/` or
    /// space.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.max(1)))
            .user_agent(user_agent)
            .build()?;
        let agent = user_agent
            .split(['/', ' '])
            .next()
            .unwrap_or(user_agent)
            .to_string();
        Ok(Self { client, agent })
    }

    /// Whether robots.txt at the target's origin allows fetching `url`.
    ///
    /// Fetch failure, timeout, or non-2xx all default to allowed.
    pub async fn allows(&self, url: &Url) -> bool {
        if url.host_str().is_none() {
            return true;
        }
        // ascii_serialization keeps any non-default port, so local and
        // proxied origins resolve their own robots.txt.
        let robots_url = format!("{}/robots.txt", url.origin().ascii_serialization());

        let body = match self.client.get(&robots_url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.text().await {
                    Ok(text) => text,
                    Err(_) => return true,
                }
            }
            // Non-2xx or network failure: the gate has nothing to enforce.
            Ok(_) | Err(_) => return true,
        };

        let mut matcher = DefaultMatcher::default();
        let allowed = matcher.one_agent_allowed_by_robots(&body, &self.agent, url.as_str());
        if !allowed {
            tracing::debug!(url = %url, agent = %self.agent, "robots.txt disallows target");
        }
        allowed
    }
}
