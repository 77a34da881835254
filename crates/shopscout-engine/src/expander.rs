//! Query expansion.
//!
//! One generative call turns the idea and budget into a diversified,
//! style-coherent query set. Every failure mode — no API key, non-2xx,
//! timeout, unparsable content — degrades to the deterministic templates;
//! expansion never fails a request.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::{json, Value};

use shopscout_core::json_scan;

use crate::error::EngineError;
use crate::intent::Intent;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/";

/// Commerce modifiers for the deterministic fallback: the idea suffixed
/// with each of these, in order, is the 6-query template set.
const FALLBACK_MODIFIERS: &[&str] = &[
    "buy online",
    "price",
    "best budget",
    "premium",
    "sale",
    "product page",
];

/// Category anchors appended (as `"<idea> <anchor>"`) when intent is
/// general, so the query set spans complementary furnishing categories.
const CATEGORY_ANCHORS: &[&str] = &[
    "accent seating",
    "floor lamp lighting",
    "side table",
    "throw pillows textiles",
    "framed wall decor",
    "storage shelf",
    "indoor plant pot",
];

/// Upper bound on the query set after category broadening.
const MAX_QUERIES: usize = 12;

/// Most queries a single generative call is asked for.
const MAX_GENERATED: usize = 10;

pub struct QueryExpander {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: Url,
}

impl QueryExpander {
    /// Creates an expander pointed at the production generative API.
    /// With `api_key = None` the generative path is disabled and every
    /// expansion uses the deterministic templates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, EngineError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates an expander with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`EngineError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| EngineError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            api_key,
            model: model.to_string(),
            base_url,
        })
    }

    /// Expands an idea into 6–12 search queries.
    ///
    /// The generative result (8–10 queries) is preferred; any failure is
    /// replaced by the 6 deterministic templates. General intent appends
    /// the category-anchored set, capped at [`MAX_QUERIES`].
    pub async fn expand(
        &self,
        idea: &str,
        budget: f64,
        intent: &Intent,
        single_retailer: Option<&str>,
    ) -> Vec<String> {
        let mut queries = match self.generate(idea, budget, intent, single_retailer).await {
            Some(generated) => generated,
            None => fallback_queries(idea),
        };

        if intent.is_general() {
            for anchor in CATEGORY_ANCHORS {
                queries.push(format!("{idea} {anchor}"));
            }
        }

        dedup_in_order(&mut queries);
        queries.truncate(MAX_QUERIES);
        queries
    }

    /// One generative call constrained to a JSON array of query strings.
    /// Returns `None` on any failure so the caller can fall back.
    async fn generate(
        &self,
        idea: &str,
        budget: f64,
        intent: &Intent,
        single_retailer: Option<&str>,
    ) -> Option<Vec<String>> {
        let api_key = self.api_key.as_deref()?;
        let url = self.base_url.join("v1/chat/completions").ok()?;

        let focus = match intent {
            Intent::Specific(category) => format!(
                "The shopper wants one product type: {category}. Stay narrowly on it."
            ),
            Intent::General => "The shopper is furnishing a whole space. Span complementary \
                categories: seating, lighting, surfaces, textiles, wall decor, storage, planting."
                .to_string(),
        };
        let scope = single_retailer.map_or(String::new(), |host| {
            format!(" Phrase queries with products sold on {host} in mind.")
        });

        let req_body = json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "temperature": 0.7,
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "You write web search queries for shopping. Pick ONE unifying style \
                         direction and weave it into every query so the results look cohesive. \
                         {focus} Bias each query toward resolving to a specific product detail \
                         page, not a category listing.{scope} Return a JSON object with a \
                         \"queries\" key holding an array of 8 to 10 query strings."
                    )
                },
                {
                    "role": "user",
                    "content": format!("Idea: {idea}\nBudget: around {budget:.0} USD")
                }
            ]
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&req_body)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            tracing::warn!(
                status = response.status().as_u16(),
                "query expansion call failed — using templates"
            );
            return None;
        }

        let body: Value = response.json().await.ok()?;
        let content = body
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("content"))
            .and_then(Value::as_str)?;

        parse_generated_queries(content)
    }
}

/// Parses the model's content into a query list. The content should be
/// JSON, but where exactly the array sits varies, so the document is
/// scanned for its first all-string sequence.
fn parse_generated_queries(content: &str) -> Option<Vec<String>> {
    let parsed: Value = serde_json::from_str(content.trim()).ok()?;
    let queries: Vec<String> = json_scan::first_string_seq(&parsed)?
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .take(MAX_GENERATED)
        .collect();
    if queries.is_empty() {
        None
    } else {
        Some(queries)
    }
}

/// The deterministic 6-query template set.
#[must_use]
pub fn fallback_queries(idea: &str) -> Vec<String> {
    FALLBACK_MODIFIERS
        .iter()
        .map(|modifier| format!("{idea} {modifier}"))
        .collect()
}

fn dedup_in_order(queries: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    queries.retain(|q| seen.insert(q.to_lowercase()));
}
