//! Target hydration: turning search candidates into validated products.
//!
//! Each target runs the full ladder — URL-shape prefilter, politeness
//! gate, fetch, two-tier extraction, merge, acceptance filters — and ends
//! as either a [`Product`] or a [`SkipReason`]. Batches are bounded to a
//! small number of simultaneous page fetches; a bad target never aborts
//! its batch.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use reqwest::Url;

use shopscout_core::{Product, RetailerRegistry};
use shopscout_search::SearchTarget;

use crate::error::ExtractError;
use crate::fetch::PageFetcher;
use crate::heuristic::extract_heuristic;
use crate::merge::{merge_records, ExtractedRecord};
use crate::robots::PolitenessGate;
use crate::skip::SkipReason;
use crate::structured::extract_structured;
use crate::url_shape::{looks_like_listing, passes_retailer_prefilter};

/// Outcome of hydrating one batch of targets: the accepted products plus
/// the skip-reason distribution for everything excluded.
#[derive(Debug, Default)]
pub struct HydrationBatch {
    pub products: Vec<Product>,
    pub skips: HashMap<SkipReason, usize>,
}

pub struct Hydrator {
    fetcher: PageFetcher,
    gate: PolitenessGate,
    registry: RetailerRegistry,
    concurrency: usize,
}

impl Hydrator {
    /// Creates a hydrator.
    ///
    /// `page_timeout_secs` bounds each candidate page fetch;
    /// `robots_timeout_secs` bounds the (shorter) robots.txt probe;
    /// `concurrency` caps simultaneous in-flight page fetches.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if an underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        registry: RetailerRegistry,
        user_agent: &str,
        page_timeout_secs: u64,
        robots_timeout_secs: u64,
        concurrency: usize,
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            fetcher: PageFetcher::new(page_timeout_secs, user_agent)?,
            gate: PolitenessGate::new(robots_timeout_secs, user_agent)?,
            registry,
            concurrency: concurrency.max(1),
        })
    }

    /// Hydrates one target through the full acceptance ladder.
    pub async fn hydrate_target(&self, target: &SearchTarget) -> Result<Product, SkipReason> {
        let raw_url = target.page_url.as_deref().ok_or(SkipReason::NoUrl)?;
        let url = Url::parse(raw_url).map_err(|_| SkipReason::BadUrl)?;

        if !passes_retailer_prefilter(&self.registry, &url) {
            return Err(SkipReason::NotProductShaped);
        }

        if !self.gate.allows(&url).await {
            return Err(SkipReason::RobotsDisallowed);
        }

        let html = self.fetcher.fetch_html(&url).await?;

        let structured = extract_structured(&html, &url);
        let heuristic = extract_heuristic(&html, &url);
        let merged = merge_records(structured, heuristic);

        // Unflagged pages get two extra filters: listing-shaped URLs, and
        // pages where nothing priced was recovered. This is what keeps
        // category pages with only generic Open Graph tags out.
        if !merged.is_product && looks_like_listing(&url) {
            return Err(SkipReason::ListingPage);
        }
        if !merged.is_product && merged.price.is_none() {
            return Err(SkipReason::NoPrice);
        }

        materialize(merged, target.image_url.as_deref(), url.host_str())
    }

    /// Hydrates a batch with bounded concurrency, collecting accepted
    /// products and the skip distribution.
    pub async fn hydrate_batch(&self, targets: &[SearchTarget]) -> HydrationBatch {
        let outcomes: Vec<Result<Product, SkipReason>> = stream::iter(targets.iter().cloned())
            .map(|target| async move { self.hydrate_target(&target).await })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut batch = HydrationBatch::default();
        for outcome in outcomes {
            match outcome {
                Ok(product) => batch.products.push(product),
                Err(reason) => *batch.skips.entry(reason).or_insert(0) += 1,
            }
        }

        if !batch.skips.is_empty() {
            let mut summary: Vec<String> = batch
                .skips
                .iter()
                .map(|(reason, count)| format!("{reason}={count}"))
                .collect();
            summary.sort();
            tracing::debug!(
                accepted = batch.products.len(),
                skipped = %summary.join(" "),
                "hydration batch finished"
            );
        }

        batch
    }
}

/// Builds the final [`Product`], requiring title, price, and at least one
/// image. The target's own image URL (from image-mode search results)
/// backstops pages whose markup carried no image.
fn materialize(
    record: ExtractedRecord,
    fallback_image: Option<&str>,
    host: Option<&str>,
) -> Result<Product, SkipReason> {
    let title = record.name.ok_or(SkipReason::MissingFields)?;
    let price = record.price.ok_or(SkipReason::MissingFields)?;
    let image = record
        .images
        .into_iter()
        .next()
        .or_else(|| fallback_image.map(ToString::to_string))
        .ok_or(SkipReason::MissingFields)?;

    Ok(Product {
        title,
        description: record.description,
        price,
        currency: record.currency.unwrap_or_else(|| "USD".to_string()),
        image,
        url: record.url,
        source: host.unwrap_or_default().to_string(),
    })
}
