//! Discovery result types shared across the pipeline.
//!
//! A [`Product`] only exists once a hydrated page has produced a title, a
//! price, and at least one image — partial extractions are dropped at the
//! hydration boundary and never reach these types.

use serde::{Deserialize, Serialize};

/// A validated shopping product extracted from a live product page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: Option<String>,
    /// Unit price in `currency`. Always present: unpriced extractions are
    /// discarded before a `Product` is built.
    pub price: f64,
    /// ISO 4217 currency code. Defaults to `"USD"` when the page does not
    /// declare one.
    pub currency: String,
    /// First image of the extracted gallery, as an absolute URL.
    pub image: String,
    /// Canonical product page URL.
    pub url: String,
    /// Hostname the product was discovered on (e.g. `"www.ikea.com"`).
    pub source: String,
}

impl Product {
    /// Deduplication identity: the page URL, falling back to the image URL
    /// for targets that never resolved a canonical page link.
    #[must_use]
    pub fn identity_key(&self) -> &str {
        if self.url.is_empty() {
            &self.image
        } else {
            &self.url
        }
    }
}

/// Half-open price interval `[min, max)`. The top tier carries
/// `max = f64::INFINITY`, which serializes as `null`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
}

impl PriceBand {
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price < self.max
    }
}

/// The three named price tiers plus the mean of the live distribution.
///
/// Budget-derived bands are a bootstrap only: the first time at least one
/// priced product exists, bands are recomputed from the live distribution
/// and the budget-derived values are discarded, never blended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceBands {
    pub low: PriceBand,
    pub mid: PriceBand,
    pub high: PriceBand,
    pub avg: f64,
}
