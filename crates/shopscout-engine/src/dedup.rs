//! Deduplication at the two points repeats enter the pipeline: candidate
//! targets (pre-fetch, so identical pages are fetched at most once) and
//! hydrated products (cross-batch and cross-expansion-round).

use std::collections::HashSet;

use shopscout_core::Product;
use shopscout_search::SearchTarget;

/// Seen-URL set for candidate targets across all queries in a request.
#[derive(Debug, Default)]
pub struct TargetDedup {
    seen: HashSet<String>,
}

impl TargetDedup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only targets not seen before, recording them as seen.
    /// Targets without any URL carry no identity and are dropped here —
    /// hydration could do nothing with them anyway.
    pub fn retain_new(&mut self, targets: Vec<SearchTarget>) -> Vec<SearchTarget> {
        targets
            .into_iter()
            .filter(|t| match t.identity_key() {
                Some(key) => self.seen.insert(canonical(key)),
                None => false,
            })
            .collect()
    }
}

/// Seen-key set for hydrated products, keyed by canonical page URL with
/// the image URL as fallback.
#[derive(Debug, Default)]
pub struct ProductDedup {
    seen: HashSet<String>,
}

impl ProductDedup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only products not seen before, recording them as seen.
    pub fn retain_new(&mut self, products: Vec<Product>) -> Vec<Product> {
        products
            .into_iter()
            .filter(|p| self.seen.insert(canonical(p.identity_key())))
            .collect()
    }
}

/// Canonical form for URL identity: fragment and trailing-slash trims
/// only. The same page reached through two queries yields the same key.
fn canonical(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment.trim_end_matches('/').to_string()
}
