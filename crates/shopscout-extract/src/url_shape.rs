//! URL shape heuristics: product-page prefiltering and listing detection.

use reqwest::Url;
use shopscout_core::RetailerRegistry;

/// Path fragments that mark listing/search/category pages. Matched against
/// the URL path only.
const LISTING_PATH_HINTS: &[&str] = &[
    "/search",
    "/cat/",
    "/category",
    "/categories",
    "/collections",
    "/browse",
    "/results",
    "/shop/",
    "/c/",
    "/s/",
];

/// Query-string keys that mark search result pages.
const LISTING_QUERY_HINTS: &[&str] = &["q", "query", "search", "keyword", "k"];

/// Whether a URL looks like a listing, search, or category page rather
/// than a product detail page.
///
/// This only gates pages that did NOT yield a structured Product node —
/// a typed Product on a listing-shaped URL still wins.
#[must_use]
pub fn looks_like_listing(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    if LISTING_PATH_HINTS.iter().any(|hint| path.contains(hint)) {
        return true;
    }
    url.query_pairs()
        .any(|(key, _)| LISTING_QUERY_HINTS.contains(&key.to_ascii_lowercase().as_str()))
}

/// Pre-fetch filter: on a known retailer, only product-shaped URLs pass;
/// unknown hosts always pass (no shape knowledge means no rejection).
#[must_use]
pub fn passes_retailer_prefilter(registry: &RetailerRegistry, url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    match registry.find(host) {
        Some(retailer) => retailer.is_product_path(url.path()),
        None => true,
    }
}
