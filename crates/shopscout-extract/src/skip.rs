//! Typed exclusion reasons for hydration.
//!
//! The pipeline optimizes for precision over recall diagnostics: a target
//! that cannot become a valid product is dropped, never surfaced as an
//! error. Each drop carries a `SkipReason` so the distribution stays
//! inspectable in logs and tests instead of vanishing into swallowed
//! exceptions.

/// Why a candidate target was excluded before becoming a [`shopscout_core::Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The target carried no page URL at all.
    NoUrl,
    /// The page URL did not parse.
    BadUrl,
    /// Known retailer, URL not shaped like a product detail page.
    NotProductShaped,
    /// robots.txt disallows fetching this URL for our agent.
    RobotsDisallowed,
    /// Network-level fetch failure or timeout.
    FetchFailed,
    /// Non-2xx response status.
    BadStatus,
    /// 2xx response that is not HTML.
    NotHtml,
    /// No structured Product node and the URL looks like a
    /// listing/search/category page.
    ListingPage,
    /// No structured Product node and no price was recovered at all.
    NoPrice,
    /// The merged record lacked a title, a price, or any image.
    MissingFields,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoUrl => "no_url",
            SkipReason::BadUrl => "bad_url",
            SkipReason::NotProductShaped => "not_product_shaped",
            SkipReason::RobotsDisallowed => "robots_disallowed",
            SkipReason::FetchFailed => "fetch_failed",
            SkipReason::BadStatus => "bad_status",
            SkipReason::NotHtml => "not_html",
            SkipReason::ListingPage => "listing_page",
            SkipReason::NoPrice => "no_price",
            SkipReason::MissingFields => "missing_fields",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
