//! Search result types.
//!
//! The upstream API returns a loose item list; everything downstream works
//! on the normalized [`SearchTarget`] — an unvalidated candidate page/image
//! URL pair that exists only until hydration accepts or skips it.

use serde::Deserialize;

/// An unvalidated candidate produced by one search query.
///
/// Identity for pre-fetch deduplication is `page_url`, falling back to
/// `image_url` when the result never carried a page link.
#[derive(Debug, Clone)]
pub struct SearchTarget {
    pub title: Option<String>,
    pub page_url: Option<String>,
    pub image_url: Option<String>,
}

impl SearchTarget {
    /// The URL a deduplicator should key this target by, if any.
    #[must_use]
    pub fn identity_key(&self) -> Option<&str> {
        self.page_url.as_deref().or(self.image_url.as_deref())
    }
}

/// Top-level response from the search API. `items` is absent entirely when
/// a query has no results, hence the default.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One raw result item.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    #[serde(default)]
    pub title: Option<String>,
    /// The result link: a page URL in link mode, the image file URL in
    /// image mode.
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image: Option<ImageInfo>,
}

/// Image-mode metadata. `contextLink` is the page the image was found on.
#[derive(Debug, Deserialize)]
pub(crate) struct ImageInfo {
    #[serde(rename = "contextLink")]
    #[serde(default)]
    pub context_link: Option<String>,
}
