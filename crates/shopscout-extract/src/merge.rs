//! Merge of the two extraction tiers.
//!
//! Structured data is authoritative: every field it provides wins over the
//! heuristic equivalent, and the heuristic side only fills holes. The
//! `is_product` flag can only come from the structured tier — heuristic
//! metadata alone never promotes a page to a product.

/// Intermediate extraction result, produced by both tiers and consumed by
/// the merge. `images` are absolute URLs in page order.
#[derive(Debug, Clone)]
pub struct ExtractedRecord {
    pub is_product: bool,
    pub name: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub url: String,
}

impl ExtractedRecord {
    /// A record with every field empty, for pages where a tier yielded
    /// nothing.
    #[must_use]
    pub fn empty(url: &str) -> Self {
        Self {
            is_product: false,
            name: None,
            description: None,
            images: Vec::new(),
            price: None,
            currency: None,
            url: url.to_string(),
        }
    }
}

/// Merges the structured record (if any) over the heuristic record.
#[must_use]
pub fn merge_records(
    structured: Option<ExtractedRecord>,
    heuristic: ExtractedRecord,
) -> ExtractedRecord {
    let Some(s) = structured else {
        return heuristic;
    };

    ExtractedRecord {
        is_product: s.is_product,
        name: s.name.or(heuristic.name),
        description: s.description.or(heuristic.description),
        images: if s.images.is_empty() {
            heuristic.images
        } else {
            s.images
        },
        price: s.price.or(heuristic.price),
        currency: s.currency.or(heuristic.currency),
        url: s.url,
    }
}
