//! JSON-LD structured-data extraction for product pages.
//!
//! Scans every `application/ld+json` script block, flattens `@graph` and
//! `mainEntity` wrappers, and takes the first node typed `Product`. A
//! typed node is authoritative: whatever it yields outranks the heuristic
//! extraction during the merge, and only this path may mark a record as a
//! product.

use regex::Regex;
use reqwest::Url;
use serde_json::{Map, Value};

use shopscout_core::json_scan;

use crate::heuristic::clean_text;
use crate::merge::ExtractedRecord;

/// Extracts the first Product-typed JSON-LD node from the page, if any.
#[must_use]
pub fn extract_structured(html: &str, page_url: &Url) -> Option<ExtractedRecord> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid json-ld script regex");

    for cap in script_re.captures_iter(html) {
        let raw = cap.get(1).map_or("", |m| m.as_str()).trim();
        if raw.is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            continue;
        };

        if let Some(node) = find_product_node(&value) {
            return Some(record_from_node(node, page_url));
        }
    }

    None
}

/// Locates the first `Product` node, looking through arrays and the
/// `@graph` / `mainEntity` wrappers publishers nest their markup in.
fn find_product_node(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Array(items) => items.iter().find_map(find_product_node),
        Value::Object(map) => {
            if is_product_type(map.get("@type")) {
                return Some(map);
            }
            map.get("@graph")
                .and_then(find_product_node)
                .or_else(|| map.get("mainEntity").and_then(find_product_node))
        }
        _ => None,
    }
}

fn is_product_type(node_type: Option<&Value>) -> bool {
    match node_type {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("product"),
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.eq_ignore_ascii_case("product")),
        _ => false,
    }
}

fn record_from_node(node: &Map<String, Value>, page_url: &Url) -> ExtractedRecord {
    let name = node
        .get("name")
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|s| !s.is_empty());
    let description = node
        .get("description")
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|s| !s.is_empty());

    let images = image_urls(node.get("image"), page_url);
    let (price, currency) = offer_price(node.get("offers"));

    ExtractedRecord {
        is_product: true,
        name,
        description,
        images,
        price,
        currency,
        url: page_url.to_string(),
    }
}

/// Collects image URLs from the three shapes the markup uses: a bare
/// string, an array of strings/objects, or a single object. Object shapes
/// are scanned generically for their first URL-like string so schema
/// variants (`url`, `contentUrl`, `@id`) all resolve. Every URL is made
/// absolute against the page URL.
fn image_urls(image: Option<&Value>, page_url: &Url) -> Vec<String> {
    let Some(image) = image else {
        return Vec::new();
    };

    let raw: Vec<&str> = match image {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.as_str()),
                other => json_scan::find_first_str(other, is_url_like),
            })
            .collect(),
        other => json_scan::find_first_str(other, is_url_like)
            .into_iter()
            .collect(),
    };

    raw.into_iter()
        .filter_map(|s| resolve(s, page_url))
        .collect()
}

fn is_url_like(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("//") || s.starts_with('/')
}

fn resolve(raw: &str, base: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    base.join(raw).ok().map(|u| u.to_string())
}

/// Pulls price and currency out of the `offers` node (object or array of
/// objects — first entry wins). Price priority: the offer's direct
/// `price`, then `priceSpecification.price`, then `lowPrice`.
fn offer_price(offers: Option<&Value>) -> (Option<f64>, Option<String>) {
    let offer = match offers {
        Some(Value::Object(map)) => map,
        Some(Value::Array(items)) => match items.iter().find_map(Value::as_object) {
            Some(map) => map,
            None => return (None, None),
        },
        _ => return (None, None),
    };

    let spec = offer.get("priceSpecification").and_then(|v| match v {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.iter().find_map(Value::as_object),
        _ => None,
    });

    let price = offer
        .get("price")
        .and_then(parse_price)
        .or_else(|| spec.and_then(|s| s.get("price")).and_then(parse_price))
        .or_else(|| offer.get("lowPrice").and_then(parse_price));

    let currency = offer
        .get("priceCurrency")
        .and_then(Value::as_str)
        .or_else(|| {
            spec.and_then(|s| s.get("priceCurrency"))
                .and_then(Value::as_str)
        })
        .map(ToString::to_string);

    (price, currency)
}

/// Parses a price from a JSON number or a string with currency noise
/// (`"$1,299.00"` → `1299.0`).
pub(crate) fn parse_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => crate::heuristic::parse_price_text(s),
        _ => None,
    }
}
