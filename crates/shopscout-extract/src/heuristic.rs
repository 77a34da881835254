//! Heuristic metadata extraction — the fallback when a page carries no
//! structured Product markup.
//!
//! Works off the page `<title>`, Open Graph and item-scoped meta tags,
//! and, only when no price meta tag exists at all, a last-resort regex
//! scan of the raw markup for a `price: <number>` pattern (first match
//! only). This path never marks a record as a product.

use regex::Regex;
use reqwest::Url;

use crate::merge::ExtractedRecord;

/// Extracts whatever the page metadata offers. Always returns a record
/// (possibly with every field empty) so the merge has a fallback side.
#[must_use]
pub fn extract_heuristic(html: &str, page_url: &Url) -> ExtractedRecord {
    let name = meta_content(html, "property", "og:title")
        .or_else(|| title_tag(html))
        .map(|s| clean_text(&s))
        .filter(|s| !s.is_empty());

    let description = meta_content(html, "name", "description")
        .or_else(|| meta_content(html, "property", "og:description"))
        .map(|s| clean_text(&s))
        .filter(|s| !s.is_empty());

    let price_meta = meta_content(html, "property", "og:price:amount")
        .or_else(|| meta_content(html, "property", "product:price:amount"))
        .or_else(|| meta_content(html, "itemprop", "price"));

    // The raw scan runs only when no price meta tag exists; an unparsable
    // meta value does not fall through to it.
    let price = match price_meta {
        Some(raw) => parse_price_text(&raw),
        None => scan_raw_price(html),
    };

    let currency = meta_content(html, "property", "og:price:currency")
        .or_else(|| meta_content(html, "property", "product:price:currency"))
        .or_else(|| meta_content(html, "itemprop", "priceCurrency"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let images = og_images(html, page_url);

    ExtractedRecord {
        is_product: false,
        name,
        description,
        images,
        price,
        currency,
        url: page_url.to_string(),
    }
}

/// Reads a `<meta … content="…">` value by attribute key/value, accepting
/// either attribute order.
fn meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    let escaped = regex::escape(key_value);
    let before = Regex::new(&format!(
        r#"(?is)<meta[^>]*\b{key_attr}\s*=\s*["']{escaped}["'][^>]*\bcontent\s*=\s*["']([^"']*)["']"#
    ))
    .expect("valid meta regex");
    if let Some(cap) = before.captures(html) {
        return cap.get(1).map(|m| m.as_str().to_string());
    }

    let after = Regex::new(&format!(
        r#"(?is)<meta[^>]*\bcontent\s*=\s*["']([^"']*)["'][^>]*\b{key_attr}\s*=\s*["']{escaped}["']"#
    ))
    .expect("valid meta regex");
    after
        .captures(html)
        .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
}

fn title_tag(html: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex");
    re.captures(html)
        .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
}

/// All `og:image` metas, in document order, resolved to absolute URLs.
fn og_images(html: &str, page_url: &Url) -> Vec<String> {
    let re = Regex::new(
        r#"(?is)<meta[^>]*\bproperty\s*=\s*["']og:image["'][^>]*\bcontent\s*=\s*["']([^"']+)["']"#,
    )
    .expect("valid og:image regex");
    re.captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|s| !s.is_empty())
        .filter_map(|s| page_url.join(&s).ok().map(|u| u.to_string()))
        .collect()
}

/// Last-resort scan of raw markup for `price: <number>`, first match only.
fn scan_raw_price(html: &str) -> Option<f64> {
    let re = Regex::new(r#"(?i)["']?price["']?\s*[:=]\s*["']?(\d+(?:\.\d{1,2})?)"#)
        .expect("valid raw price regex");
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parses a price from text with currency noise (`"$1,299.00"` → `1299.0`).
pub(crate) fn parse_price_text(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        cleaned.parse().ok()
    }
}

/// Collapses whitespace and decodes the handful of entities that show up
/// in titles and descriptions.
pub(crate) fn clean_text(raw: &str) -> String {
    let decoded = raw
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://shop.example.com/products/arc-lamp").unwrap()
    }

    #[test]
    fn name_prefers_og_title_over_title_tag() {
        let html = r#"<html><head>
            <title>Arc Lamp | Example Shop</title>
            <meta property="og:title" content="Arc Floor Lamp" />
        </head></html>"#;
        let record = extract_heuristic(html, &page_url());
        assert_eq!(record.name.as_deref(), Some("Arc Floor Lamp"));
    }

    #[test]
    fn name_falls_back_to_title_tag() {
        let html = "<html><head><title>  Arc Lamp \n | Example Shop </title></head></html>";
        let record = extract_heuristic(html, &page_url());
        assert_eq!(record.name.as_deref(), Some("Arc Lamp | Example Shop"));
    }

    #[test]
    fn reads_price_meta_with_reversed_attribute_order() {
        let html = r#"<meta content="89.95" property="og:price:amount">"#;
        let record = extract_heuristic(html, &page_url());
        assert_eq!(record.price, Some(89.95));
    }

    #[test]
    fn reads_itemprop_price_meta() {
        let html = r#"<meta itemprop="price" content="$1,299.00">"#;
        let record = extract_heuristic(html, &page_url());
        assert_eq!(record.price, Some(1299.0));
    }

    #[test]
    fn raw_scan_runs_only_without_price_meta() {
        let with_meta = r#"<meta property="og:price:amount" content="unpriced">
            <script>var data = {price: 55.00};</script>"#;
        let record = extract_heuristic(with_meta, &page_url());
        // Meta tag exists but is unparsable; the raw scan must not rescue it.
        assert_eq!(record.price, None);

        let without_meta = r#"<script>var data = {"price": 55.00, "other": 1};</script>"#;
        let record = extract_heuristic(without_meta, &page_url());
        assert_eq!(record.price, Some(55.0));
    }

    #[test]
    fn raw_scan_takes_first_match_only() {
        let html = r#"<script>{"price": 19.99}</script><script>{"price": 99.99}</script>"#;
        let record = extract_heuristic(html, &page_url());
        assert_eq!(record.price, Some(19.99));
    }

    #[test]
    fn og_images_collect_in_order_and_resolve() {
        let html = r#"
            <meta property="og:image" content="https://cdn.example/one.jpg">
            <meta property="og:image" content="/assets/two.jpg">
        "#;
        let record = extract_heuristic(html, &page_url());
        assert_eq!(
            record.images,
            vec![
                "https://cdn.example/one.jpg",
                "https://shop.example.com/assets/two.jpg"
            ]
        );
    }

    #[test]
    fn heuristic_never_flags_a_product() {
        let html = r#"<meta property="og:title" content="Arc Floor Lamp">
            <meta property="og:price:amount" content="89.95">"#;
        let record = extract_heuristic(html, &page_url());
        assert!(!record.is_product);
    }

    #[test]
    fn description_prefers_meta_name_description() {
        let html = r#"
            <meta name="description" content="A sturdy arc lamp.">
            <meta property="og:description" content="OG text">
        "#;
        let record = extract_heuristic(html, &page_url());
        assert_eq!(record.description.as_deref(), Some("A sturdy arc lamp."));
    }

    #[test]
    fn clean_text_collapses_whitespace_and_entities() {
        assert_eq!(
            clean_text("  Tom &amp; Jerry&#39;s \n lamp  "),
            "Tom & Jerry's lamp"
        );
    }
}
