//! Integration tests for the hydration ladder.
//!
//! Uses `wiremock` to serve robots.txt and candidate pages locally. The
//! mock server's host is not a known retailer, so the registry prefilter
//! passes everything through and the later filters are what is under test.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopscout_core::RetailerRegistry;
use shopscout_extract::{Hydrator, SkipReason};
use shopscout_search::SearchTarget;

fn test_hydrator() -> Hydrator {
    Hydrator::new(RetailerRegistry::builtin(), "shopscout-test/0.1", 5, 2, 4)
        .expect("failed to build test Hydrator")
}

fn target(url: String) -> SearchTarget {
    SearchTarget {
        title: None,
        page_url: Some(url),
        image_url: None,
    }
}

const PRODUCT_PAGE: &str = r#"<html><head>
<script type="application/ld+json">
{
  "@context": "https://schema.org",
  "@type": "Product",
  "name": "Arc Floor Lamp",
  "description": "Brass arc floor lamp.",
  "image": ["https://cdn.test/arc.jpg"],
  "offers": { "@type": "Offer", "price": "89.95", "priceCurrency": "USD" }
}
</script>
</head><body></body></html>"#;

async fn mount_page(server: &MockServer, page_path: &str, body: &str, content_type: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

#[tokio::test]
async fn hydrates_structured_product_page() {
    let server = MockServer::start().await;
    // No robots.txt mock: the 404 must fail open.
    mount_page(&server, "/products/arc-lamp", PRODUCT_PAGE, "text/html").await;

    let hydrator = test_hydrator();
    let product = hydrator
        .hydrate_target(&target(format!("{}/products/arc-lamp", server.uri())))
        .await
        .expect("structured product page should hydrate");

    assert_eq!(product.title, "Arc Floor Lamp");
    assert_eq!(product.price, 89.95);
    assert_eq!(product.currency, "USD");
    assert_eq!(product.image, "https://cdn.test/arc.jpg");
}

#[tokio::test]
async fn skips_non_html_content_type_without_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/products/arc-lamp",
        r#"{"title": "Arc Floor Lamp", "price": 89.95}"#,
        "application/json",
    )
    .await;

    let hydrator = test_hydrator();
    let result = hydrator
        .hydrate_target(&target(format!("{}/products/arc-lamp", server.uri())))
        .await;

    assert_eq!(result.unwrap_err(), SkipReason::NotHtml);
}

#[tokio::test]
async fn skips_when_robots_disallows_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("User-agent: *\nDisallow: /products/\n", "text/plain"),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/products/arc-lamp", PRODUCT_PAGE, "text/html").await;

    let hydrator = test_hydrator();
    let result = hydrator
        .hydrate_target(&target(format!("{}/products/arc-lamp", server.uri())))
        .await;

    assert_eq!(result.unwrap_err(), SkipReason::RobotsDisallowed);
}

#[tokio::test]
async fn robots_failure_fails_open() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/products/arc-lamp", PRODUCT_PAGE, "text/html").await;

    let hydrator = test_hydrator();
    let result = hydrator
        .hydrate_target(&target(format!("{}/products/arc-lamp", server.uri())))
        .await;

    assert!(result.is_ok(), "a 500 robots.txt must not block hydration");
}

#[tokio::test]
async fn skips_listing_shaped_page_without_product_markup() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/search/lamps",
        r#"<html><head>
            <meta property="og:title" content="Lamps - 240 results">
            <meta property="og:price:amount" content="19.99">
        </head></html>"#,
        "text/html",
    )
    .await;

    let hydrator = test_hydrator();
    let result = hydrator
        .hydrate_target(&target(format!("{}/search/lamps", server.uri())))
        .await;

    assert_eq!(result.unwrap_err(), SkipReason::ListingPage);
}

#[tokio::test]
async fn skips_unflagged_page_without_any_price() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/products/arc-lamp",
        r#"<html><head>
            <meta property="og:title" content="Arc Floor Lamp">
            <meta property="og:image" content="https://cdn.test/arc.jpg">
        </head></html>"#,
        "text/html",
    )
    .await;

    let hydrator = test_hydrator();
    let result = hydrator
        .hydrate_target(&target(format!("{}/products/arc-lamp", server.uri())))
        .await;

    assert_eq!(result.unwrap_err(), SkipReason::NoPrice);
}

#[tokio::test]
async fn accepts_heuristic_only_page_with_full_fields() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/products/arc-lamp",
        r#"<html><head>
            <meta property="og:title" content="Arc Floor Lamp">
            <meta property="og:image" content="https://cdn.test/arc.jpg">
            <meta property="og:price:amount" content="89.95">
        </head></html>"#,
        "text/html",
    )
    .await;

    let hydrator = test_hydrator();
    let product = hydrator
        .hydrate_target(&target(format!("{}/products/arc-lamp", server.uri())))
        .await
        .expect("fully-tagged heuristic page should hydrate");
    assert_eq!(product.title, "Arc Floor Lamp");
    assert_eq!(product.price, 89.95);
}

#[tokio::test]
async fn skips_product_markup_without_any_image() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/products/arc-lamp",
        r#"<html><head>
        <script type="application/ld+json">
        { "@type": "Product", "name": "Arc Floor Lamp",
          "offers": { "price": "89.95" } }
        </script>
        </head></html>"#,
        "text/html",
    )
    .await;

    let hydrator = test_hydrator();
    let result = hydrator
        .hydrate_target(&target(format!("{}/products/arc-lamp", server.uri())))
        .await;

    assert_eq!(result.unwrap_err(), SkipReason::MissingFields);
}

#[tokio::test]
async fn batch_collects_products_and_skip_distribution() {
    let server = MockServer::start().await;
    mount_page(&server, "/products/good", PRODUCT_PAGE, "text/html").await;
    mount_page(&server, "/products/json", "{}", "application/json").await;

    let hydrator = test_hydrator();
    let targets = vec![
        target(format!("{}/products/good", server.uri())),
        target(format!("{}/products/json", server.uri())),
        SearchTarget {
            title: None,
            page_url: None,
            image_url: Some("https://cdn.test/only-image.jpg".to_string()),
        },
    ];

    let batch = hydrator.hydrate_batch(&targets).await;
    assert_eq!(batch.products.len(), 1);
    assert_eq!(batch.skips.get(&SkipReason::NotHtml), Some(&1));
    assert_eq!(batch.skips.get(&SkipReason::NoUrl), Some(&1));
}
