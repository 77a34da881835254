use super::*;

fn test_client() -> SearchClient {
    SearchClient::with_base_url(
        "test-key",
        "test-cx",
        5,
        "shopscout-test/0.1",
        "https://example.test",
    )
    .expect("failed to build test SearchClient")
}

fn hosts(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn scoped_query_leaves_single_site_untouched() {
    assert_eq!(
        scoped_query("floor lamp", &hosts(&["www.ikea.com"])),
        "floor lamp"
    );
}

#[test]
fn scoped_query_or_joins_multiple_sites() {
    assert_eq!(
        scoped_query("floor lamp", &hosts(&["www.ikea.com", "www.wayfair.com"])),
        "floor lamp site:www.ikea.com OR site:www.wayfair.com"
    );
}

#[test]
fn build_url_single_site_uses_native_parameter() {
    let client = test_client();
    let url = client
        .build_url("floor lamp", 10, &hosts(&["www.ikea.com"]), false, 1)
        .unwrap();
    let rendered = url.to_string();
    assert!(rendered.contains("siteSearch=www.ikea.com"), "{rendered}");
    assert!(rendered.contains("q=floor+lamp"), "{rendered}");
    assert!(!rendered.contains("site%3A"), "{rendered}");
}

#[test]
fn build_url_multi_site_folds_into_query() {
    let client = test_client();
    let url = client
        .build_url(
            "floor lamp",
            10,
            &hosts(&["www.ikea.com", "www.target.com"]),
            false,
            1,
        )
        .unwrap();
    let rendered = url.to_string();
    assert!(!rendered.contains("siteSearch"), "{rendered}");
    assert!(
        rendered.contains("site%3Awww.ikea.com+OR+site%3Awww.target.com"),
        "{rendered}"
    );
}

#[test]
fn build_url_clamps_limit_to_page_size() {
    let client = test_client();
    let url = client.build_url("lamp", 50, &[], false, 1).unwrap();
    assert!(url.to_string().contains("num=10"), "{url}");
}

#[test]
fn build_url_floors_start_at_one() {
    let client = test_client();
    let url = client.build_url("lamp", 10, &[], false, 0).unwrap();
    assert!(url.to_string().contains("start=1"), "{url}");
}

#[test]
fn build_url_image_mode_sets_search_type() {
    let client = test_client();
    let url = client.build_url("lamp", 10, &[], true, 11).unwrap();
    let rendered = url.to_string();
    assert!(rendered.contains("searchType=image"), "{rendered}");
    assert!(rendered.contains("start=11"), "{rendered}");
}

fn item(title: Option<&str>, link: Option<&str>, context: Option<&str>) -> SearchItem {
    SearchItem {
        title: title.map(ToString::to_string),
        link: link.map(ToString::to_string),
        image: context.map(|c| crate::types::ImageInfo {
            context_link: Some(c.to_string()),
        }),
    }
}

#[test]
fn normalize_link_mode_maps_link_to_page_url() {
    let targets = normalize_items(
        vec![item(Some("Lamp"), Some("https://shop.test/p/1"), None)],
        false,
    );
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].page_url.as_deref(), Some("https://shop.test/p/1"));
    assert_eq!(targets[0].image_url, None);
}

#[test]
fn normalize_image_mode_uses_context_link_for_page() {
    let targets = normalize_items(
        vec![item(
            Some("Lamp"),
            Some("https://cdn.test/lamp.jpg"),
            Some("https://shop.test/p/1"),
        )],
        true,
    );
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].page_url.as_deref(), Some("https://shop.test/p/1"));
    assert_eq!(
        targets[0].image_url.as_deref(),
        Some("https://cdn.test/lamp.jpg")
    );
}

#[test]
fn normalize_image_mode_falls_back_to_link_without_context() {
    let targets = normalize_items(
        vec![item(None, Some("https://cdn.test/lamp.jpg"), None)],
        true,
    );
    assert_eq!(targets.len(), 1);
    assert_eq!(
        targets[0].page_url.as_deref(),
        Some("https://cdn.test/lamp.jpg")
    );
}

#[test]
fn normalize_drops_items_without_any_url() {
    let targets = normalize_items(vec![item(Some("No link"), None, None)], false);
    assert!(targets.is_empty());
}
