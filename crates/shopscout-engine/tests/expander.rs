//! Integration tests for the generative query expansion path.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopscout_engine::{Intent, QueryExpander};

fn expander(base: &str) -> QueryExpander {
    QueryExpander::with_base_url(Some("sk-test".to_string()), "gpt-4o-mini", 5, base)
        .expect("failed to build expander")
}

fn chat_completion(content: &serde_json::Value) -> serde_json::Value {
    json!({
        "choices": [{
            "message": { "role": "assistant", "content": content.to_string() }
        }]
    })
}

#[tokio::test]
async fn generated_queries_are_used_when_the_call_succeeds() {
    let server = MockServer::start().await;
    let generated = json!({
        "queries": [
            "mid-century brass floor lamp",
            "walnut arc floor lamp",
            "brass reading lamp dimmable",
            "mid-century tripod floor lamp",
            "brass torchiere floor lamp",
            "arc lamp marble base",
            "mid-century standing lamp linen shade",
            "brass floor lamp adjustable arm"
        ]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(&generated)))
        .mount(&server)
        .await;

    let expander = expander(&server.uri());
    let intent = Intent::Specific("lamp".to_string());
    let queries = expander.expand("floor lamp", 150.0, &intent, None).await;

    assert_eq!(queries.len(), 8);
    assert_eq!(queries[0], "mid-century brass floor lamp");
}

#[tokio::test]
async fn upstream_failure_degrades_to_templates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let expander = expander(&server.uri());
    let intent = Intent::Specific("lamp".to_string());
    let queries = expander.expand("floor lamp", 150.0, &intent, None).await;

    assert_eq!(queries.len(), 6);
    assert_eq!(queries[0], "floor lamp buy online");
}

#[tokio::test]
async fn unparsable_content_degrades_to_templates() {
    let server = MockServer::start().await;
    let body = json!({
        "choices": [{
            "message": { "role": "assistant", "content": "sure! here are some ideas: lamps" }
        }]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let expander = expander(&server.uri());
    let queries = expander
        .expand("floor lamp", 150.0, &Intent::Specific("lamp".to_string()), None)
        .await;

    assert_eq!(queries.len(), 6);
}

#[tokio::test]
async fn general_intent_broadens_generated_set_up_to_cap() {
    let server = MockServer::start().await;
    let generated = json!(["cozy corner armchair", "warm floor lamp", "soft area rug"]);
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(&generated)))
        .mount(&server)
        .await;

    let expander = expander(&server.uri());
    let queries = expander
        .expand("cozy reading corner", 200.0, &Intent::General, None)
        .await;

    // 3 generated + 7 category anchors, under the cap of 12.
    assert_eq!(queries.len(), 10);
    assert!(queries.iter().any(|q| q.starts_with("cozy reading corner ")));
}
