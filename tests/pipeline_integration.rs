//! Pipeline Integration Test
//!
//! Exercises the widget pipeline end to end against mock HTTP servers:
//! - API acquisition with data mapping and template rendering
//! - HTTP and shape failures collapsing into the uniform error fragment
//! - Tiered RSS acquisition (preview service first, direct fetch only on
//!   connection failure)

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use slate_runtime::acquisition::rss::RssSource;
use slate_runtime::config::WidgetConfig;
use slate_runtime::pipeline;

fn api_config(url: &str, template: &str, mapping: serde_json::Value) -> WidgetConfig {
    let raw = json!({
        "data_source": "api",
        "api_url": url,
        "template_type": template,
        "data_mapping": mapping,
    });
    WidgetConfig::from_json(&raw.to_string()).unwrap()
}

// ── API acquisition ──

#[tokio::test]
async fn api_widget_renders_mapped_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics"))
        .and(header("user-agent", "E-Paper-Dashboard/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "system": {"hostname": "epd-01", "load": [0.4, 0.5, 0.7]},
        })))
        .mount(&server)
        .await;

    let config = api_config(
        &format!("{}/metrics", server.uri()),
        "key_value",
        json!({"title": "system.hostname", "value": "system.load[0]"}),
    );
    let fragment = pipeline::run(&config).await;
    assert!(fragment.contains("epd-01"));
    assert!(fragment.contains("0.4"));
    assert!(!fragment.contains("widget-error"));
}

#[tokio::test]
async fn api_http_error_renders_error_fragment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = api_config(&server.uri(), "key_value", json!({}));
    let fragment = pipeline::run(&config).await;
    assert!(fragment.contains("widget-error"));
    assert!(fragment.contains("Widget execution failed"));
    assert!(fragment.contains("503"));
}

#[tokio::test]
async fn unknown_template_message_has_no_pipeline_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let config = api_config(&server.uri(), "sparkline", json!({}));
    let fragment = pipeline::run(&config).await;
    assert!(fragment.contains("Unknown template type: sparkline"));
    assert!(!fragment.contains("Widget execution failed"));
}

#[tokio::test]
async fn custom_headers_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"v": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let raw = json!({
        "data_source": "api",
        "api_url": server.uri(),
        "api_headers": {"Authorization": "Bearer token-123"},
        "template_type": "key_value",
        "data_mapping": {"value": "v"},
    });
    let config = WidgetConfig::from_json(&raw.to_string()).unwrap();
    let fragment = pipeline::run(&config).await;
    assert!(!fragment.contains("widget-error"));
}

// ── RSS acquisition tiers ──

fn rss_config(feed_url: &str) -> WidgetConfig {
    let raw = json!({
        "data_source": "rss",
        "api_url": feed_url,
        "template_type": "rss_headlines",
        "rss_config": {"max_items": 5},
    });
    WidgetConfig::from_json(&raw.to_string()).unwrap()
}

#[tokio::test]
async fn rss_preview_service_is_preferred() {
    let preview = MockServer::start().await;
    let feed = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rss/preview"))
        .and(body_partial_json(json!({"feed_url": feed.uri()})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed": {
                "title": "Preview Feed",
                "items": [{"title": "From preview", "link": "https://p/1"}],
            },
        })))
        .expect(1)
        .mount(&preview)
        .await;
    // The feed itself must never be contacted when the preview succeeds.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&feed)
        .await;

    let source = RssSource::with_preview_url(format!("{}/api/rss/preview", preview.uri()));
    let value = source.fetch(&rss_config(&feed.uri())).await.unwrap();
    assert_eq!(value["title"], "Preview Feed");
    assert_eq!(value["items"][0]["title"], "From preview");
}

#[tokio::test]
async fn rss_falls_back_to_direct_fetch_when_preview_unreachable() {
    let feed = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .and(header("user-agent", "E-Paper-Dashboard/1.0 RSS Reader"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<rss version="2.0"><channel>
                 <title>Direct Feed</title>
                 <item><title>From direct</title><link>https://d/1</link></item>
               </channel></rss>"#,
        ))
        .expect(1)
        .mount(&feed)
        .await;

    // Nothing listens on port 1, so the preview call fails to connect.
    let source = RssSource::with_preview_url("http://127.0.0.1:1/api/rss/preview");
    let value = source
        .fetch(&rss_config(&format!("{}/feed.xml", feed.uri())))
        .await
        .unwrap();
    assert_eq!(value["title"], "Direct Feed");
    assert_eq!(value["items"][0]["title"], "From direct");
}

#[tokio::test]
async fn rss_preview_http_error_is_fatal() {
    let preview = MockServer::start().await;
    let feed = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&preview)
        .await;
    // A reachable-but-failing preview service must not trigger the
    // direct-fetch tier.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&feed)
        .await;

    let source = RssSource::with_preview_url(format!("{}/api/rss/preview", preview.uri()));
    let err = source.fetch(&rss_config(&feed.uri())).await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn rss_preview_without_feed_key_is_fatal() {
    let preview = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&preview)
        .await;

    let source = RssSource::with_preview_url(format!("{}/api/rss/preview", preview.uri()));
    let err = source
        .fetch(&rss_config("https://example.com/feed"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid RSS API response format");
}
