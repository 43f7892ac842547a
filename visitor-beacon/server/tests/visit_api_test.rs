use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use beacon_metrics::{DefaultMetrics, Metrics};
use notification::{Notification, NotificationClient};
use serde_json::json;
use visitor_beacon_core::config::{EnrichmentConfig, RedirectConfig};
use visitor_beacon_server::{
    service::{EnrichmentClient, Notifier, RedirectPolicy},
    ServiceState,
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Keeps every notification instead of delivering it.
#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|n| n.text().to_string()).collect()
    }
}

#[async_trait]
impl NotificationClient for RecordingNotifier {
    async fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<serde_json::Value, notification::Error> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(json!({ "ok": true }))
    }
}

struct TestContext {
    server: TestServer,
    recorder: RecordingNotifier,
    metrics: DefaultMetrics,
}

fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/public")
}

fn create_test_context(enrichment_endpoint: &str) -> TestContext {
    let recorder = RecordingNotifier::default();
    let metrics = DefaultMetrics::new().expect("Failed to create metrics");

    let enrichment = EnrichmentClient::new(&EnrichmentConfig {
        geo_endpoint: enrichment_endpoint.to_string(),
        geo_token: "geo-token".to_string(),
        risk_endpoint: enrichment_endpoint.to_string(),
        risk_key: "risk-key".to_string(),
        timeout: Duration::from_secs(2),
    })
    .expect("Failed to create enrichment client");

    let redirect_policy = RedirectPolicy::new(&RedirectConfig {
        default_url: "https://www.google.com".to_string(),
        allowed_hosts: None,
    });

    let service_state = ServiceState::new(
        enrichment,
        Notifier::new(Arc::new(recorder.clone()), metrics.clone()),
        metrics.clone(),
        redirect_policy,
    );

    let app = visitor_beacon_server::app(&service_state, &static_dir());
    let server = TestServer::new(app).expect("Failed to create test server");

    TestContext { server, recorder, metrics }
}

fn forwarded_for(address: &'static str) -> (HeaderName, HeaderValue) {
    (HeaderName::from_static("x-forwarded-for"), HeaderValue::from_static(address))
}

#[tokio::test]
async fn test_log_client_info_rejects_empty_body() {
    let ctx = create_test_context(UNREACHABLE);

    let response = ctx.server.post("/log-client-info").text("").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["_status"], 400);
    assert_eq!(body["error"]["type"], "BAD_REQUEST");
    assert!(ctx.recorder.texts().is_empty());
}

#[tokio::test]
async fn test_log_client_info_rejects_null_and_non_json_body() {
    let ctx = create_test_context(UNREACHABLE);

    ctx.server.post("/log-client-info").json(&json!(null)).await.assert_status_bad_request();
    ctx.server.post("/log-client-info").text("width=1920").await.assert_status_bad_request();

    assert!(ctx.recorder.texts().is_empty());
}

#[tokio::test]
async fn test_log_client_info_rejects_arrays() {
    let ctx = create_test_context(UNREACHABLE);

    ctx.server.post("/log-client-info").json(&json!([])).await.assert_status_bad_request();
    ctx.server
        .post("/log-client-info")
        .json(&json!([1920, 1080]))
        .await
        .assert_status_bad_request();

    assert!(ctx.recorder.texts().is_empty());
}

#[tokio::test]
async fn test_log_client_info_sends_one_report() {
    let ctx = create_test_context(UNREACHABLE);

    let response = ctx
        .server
        .post("/log-client-info")
        .json(&json!({
            "screenWidth": 1920,
            "screenHeight": 1080,
            "colorDepth": 24,
            "pixelDepth": 24,
            "browserLanguage": "en-US",
            "platform": "Linux x86_64",
            "userAgent": "Mozilla/5.0",
            "cookieEnabled": true
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "_status": 200 }));

    let texts = ctx.recorder.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Client Screen &amp; Browser Info"));
    assert!(texts[0].contains("<b>Screen Resolution:</b> 1920x1080"));
    assert!(ctx.metrics.encode_text().unwrap().contains("visitor_beacon_client_reports_total 1"));
}

#[tokio::test]
async fn test_source_redirects() {
    let ctx = create_test_context(UNREACHABLE);

    let response = ctx.server.get("/source").await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header(header::LOCATION), "https://www.google.com");

    let response = ctx.server.get("/source").add_query_param("redirect", "https://example.com").await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header(header::LOCATION), "https://example.com");

    let response = ctx.server.get("/source").add_query_param("redirect", "").await;
    assert_eq!(response.header(header::LOCATION), "https://www.google.com");

    // every call to `/source` is a tracked visit
    assert_eq!(ctx.recorder.texts().len(), 3);
}

#[tokio::test]
async fn test_tracked_route_reports_visit_when_lookups_fail() {
    let ctx = create_test_context(UNREACHABLE);
    let (name, value) = forwarded_for("203.0.113.7, 10.0.0.1");

    let response = ctx.server.get("/").add_header(name, value).await;

    response.assert_status_ok();
    assert!(response.text().contains("visitor-beacon fixture"));

    let texts = ctx.recorder.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("<b>IP Address:</b> 203.0.113.7"));
    assert!(texts[0].contains("<b>Location:</b> Unknown, Unknown, Unknown"));
    assert!(texts[0].contains("<b>Is VPN:</b> No"));

    let metrics = ctx.metrics.encode_text().unwrap();
    assert!(metrics.contains("visitor_beacon_visits_total 1"));
    assert!(metrics.contains("visitor_beacon_lookup_failures_total{service=\"geo\"} 1"));
    assert!(metrics.contains("visitor_beacon_lookup_failures_total{service=\"risk\"} 1"));
}

#[tokio::test]
async fn test_tracked_route_reports_enriched_visit() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/198.51.100.4/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "city": "Porto",
            "region": "Porto",
            "country": "PT",
            "loc": "41.1496,-8.6110"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/json/ip/risk-key/198.51.100.4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "tor": true })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let ctx = create_test_context(&mock_server.uri());

    let response = ctx
        .server
        .get("/robots.txt")
        .add_header(HeaderName::from_static("x-real-ip"), HeaderValue::from_static("198.51.100.4"))
        .add_header(header::USER_AGENT, HeaderValue::from_static("curl/8.4.0"))
        .await;

    response.assert_status_ok();
    let texts = ctx.recorder.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("<b>Location:</b> Porto, Porto, PT"));
    assert!(texts[0].contains("https://www.google.com/maps?q=41.1496,-8.6110"));
    assert!(texts[0].contains("<b>Is TOR:</b> Yes"));
    assert!(texts[0].contains("<b>User-Agent:</b> curl/8.4.0"));
}

#[tokio::test]
async fn test_unknown_path_is_tracked_not_found() {
    let ctx = create_test_context(UNREACHABLE);

    let response = ctx.server.get("/no-such-page").await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["type"], "NOT_FOUND");

    let texts = ctx.recorder.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("<b>IP Address:</b> Unknown"));
}
