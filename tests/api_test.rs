// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use watchrs::domain::models::check_result::CheckStatus;
use watchrs::presentation::routes;
use watchrs::probes::orchestrator::BatchRunner;
use watchrs::probes::traits::{
    CaptureError, CertificateInfo, CertificateInspector, LivenessProber, PageCapturer,
    ProbeOutcome,
};

struct UpProber;

#[async_trait]
impl LivenessProber for UpProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        ProbeOutcome {
            status: CheckStatus::Up,
            ssl_valid: url.starts_with("https://"),
            response_time_ms: 42,
            error_message: None,
        }
    }
}

struct NoCertificate;

#[async_trait]
impl CertificateInspector for NoCertificate {
    async fn inspect(&self, _url: &str) -> Option<CertificateInfo> {
        None
    }
}

struct OkCapturer;

#[async_trait]
impl PageCapturer for OkCapturer {
    async fn capture(&self, website_id: i64, _url: &str) -> Result<String, CaptureError> {
        Ok(format!("/screenshots/site_{website_id}_0.png"))
    }
}

struct FailingProber;

#[async_trait]
impl LivenessProber for FailingProber {
    async fn probe(&self, _url: &str) -> ProbeOutcome {
        ProbeOutcome {
            status: CheckStatus::Error,
            ssl_valid: false,
            response_time_ms: 30_000,
            error_message: Some("Request timeout".to_string()),
        }
    }
}

struct FailingCapturer;

#[async_trait]
impl PageCapturer for FailingCapturer {
    async fn capture(&self, _website_id: i64, _url: &str) -> Result<String, CaptureError> {
        Err(CaptureError::NavigationTimeout)
    }
}

fn server_with(prober: Arc<dyn LivenessProber>, capturer: Arc<dyn PageCapturer>) -> TestServer {
    let runner = Arc::new(BatchRunner::new(prober, Arc::new(NoCertificate), capturer));
    // ServeDir tolerates a missing directory, requests under it just 404
    TestServer::new(routes::routes(runner, "target/test-screenshots")).unwrap()
}

fn test_server() -> TestServer {
    server_with(Arc::new(UpProber), Arc::new(OkCapturer))
}

/// 健康检查端点
#[tokio::test]
async fn test_health_check() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

/// 成功的批量检查返回与输入等长、同序的结果数组
#[tokio::test]
async fn test_check_returns_ordered_results() {
    let server = test_server();

    let response = server
        .post("/v1/check")
        .json(&json!({
            "websites": [
                { "id": 3, "url": "https://a.example" },
                { "id": 1, "url": "https://b.example" },
            ]
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body.as_array().expect("response should be a JSON array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], 3);
    assert_eq!(results[0]["url"], "https://a.example");
    assert_eq!(results[1]["id"], 1);
    assert_eq!(results[1]["url"], "https://b.example");

    // The rendering layer consumes these camelCase fields verbatim
    assert_eq!(results[0]["status"], "up");
    assert_eq!(results[0]["sslValid"], true);
    assert_eq!(results[0]["responseTimeMs"], 42);
    assert_eq!(results[0]["screenshotRef"], "/screenshots/site_3_0.png");
    assert!(results[0].get("errorMessage").is_none());
}

/// 探测和截图都失败时，错误消息反映探测失败原因且截图引用缺失
#[tokio::test]
async fn test_check_surfaces_probe_failure_when_capture_fails() {
    let server = server_with(Arc::new(FailingProber), Arc::new(FailingCapturer));

    let response = server
        .post("/v1/check")
        .json(&json!({
            "websites": [{ "id": 2, "url": "https://nonexistent.invalid" }]
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["status"], "error");
    assert_eq!(results[0]["errorMessage"], "Request timeout");
    assert!(results[0].get("screenshotRef").is_none());
    assert_eq!(results[0]["sslValid"], false);
}

/// 截图成功时覆盖探测失败：状态为 up 且无错误消息
#[tokio::test]
async fn test_check_capture_overrides_probe_failure() {
    let server = server_with(Arc::new(FailingProber), Arc::new(OkCapturer));

    let response = server
        .post("/v1/check")
        .json(&json!({
            "websites": [{ "id": 5, "url": "https://blocked.example" }]
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body.as_array().unwrap();
    assert_eq!(results[0]["status"], "up");
    assert_eq!(results[0]["sslValid"], true);
    assert!(results[0].get("errorMessage").is_none());
    assert_eq!(results[0]["screenshotRef"], "/screenshots/site_5_0.png");
}

/// 空列表在任何探测开始之前被拒绝
#[tokio::test]
async fn test_empty_websites_rejected() {
    let server = test_server();

    let response = server
        .post("/v1/check")
        .json(&json!({ "websites": [] }))
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("cannot be empty"));
}

/// 缺失 websites 字段的请求体被拒绝
#[tokio::test]
async fn test_missing_websites_rejected() {
    let server = test_server();

    let response = server.post("/v1/check").json(&json!({})).await;
    assert!(response.status_code().is_client_error());
}

/// websites 不是列表时被拒绝
#[tokio::test]
async fn test_non_list_websites_rejected() {
    let server = test_server();

    let response = server
        .post("/v1/check")
        .json(&json!({ "websites": "https://example.com" }))
        .await;
    assert!(response.status_code().is_client_error());
}
