//! HTTP surface tests for ScamService.
#![cfg(feature = "server")]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use scamscope::server::ScamService;
use scamscope::{GenerateRequest, ProviderError, RetryConfig, ScamAnalyzer, TextProvider};

/// Provider returning the same outcome on every call.
struct StaticProvider {
    outcome: Result<String, ProviderError>,
    calls: AtomicU32,
}

impl StaticProvider {
    fn ok(text: &str) -> Arc<Self> {
        Self::with(Ok(text.to_string()))
    }

    fn failing(err: ProviderError) -> Arc<Self> {
        Self::with(Err(err))
    }

    fn with(outcome: Result<String, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicU32::new(0),
        })
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TextProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn generate(&self, _request: &GenerateRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.outcome.clone()
    }
}

fn service(provider: Arc<StaticProvider>) -> ScamService {
    let analyzer = ScamAnalyzer::builder()
        .provider(provider)
        .retry(RetryConfig::new().initial_delay(std::time::Duration::from_millis(1)))
        .build()
        .unwrap();
    ScamService::new(Arc::new(analyzer))
}

async fn post(service: ScamService, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze-scam")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = service.router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn verdict_is_returned_as_json() {
    let provider = StaticProvider::ok(
        r#"```json
{"isScam": true, "confidence": 91, "riskLevel": "high", "indicators": ["free drone"], "recommendation": "Ignore it."}
```"#,
    );
    let (status, body) = post(service(provider), r#"{"message": "Free drone for you!"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "isScam": true,
            "confidence": 91,
            "riskLevel": "high",
            "indicators": ["free drone"],
            "recommendation": "Ignore it."
        })
    );
}

#[tokio::test]
async fn invalid_message_is_400_without_provider_call() {
    let provider = StaticProvider::ok(r#"{"isScam": false}"#);
    for body in [r#"{}"#, r#"{"message": 5}"#, r#"{"message": ""}"#, "not json"] {
        let (status, json) = post(service(provider.clone()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(json["error"].as_str().unwrap().starts_with("Invalid message provided"));
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn bad_credentials_are_401() {
    let (status, body) = post(
        service(StaticProvider::failing(ProviderError::AuthenticationFailed)),
        r#"{"message": "hi"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("setupUrl").is_none());
}

#[tokio::test]
async fn billing_requirement_is_402_with_setup_link() {
    let svc = service(StaticProvider::failing(ProviderError::PaymentRequired))
        .with_setup_url("https://example.com/billing");
    let (status, body) = post(svc, r#"{"message": "hi"}"#).await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["setupUrl"], "https://example.com/billing");
}

#[tokio::test]
async fn persistent_rate_limit_is_429() {
    let provider = StaticProvider::failing(ProviderError::RateLimited { retry_after: None });
    let (status, _) = post(service(provider.clone()), r#"{"message": "hi"}"#).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn unusable_replies_are_500_without_leaking_payload() {
    for reply in ["secret model chatter", r#"{"verdict": "scam"}"#, ""] {
        let (status, body) = post(service(StaticProvider::ok(reply)), r#"{"message": "hi"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{reply}");
        assert!(!body["error"].as_str().unwrap().contains("secret"));
    }
}

#[tokio::test]
async fn health_reports_provider() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = service(StaticProvider::ok("{}"))
        .router()
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "static");
}
