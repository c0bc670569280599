//! REST API tests against the full router with in-memory gateways

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use wazobia_agent::{AgentError, PushNotifier};
use wazobia_config::Settings;
use wazobia_core::{
    Error, Language, Result, TranslationGateway, TRANSLATION_UNAVAILABLE, UNAVAILABLE_HINT,
};
use wazobia_server::{create_router, AppState};
use wazobia_text_processing::Lexicon;

/// Returns `"<text> in <code>"` and counts calls
struct TaggingGateway {
    calls: AtomicUsize,
}

#[async_trait]
impl TranslationGateway for TaggingGateway {
    async fn translate(&self, text: &str, _from: Language, to: Language) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} in {}", text, to.code()))
    }

    fn name(&self) -> &str {
        "tagging"
    }
}

struct FailingGateway;

#[async_trait]
impl TranslationGateway for FailingGateway {
    async fn translate(&self, _text: &str, _from: Language, _to: Language) -> Result<String> {
        Err(Error::GatewayTimeout(Duration::from_secs(10)))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct PanickingGateway;

#[async_trait]
impl TranslationGateway for PanickingGateway {
    async fn translate(&self, _text: &str, _from: Language, _to: Language) -> Result<String> {
        panic!("gateway exploded");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

struct StallingGateway;

#[async_trait]
impl TranslationGateway for StallingGateway {
    async fn translate(&self, text: &str, _from: Language, _to: Language) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "stalling"
    }
}

struct NoopNotifier;

#[async_trait]
impl PushNotifier for NoopNotifier {
    async fn deliver(
        &self,
        _url: &str,
        _token: &str,
        _payload: &Value,
    ) -> std::result::Result<(), AgentError> {
        Ok(())
    }
}

fn router_with(settings: Settings, gateway: Arc<dyn TranslationGateway>) -> Router {
    let state = AppState::with_gateway(
        settings,
        Lexicon::builtin().unwrap(),
        gateway,
        Arc::new(NoopNotifier),
    );
    create_router(state)
}

fn router(gateway: Arc<dyn TranslationGateway>) -> Router {
    router_with(Settings::default(), gateway)
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn post_translate(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn dictionary_word_is_answered_without_the_gateway() {
    let gateway = Arc::new(TaggingGateway {
        calls: AtomicUsize::new(0),
    });
    let app = router(gateway.clone());

    let (status, body) = call(app, post_translate(json!({"text": "hello"}).to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input"], "hello");
    assert_eq!(body["detected_language"], "english");
    assert_eq!(body["source"], "dictionary");
    assert_eq!(body["found"], true);
    assert_eq!(body["translations"]["yoruba"], "bawo");
    assert_eq!(body["translations"]["hausa"], "sannu");
    assert_eq!(body["translations"]["igbo"], "ndewo");
    assert!(body.get("message").is_none());
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn reverse_dictionary_word_detects_its_language() {
    let app = router(Arc::new(FailingGateway));

    let (status, body) = call(app, post_translate(json!({"text": "Bawo"}).to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detected_language"], "yoruba");
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((confidence - 0.9).abs() < 1e-6);
    assert_eq!(body["translations"]["english"], "hello");
    assert_eq!(body["translations"]["hausa"], "sannu");
    assert_eq!(body["source"], "dictionary");
}

#[tokio::test]
async fn unknown_phrase_goes_to_the_gateway() {
    let gateway = Arc::new(TaggingGateway {
        calls: AtomicUsize::new(0),
    });
    let app = router(gateway.clone());

    let (status, body) = call(
        app,
        post_translate(json!({"text": "  good luck with the exam  "}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input"], "good luck with the exam");
    assert_eq!(body["source"], "external-api");
    assert_eq!(body["found"], true);
    assert_eq!(body["translations"]["yoruba"], "good luck with the exam in yo");
    assert_eq!(body["translations"]["igbo"], "good luck with the exam in ig");
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn explicit_source_language_skips_detection() {
    let gateway = Arc::new(TaggingGateway {
        calls: AtomicUsize::new(0),
    });
    let app = router(gateway);

    let (status, body) = call(
        app,
        post_translate(json!({"text": "mo fe jeun", "source_language": "Yoruba"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detected_language"], "yoruba");
    assert!(body.get("confidence").is_none());
    assert_eq!(body["translations"]["english"], "mo fe jeun in en");
    assert!(body["translations"].get("yoruba").is_none());
}

#[tokio::test]
async fn every_gateway_failure_yields_sentinels_and_hint() {
    let app = router(Arc::new(FailingGateway));

    let (status, body) = call(
        app,
        post_translate(json!({"text": "the quick brown fox"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], false);
    assert_eq!(body["source"], "external-api");
    for language in ["yoruba", "hausa", "igbo"] {
        assert_eq!(body["translations"][language], TRANSLATION_UNAVAILABLE);
    }
    assert_eq!(body["message"], UNAVAILABLE_HINT);
}

#[tokio::test]
async fn malformed_requests_are_rejected() {
    let cases = [
        json!({}).to_string(),
        json!({"text": ""}).to_string(),
        json!({"text": "   "}).to_string(),
        json!({"words": "hello"}).to_string(),
        json!({"text": "hello", "source_language": "klingon"}).to_string(),
        "not json at all".to_string(),
    ];

    for case in cases {
        let app = router(Arc::new(FailingGateway));
        let (status, body) = call(app, post_translate(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "case: {}", case);
        assert!(body["error"].is_string(), "case: {}", case);
    }

    let app = router(Arc::new(FailingGateway));
    let (_, body) = call(app, post_translate(json!({}).to_string())).await;
    assert_eq!(body["error"], "Missing 'text' field in request");
}

#[tokio::test]
async fn handler_panic_becomes_internal_error() {
    let app = router(Arc::new(PanickingGateway));

    let (status, body) = call(
        app,
        post_translate(json!({"text": "no such dictionary phrase"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn slow_requests_hit_the_request_timeout() {
    let mut settings = Settings::default();
    settings.server.request_timeout_seconds = 1;
    let app = router_with(settings, Arc::new(StallingGateway));

    let response = app
        .oneshot(post_translate(json!({"text": "a very slow phrase"}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn health_reports_lexicon_and_cache() {
    let gateway = Arc::new(TaggingGateway {
        calls: AtomicUsize::new(0),
    });
    let state = AppState::with_gateway(
        Settings::default(),
        Lexicon::builtin().unwrap(),
        gateway,
        Arc::new(NoopNotifier),
    );
    let dictionary_size = state.resolver.lexicon().len();
    let app = create_router(state);

    // Warm the cache: one miss per target, then one hit per target
    for _ in 0..2 {
        let (status, _) = call(
            app.clone(),
            post_translate(json!({"text": "see you at the market"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = call(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["translation_service"], "tagging");
    assert_eq!(body["dictionary_size"], dictionary_size);
    assert!(body["timestamp"].is_string());
    assert_eq!(body["cache"]["entries"], 3);
    assert_eq!(body["cache"]["hits"], 3);
    assert_eq!(body["cache"]["misses"], 3);
}

#[tokio::test]
async fn dictionary_lists_categories() {
    let app = router(Arc::new(FailingGateway));

    let (status, body) = call(app, get("/dictionary")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["total_words"].as_u64().unwrap() > 0);
    let categories = body["categories"].as_object().unwrap();
    assert!(!categories.is_empty());
    assert!(categories
        .values()
        .flat_map(|words| words.as_array().unwrap())
        .any(|word| word == "hello"));
}

#[tokio::test]
async fn root_describes_the_service() {
    let app = router(Arc::new(FailingGateway));

    let (status, body) = call(app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(
        body["supported_languages"],
        json!(["English", "Yoruba", "Hausa", "Igbo"])
    );
    assert_eq!(body["endpoints"]["translate"], "/translate");
    assert_eq!(body["endpoints"]["a2a_agent"], "/a2a/agent/wazobiaAgent");
}

#[tokio::test]
async fn metrics_unavailable_without_recorder() {
    let app = router(Arc::new(FailingGateway));

    let response = app.oneshot(get("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
