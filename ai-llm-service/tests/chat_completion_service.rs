//! Drives `ChatCompletionService` against a local axum stub of `/chat/completions`.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use ai_llm_service::{
    AiLlmError, ChatCompletion, ChatCompletionService, LlmModelConfig, LlmProvider, ProviderError,
    ProviderErrorKind,
};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Seen {
    auth: Arc<Mutex<Option<String>>>,
    title: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

fn cfg(endpoint: String, timeout_secs: u64) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::OpenRouter,
        model: "anthropic/claude-3-sonnet".into(),
        endpoint,
        api_key: Some("sk-or-test".into()),
        max_tokens: Some(2000),
        temperature: Some(0.3),
        top_p: None,
        timeout_secs: Some(timeout_secs),
        app_referer: Some("https://example.test".into()),
        app_title: Some("Security Intent Co-Pilot".into()),
    }
}

#[tokio::test]
async fn returns_first_choice_content_verbatim() {
    let seen = Seen::default();
    let app = Router::new()
        .route(
            "/api/v1/chat/completions",
            post(
                |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    *seen.auth.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *seen.title.lock().unwrap() = headers
                        .get("x-title")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *seen.body.lock().unwrap() = Some(body);
                    Json(json!({
                        "choices": [{"message": {"content": "  Here you go: {\"isSecure\": true}  "}}]
                    }))
                },
            ),
        )
        .with_state(seen.clone());
    let base = spawn(app).await;

    let svc = ChatCompletionService::new(cfg(base, 5)).unwrap();
    let out = svc.complete("user prompt", Some("system prompt")).await.unwrap();

    assert_eq!(out, "  Here you go: {\"isSecure\": true}  ");
    assert_eq!(
        seen.auth.lock().unwrap().as_deref(),
        Some("Bearer sk-or-test")
    );
    assert_eq!(
        seen.title.lock().unwrap().as_deref(),
        Some("Security Intent Co-Pilot")
    );

    let body = seen.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "anthropic/claude-3-sonnet");
    assert_eq!(body["max_tokens"], 2000);
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "user prompt");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream overloaded") }),
    );
    let base = spawn(app).await;

    let svc = ChatCompletionService::new(cfg(base, 5)).unwrap();
    let err = svc.generate("p", None).await.unwrap_err();

    match err {
        AiLlmError::Provider(ref e) => {
            assert_eq!(e.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.to_string().contains("sk-or-test"));
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base = spawn(app).await;

    let svc = ChatCompletionService::new(cfg(base, 5)).unwrap();
    let err = svc.generate("p", None).await.unwrap_err();
    assert!(matches!(
        err,
        AiLlmError::Provider(ProviderError {
            kind: ProviderErrorKind::EmptyChoices,
            ..
        })
    ));
}

#[tokio::test]
async fn null_first_choice_is_empty_even_when_a_later_one_has_text() {
    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async {
            Json(json!({"choices": [
                {"message": {"role": "assistant", "content": null}},
                {"message": {"role": "assistant", "content": "{\"isSecure\": true}"}}
            ]}))
        }),
    );
    let base = spawn(app).await;

    let svc = ChatCompletionService::new(cfg(base, 5)).unwrap();
    let err = svc.generate("p", None).await.unwrap_err();
    assert!(matches!(
        err,
        AiLlmError::Provider(ProviderError {
            kind: ProviderErrorKind::EmptyChoices,
            ..
        })
    ));
}

#[tokio::test]
async fn slow_upstream_hits_the_timeout() {
    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"choices": [{"message": {"content": "late"}}]}))
        }),
    );
    let base = spawn(app).await;

    let svc = ChatCompletionService::new(cfg(base, 1)).unwrap();
    let err = svc.generate("p", None).await.unwrap_err();
    assert!(matches!(err, AiLlmError::Timeout(d) if d == Duration::from_secs(1)));
}
