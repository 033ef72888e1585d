//! Orchestration endpoint tests
//!
//! Drives the axum router directly for the request/response contract, and
//! a served instance for the remote turn executor.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{call, ScriptedModel};
use serde_json::{json, Value};
use tower::ServiceExt;

use pharmabridge::core::config::AgentConfig;
use pharmabridge::core::PharmabridgeError;
use pharmabridge::llm::Completion;
use pharmabridge::server::{router, AppState};
use pharmabridge::session::{RemoteExecutor, TurnExecutor};
use pharmabridge::{Orchestrator, ToolRegistry};

fn app_with(script: Vec<pharmabridge::Result<Completion>>) -> Router {
    let orchestrator = Orchestrator::new(
        Arc::new(ScriptedModel::new(script)),
        Arc::new(ToolRegistry::new()),
        AgentConfig::default(),
    );
    router(AppState::new(Arc::new(orchestrator)))
}

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Bind an ephemeral port, serve the router, and return the base URL.
async fn serve_app(script: Vec<pharmabridge::Result<Completion>>) -> String {
    let app = app_with(script);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn successful_turn_returns_content_and_agents() {
    let app = app_with(vec![
        Ok(Completion::tool_calls(vec![call(
            "call_1",
            "query_iqvia_api",
            r#"{"query":"neuropathic pain"}"#,
        )])),
        Ok(Completion::text("The market is $6.5B.")),
    ]);

    let response = app
        .oneshot(chat_request(json!({
            "conversationId": "conv-1",
            "message": "What is the market size for neuropathic pain?",
            "history": []
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["content"], "The market is $6.5B.");
    assert_eq!(body["agentsUsed"], json!(["query_iqvia_api"]));
    assert!(body.get("report_id").is_none());
}

#[tokio::test]
async fn gateway_failure_maps_to_bad_gateway() {
    let app = app_with(vec![Err(PharmabridgeError::upstream(
        "model gateway response not OK: 500 - boom",
    ))]);

    let response = app
        .oneshot(chat_request(json!({
            "conversationId": "conv-1",
            "message": "hello",
            "history": []
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("model gateway"));
}

#[tokio::test]
async fn empty_message_is_rejected_with_bad_request() {
    let app = app_with(vec![]);

    let response = app
        .oneshot(chat_request(json!({
            "conversationId": "conv-1",
            "message": "   ",
            "history": []
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("must not be empty"));
}

#[tokio::test]
async fn preflight_is_answered_for_any_origin() {
    let app = app_with(vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/chat")
                .header("origin", "https://app.example.com")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app_with(vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn remote_executor_round_trips_a_turn() {
    let base = serve_app(vec![
        Ok(Completion::tool_calls(vec![call(
            "call_1",
            "query_iqvia_api",
            r#"{"query":"neuropathic pain"}"#,
        )])),
        Ok(Completion::text("The market is $6.5B.")),
    ])
    .await;

    let executor = RemoteExecutor::new(base);
    let outcome = executor
        .execute_turn("conv-1", "market question", &[])
        .await
        .unwrap();

    assert_eq!(outcome.content, "The market is $6.5B.");
    assert_eq!(outcome.agents_used, vec!["query_iqvia_api"]);
    assert!(outcome.report_id.is_none());
}

#[tokio::test]
async fn remote_executor_surfaces_backend_failure_body() {
    let base = serve_app(vec![Err(PharmabridgeError::upstream(
        "model gateway response not OK: 500 - boom",
    ))])
    .await;

    let executor = RemoteExecutor::new(base);
    let err = executor
        .execute_turn("conv-1", "hello", &[])
        .await
        .unwrap_err();

    match err {
        PharmabridgeError::Backend(body) => assert!(body.contains("model gateway")),
        other => panic!("unexpected error: {}", other),
    }
}
