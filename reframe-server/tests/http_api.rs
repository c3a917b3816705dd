//! End-to-end HTTP tests against a router backed by a scripted completion service.

use std::net::SocketAddr;
use std::sync::Arc;

use reframe_core::{FactService, FactServiceConfig, MockCompletion, MockReply};
use reframe_server::{cors, router, AppState, DEFAULT_ALLOWED_ORIGIN};
use serde_json::{json, Value};

async fn spawn(replies: Vec<MockReply>) -> (SocketAddr, Arc<MockCompletion>) {
    let mock = Arc::new(MockCompletion::new(replies));
    let config = FactServiceConfig::default().with_current_year(2025);
    let service = Arc::new(FactService::with_config(mock.clone(), config));
    let app = router(
        AppState::new(service),
        cors(DEFAULT_ALLOWED_ORIGIN).unwrap(),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, mock)
}

#[tokio::test]
async fn test_initial_fact() {
    let (addr, mock) = spawn(vec![MockReply::text(
        " Wind power supplied 22% of EU electricity in 2023. ",
    )])
    .await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/initial-fact"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["cache-control"],
        "no-cache, no-store, must-revalidate, private"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["text"], "Wind power supplied 22% of EU electricity in 2023.");
    assert_eq!(body["fact"], body["text"]);
    assert!(body["requestId"].as_str().is_some());
    let categories = body["categories"].as_array().unwrap();
    assert!(categories.len() == 2 || categories.len() == 3);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_duplicate_fact_is_409() {
    let (addr, _) = spawn(vec![
        MockReply::text("Wind power supplied 22% of EU electricity in 2023."),
        MockReply::text("wind power supplied 22% of EU electricity in 2023"),
    ])
    .await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/api/getInitialFact");

    assert_eq!(client.post(&url).send().await.unwrap().status(), 200);
    let response = client.post(&url).send().await.unwrap();
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("too similar"));
}

#[tokio::test]
async fn test_reframe_fact() {
    let (addr, mock) = spawn(vec![MockReply::text("Wind as brushstrokes across a grid.\n")]).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/reframe-fact"))
        .json(&json!({ "textToReframe": "Wind power grew.", "subjectLens": "Art" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["reframedText"], "Wind as brushstrokes across a grid.");
    assert!(mock.prompts()[0].contains("Wind power grew."));
}

#[tokio::test]
async fn test_reframe_missing_lens_is_400() {
    let (addr, mock) = spawn(vec![]).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/reframeFact"))
        .json(&json!({ "textToReframe": "Wind power grew." }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("subjectLens"));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_unreadable_body_is_400_json() {
    let (addr, mock) = spawn(vec![]).await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/reframe-fact");

    let requests = [
        client.post(&url).body(r#"{"textToReframe":"x","subjectLens":"Art"}"#),
        client
            .post(&url)
            .header("content-type", "application/json")
            .body("{textToReframe: oops"),
        client
            .post(&url)
            .json(&json!({ "textToReframe": 42, "subjectLens": "Art" })),
    ];
    for request in requests {
        let response = request.send().await.unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("JSON body"));
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_502() {
    let (addr, _) = spawn(vec![MockReply::error("quota exceeded")]).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/initial-fact"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn test_status_endpoints() {
    let (addr, _) = spawn(vec![MockReply::text("API is working!")]).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("http://{addr}/api/test"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "Server is running");

    let body: Value = client
        .get(format!("http://{addr}/api/test-gemini"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "API is working!");
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let (addr, _) = spawn(vec![]).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/api/test"))
        .header("Origin", DEFAULT_ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        DEFAULT_ALLOWED_ORIGIN
    );
}
