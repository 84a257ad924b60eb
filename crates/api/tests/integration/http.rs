use api::app::MAX_BODY_BYTES;
use api::{AppState, ServerConfig};
use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_health_endpoint() {
    let addr = spawn_server(setup_test_state()).await;

    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_graphiql_page() {
    let addr = spawn_server(setup_test_state()).await;

    let response = reqwest::get(format!("http://{addr}/graphiql")).await.unwrap();

    assert_eq!(response.status(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "got {content_type}");
}

#[tokio::test]
async fn test_http_mutation() {
    let addr = spawn_server(setup_test_state()).await;

    let body: Value = reqwest::Client::new()
        .post(format!("http://{addr}/graphql"))
        .json(&json!({
            "query": "mutation { createNewsEvent(title: \"Over HTTP\", description: \"POST\") { title description } }"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body["data"]["createNewsEvent"],
        json!({ "title": "Over HTTP", "description": "POST" })
    );
}

#[tokio::test]
async fn test_http_rejects_invalid_json() {
    let addr = spawn_server(setup_test_state()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/graphql"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("bad request: Invalid GraphQL request"));
}

#[tokio::test]
async fn test_http_rejects_oversized_body() {
    let addr = spawn_server(setup_test_state()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/graphql"))
        .header("content-type", "application/json")
        .body(vec![b' '; MAX_BODY_BYTES + 1])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("bad request: Failed to read request body"),
        "got {body}"
    );
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let state = AppState::new(ServerConfig {
        allowed_origins: vec!["http://app.test".to_string()],
        ..ServerConfig::default()
    });
    let addr = spawn_server(state).await;
    let client = reqwest::Client::new();

    let allowed = client
        .get(format!("http://{addr}/health"))
        .header("origin", "http://app.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        "http://app.test"
    );

    let other = client
        .get(format!("http://{addr}/health"))
        .header("origin", "http://other.test")
        .send()
        .await
        .unwrap();
    assert!(other.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_cors_wildcard_origin_allows_any() {
    let state = AppState::new(ServerConfig {
        allowed_origins: vec!["*".to_string(), "http://app.test".to_string()],
        ..ServerConfig::default()
    });
    let addr = spawn_server(state).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/health"))
        .header("origin", "http://anywhere.test")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
