//! 実ポートにバインドしたサーバーに対するHTTPテスト

use inventory::api;
use inventory::engine::EnginePolicy;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::support::app::create_test_app;
use crate::support::http::spawn_server;

#[tokio::test]
async fn test_add_remove_and_list_over_http() {
    let app = create_test_app(EnginePolicy::document_store()).await;
    let server = spawn_server(api::create_app(
        app.state.clone(),
        "http://localhost:5173",
    ))
    .await;
    let client = Client::new();

    let response = client
        .post(server.url("/api/add"))
        .json(&json!({ "id": 1, "name": "Bolt", "count": 50, "date": "2024-01-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post(server.url("/api/remove"))
        .json(&json!({ "id": 1, "name": "Bolt", "count": 10, "date": "2024-01-05" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(server.url("/api/getRecentEntries"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["entries"],
        json!([{ "id": 1, "name": "Bolt", "count": 40, "date": "01/01/2024" }])
    );

    assert_eq!(app.log_entries().await.len(), 2);
    server.stop().await;
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = create_test_app(EnginePolicy::document_store()).await;
    let server = spawn_server(api::create_app(app.state.clone(), "http://localhost:5173")).await;

    let response = Client::new()
        .get(server.url("/api/getRecentEntries"))
        .header("origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("http://localhost:5173")
    );
    server.stop().await;
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app(EnginePolicy::document_store()).await;
    let server = spawn_server(api::create_app(app.state.clone(), "http://localhost:5173")).await;

    let response = Client::new()
        .get(server.url("/api/unknown"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    server.stop().await;
}

/// ストアが使えなくなった場合は詳細を隠した500を返す
#[tokio::test]
async fn test_store_failure_returns_generic_500() {
    let app = create_test_app(EnginePolicy::document_store()).await;
    let server = spawn_server(api::create_app(app.state.clone(), "http://localhost:5173")).await;
    app.pool.close().await;
    let client = Client::new();

    let response = client
        .get(server.url("/api/getRecentEntries"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Error fetching recent entries" }));

    let response = client
        .post(server.url("/api/add"))
        .json(&json!({ "id": 1, "name": "Bolt", "count": 1, "date": "2024-01-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Error processing request" }));

    server.stop().await;
}
