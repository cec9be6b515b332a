//! 最近のエントリAPI Contract Tests
//!
//! GET /api/getRecentEntries

use axum::http::StatusCode;
use inventory::engine::EnginePolicy;
use serde_json::json;

use crate::support::app::{create_test_app, TestApp};

async fn seed_days(app: &TestApp, days: &[u32]) {
    for (index, day) in days.iter().enumerate() {
        let id = index as i64 + 1;
        let (status, _) = app
            .post_json(
                "/api/add",
                json!({
                    "id": id,
                    "name": format!("Item{}", id),
                    "count": 10,
                    "date": format!("2024-03-{:02}", day),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

/// 空の在庫は空配列
#[tokio::test]
async fn test_recent_entries_empty() {
    let app = create_test_app(EnginePolicy::document_store()).await;

    let (status, body) = app.get_json("/api/getRecentEntries").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"], json!([]));
}

/// 最大5件、日付の新しい順、DD/MM/YYYY表示
#[tokio::test]
async fn test_recent_entries_limited_and_sorted() {
    let app = create_test_app(EnginePolicy::document_store()).await;
    seed_days(&app, &[3, 9, 1, 7, 5, 2, 8]).await;

    let (status, body) = app.get_json("/api/getRecentEntries").await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 5);

    let dates: Vec<&str> = entries
        .iter()
        .map(|entry| entry["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["09/03/2024", "08/03/2024", "07/03/2024", "05/03/2024", "03/03/2024"]
    );
    assert_eq!(entries[0]["id"], 2);
    assert_eq!(entries[0]["name"], "Item2");
    assert_eq!(entries[0]["count"], 10);
}

/// 追加した資材は一覧に現れる
#[tokio::test]
async fn test_recent_entries_include_fresh_add() {
    let app = create_test_app(EnginePolicy::document_store()).await;
    seed_days(&app, &[1]).await;

    let (_, body) = app.get_json("/api/getRecentEntries").await;

    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["name"], "Item1");
}

/// native-driver プリセットは保存値の日付をそのまま返す
#[tokio::test]
async fn test_recent_entries_raw_dates_with_native_driver_policy() {
    let app = create_test_app(EnginePolicy::native_driver()).await;
    seed_days(&app, &[4]).await;

    let (_, body) = app.get_json("/api/getRecentEntries").await;

    assert_eq!(body["entries"][0]["date"], "2024-03-04T00:00:00.000Z");
}
