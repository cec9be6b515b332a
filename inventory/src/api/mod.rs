//! REST APIハンドラー
//!
//! 資材追加・払出し・最近のエントリ一覧

pub mod error;
pub mod inventory;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// APIルーターを作成（CORS・トレースなし）
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/add", post(inventory::add_material))
        .route("/api/remove", post(inventory::remove_material))
        .route("/api/getRecentEntries", get(inventory::get_recent_entries))
        .with_state(state)
}

/// アプリケーション全体を作成
///
/// `cors_origin` が不正なヘッダー値の場合はCORSレイヤーを付けずに警告する。
pub fn create_app(state: AppState, cors_origin: &str) -> Router {
    let router = create_router(state).layer(TraceLayer::new_for_http());

    match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        Err(e) => {
            tracing::warn!(origin = cors_origin, "Invalid CORS origin, CORS disabled: {}", e);
            router
        }
    }
}
