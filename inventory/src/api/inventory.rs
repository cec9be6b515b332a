//! 在庫API
//!
//! POST /api/add, POST /api/remove, GET /api/getRecentEntries

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::AppError;
use crate::common::types::{parse_wire_date, WireInt};
use crate::engine::{AddOutcome, AddRequest, RecentEntry, RemoveRequest};
use crate::AppState;

/// 資材追加リクエスト
#[derive(Debug, Deserialize)]
pub struct AddMaterialRequest {
    /// 資材ID（数値または数値文字列）
    pub id: WireInt,
    /// 資材名
    pub name: String,
    /// 追加数（数値または数値文字列）
    pub count: WireInt,
    /// 登録日付
    pub date: String,
}

impl AddMaterialRequest {
    fn parse(self) -> Result<AddRequest, AppError> {
        Ok(AddRequest {
            id: self.id.parse("id")?,
            count: self.count.parse("count")?,
            date: parse_wire_date(&self.date)?,
            name: self.name,
        })
    }
}

/// 資材払出しリクエスト
#[derive(Debug, Deserialize)]
pub struct RemoveMaterialRequest {
    /// 資材ID
    pub id: WireInt,
    /// 資材名（IDのみで検索する設定では省略可）
    #[serde(default)]
    pub name: Option<String>,
    /// 払出し数
    pub count: WireInt,
    /// 払出し日付
    pub date: String,
}

impl RemoveMaterialRequest {
    fn parse(self) -> Result<RemoveRequest, AppError> {
        Ok(RemoveRequest {
            id: self.id.parse("id")?,
            count: self.count.parse("count")?,
            date: parse_wire_date(&self.date)?,
            name: self.name,
        })
    }
}

/// メッセージのみのレスポンス
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// メッセージ
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// 最近のエントリ一覧レスポンス
#[derive(Debug, Serialize)]
pub struct RecentEntriesResponse {
    /// 日付の新しい順（最大5件）
    pub entries: Vec<RecentEntry>,
}

/// POST /api/add - 資材追加
///
/// # Returns
/// * `200 OK` - 追加（または加算）成功
/// * `400 Bad Request` - 識別子の不整合・入力不正
/// * `500 Internal Server Error` - サーバーエラー
pub async fn add_material(
    State(state): State<AppState>,
    payload: Result<Json<AddMaterialRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;
    let request = payload.parse()?;

    let message = match state.engine.add_material(request).await? {
        AddOutcome::Inserted(_) => "Material inserted successfully",
        AddOutcome::Accumulated { .. } => "Material count updated successfully",
    };

    Ok(MessageResponse::new(message))
}

/// POST /api/remove - 資材払出し
///
/// # Returns
/// * `200 OK` - 払出し成功
/// * `400 Bad Request` - 在庫不足・在庫ゼロ・日付逆転・入力不正
/// * `404 Not Found` - 対象資材なし
/// * `500 Internal Server Error` - サーバーエラー
pub async fn remove_material(
    State(state): State<AppState>,
    payload: Result<Json<RemoveMaterialRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;
    let request = payload.parse()?;
    tracing::info!(
        id = request.id,
        name = ?request.name,
        "Received request to remove material"
    );

    state.engine.remove_material(request).await?;

    Ok(MessageResponse::new("Material updated successfully"))
}

/// GET /api/getRecentEntries - 最近のエントリ一覧
///
/// # Returns
/// * `200 OK` - `{ "entries": [...] }`
/// * `500 Internal Server Error` - サーバーエラー
pub async fn get_recent_entries(State(state): State<AppState>) -> Response {
    match state.engine.recent_entries().await {
        Ok(entries) => Json(RecentEntriesResponse { entries }).into_response(),
        Err(e) => {
            tracing::error!("Error fetching recent entries: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error fetching recent entries" })),
            )
                .into_response()
        }
    }
}
