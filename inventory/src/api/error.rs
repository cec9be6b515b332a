//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::common::error::InventoryError;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub InventoryError);

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        AppError(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(InventoryError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 内部詳細はログにのみ出し、クライアントには external_message() を返す
        if self.0.is_client_error() {
            tracing::debug!("Rejected request: {}", self.0);
        } else {
            tracing::error!("Error processing request: {}", self.0);
        }

        let payload = json!({
            "message": self.0.external_message()
        });

        (self.0.status_code(), Json(payload)).into_response()
    }
}
