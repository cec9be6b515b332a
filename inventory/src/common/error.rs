//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `InventoryError`は`status_code()`と`external_message()`を提供し、
//! クライアントへ返すHTTPステータスと安全なメッセージを決定します。

use std::borrow::Cow;

use axum::http::StatusCode;
use thiserror::Error;

/// 識別子の整合性違反の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// 同じIDで別名の資材が存在する
    IdNameMismatch,
    /// 同じ名前で別IDの資材が存在する
    NameIdMismatch,
}

impl ConflictKind {
    /// クライアント向けメッセージ
    pub fn message(&self) -> &'static str {
        match self {
            Self::IdNameMismatch => "Material with the same id but different name exists",
            Self::NameIdMismatch => "Material with the same name but different id exists",
        }
    }
}

/// 払出し時の検証違反の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// 在庫数が要求数より少ない
    InsufficientQuantity,
    /// 在庫数がゼロ
    ZeroQuantity,
    /// 払出し日付が登録日付より前
    TemporalInversion,
}

impl ValidationKind {
    /// クライアント向けメッセージ
    pub fn message(&self) -> &'static str {
        match self {
            Self::InsufficientQuantity => "Existing count is less than the requested count",
            Self::ZeroQuantity => "Existing count is zero",
            Self::TemporalInversion => "Remove date is before add date",
        }
    }
}

/// Inventory service error type
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Identity conflict on add
    #[error("Conflict: {}", .0.message())]
    Conflict(ConflictKind),

    /// Remove target does not exist
    #[error("Material not found")]
    NotFound,

    /// Business rule violation on remove
    #[error("Validation error: {}", .0.message())]
    Validation(ValidationKind),

    /// Malformed client input (non-numeric id, unparsable date, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Audit sink error
    #[error("Audit sink error: {0}")]
    AuditSink(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InventoryError {
    /// Returns a safe error message for external clients.
    ///
    /// Infrastructure errors collapse to a generic message; the full detail
    /// is only available through `Display` and belongs in server logs.
    pub fn external_message(&self) -> Cow<'static, str> {
        match self {
            Self::Conflict(kind) => Cow::Borrowed(kind.message()),
            Self::NotFound => Cow::Borrowed("Material not found"),
            Self::Validation(kind) => Cow::Borrowed(kind.message()),
            Self::InvalidInput(detail) => Cow::Owned(detail.clone()),
            Self::Database(_) | Self::AuditSink(_) | Self::Internal(_) => {
                Cow::Borrowed("Error processing request")
            }
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AuditSink(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// クライアント起因のエラーかどうか
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<sqlx::Error> for InventoryError {
    fn from(err: sqlx::Error) -> Self {
        InventoryError::Database(err.to_string())
    }
}

/// Result type alias
pub type InventoryResult<T> = Result<T, InventoryError>;
