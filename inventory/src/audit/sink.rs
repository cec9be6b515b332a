//! 監査ログの出力先
//!
//! DBテーブル（`log_entries`）とフラットファイルの2実装を持つ。

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::common::error::InventoryResult;
use crate::common::types::LogRecord;

/// 追記専用の監査ログ出力先
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// 1件追記する
    async fn append(&self, record: &LogRecord) -> InventoryResult<()>;
    /// ログ出力用の名称
    fn describe(&self) -> String;
}

/// `log_entries` テーブルへ書き込む出力先
#[derive(Clone)]
pub struct LogEntryTableSink {
    pool: SqlitePool,
}

impl LogEntryTableSink {
    /// 新しい出力先を作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for LogEntryTableSink {
    async fn append(&self, record: &LogRecord) -> InventoryResult<()> {
        crate::db::log_entries::insert(&self.pool, record).await
    }

    fn describe(&self) -> String {
        "database table log_entries".to_string()
    }
}

/// 監査ログ出力先の選択
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditSinkKind {
    /// DBテーブル
    Database,
    /// テキストファイル
    File(PathBuf),
}

impl AuditSinkKind {
    /// 設定値に対応する出力先を構築する
    pub fn build(&self, pool: &SqlitePool) -> std::sync::Arc<dyn AuditSink> {
        match self {
            Self::Database => std::sync::Arc::new(LogEntryTableSink::new(pool.clone())),
            Self::File(path) => std::sync::Arc::new(super::file::FileAuditSink::new(path.clone())),
        }
    }
}
