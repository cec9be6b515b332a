//! 監査ログテーブルのストレージ層

use crate::common::error::{InventoryError, InventoryResult};
use crate::common::types::{from_storage_date, to_storage_date, LogRecord};
use sqlx::SqlitePool;

/// 監査ログを追記
pub async fn insert(pool: &SqlitePool, record: &LogRecord) -> InventoryResult<()> {
    sqlx::query("INSERT INTO log_entries (date, entry) VALUES (?, ?)")
        .bind(to_storage_date(&record.date))
        .bind(&record.entry)
        .execute(pool)
        .await
        .map_err(|e| InventoryError::AuditSink(format!("Failed to insert log entry: {}", e)))?;

    Ok(())
}

/// 監査ログを古い順に取得
pub async fn list(pool: &SqlitePool) -> InventoryResult<Vec<LogRecord>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT date, entry FROM log_entries ORDER BY row_id ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| InventoryError::Database(format!("Failed to list log entries: {}", e)))?;

    rows.into_iter()
        .map(|(date, entry)| {
            Ok(LogRecord {
                date: from_storage_date(&date)?,
                entry,
            })
        })
        .collect()
}
