//! フラットファイルへの監査ログ出力

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::sink::AuditSink;
use crate::common::error::{InventoryError, InventoryResult};
use crate::common::types::LogRecord;

/// 1エントリ1行で追記するテキストファイル出力先
#[derive(Debug, Clone)]
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    /// 新しい出力先を作成（ファイルは初回書き込み時に作成）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 出力先ファイルのパス
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn append(&self, record: &LogRecord) -> InventoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    InventoryError::AuditSink(format!(
                        "Failed to create log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                InventoryError::AuditSink(format!(
                    "Failed to open log file {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        let line = format!("{}\n", record.entry);
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| InventoryError::AuditSink(format!("Failed to write log file: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| InventoryError::AuditSink(format!("Failed to flush log file: {}", e)))?;

        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
