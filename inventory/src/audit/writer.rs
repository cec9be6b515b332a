//! 監査ログの非同期ライター
//!
//! mpscチャネルでエントリを受信し、バックグラウンドタスクが出力先へ順に書き込む。
//! 書き込み失敗は診断ログに出すだけで、呼び出し元のリクエストには影響しない。
//!
//! 送信はブロックしない。チャネル（`INVENTORY_AUDIT_BUFFER_CAPACITY`、デフォルト1024件）が
//! 満杯のときはエントリを破棄して警告ログを出すため、出力先が追いつかないほどの
//! 連続した変更では「受理1件につき監査ログ1行」が保証されない（ベストエフォート）。

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::sink::AuditSink;
use crate::common::types::LogRecord;

/// 監査ログライター設定
pub struct AuditLogWriterConfig {
    /// チャネル容量。デフォルト: 1024
    pub buffer_capacity: usize,
}

impl Default for AuditLogWriterConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: std::env::var("INVENTORY_AUDIT_BUFFER_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|capacity: &usize| *capacity > 0)
                .unwrap_or(1024),
        }
    }
}

enum WriterMessage {
    Entry(LogRecord),
    Flush(oneshot::Sender<()>),
}

/// 監査ログの非同期ライター
///
/// Clone可能（senderのクローン）。
#[derive(Clone)]
pub struct AuditLogWriter {
    sender: mpsc::Sender<WriterMessage>,
}

impl AuditLogWriter {
    /// 新しいAuditLogWriterを作成し、バックグラウンドタスクを起動
    ///
    /// tokioランタイム上で呼び出すこと。
    pub fn new(sink: Arc<dyn AuditSink>, config: AuditLogWriterConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.buffer_capacity);

        info!(sink = %sink.describe(), "Audit log writer started");
        tokio::spawn(Self::background_task(rx, sink));

        Self { sender: tx }
    }

    /// エントリを送信（ブロックしない）
    ///
    /// チャネルが満杯・停止済みの場合は警告ログを出して破棄する。
    pub fn send(&self, record: LogRecord) {
        if let Err(e) = self.sender.try_send(WriterMessage::Entry(record)) {
            let entry = match e {
                mpsc::error::TrySendError::Full(WriterMessage::Entry(r))
                | mpsc::error::TrySendError::Closed(WriterMessage::Entry(r)) => r.entry,
                _ => String::new(),
            };
            warn!(entry = %entry, "Failed to queue audit log entry; entry dropped");
        }
    }

    /// これまでに送信したエントリの処理完了を待つ
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.sender.send(WriterMessage::Flush(ack_tx)).await.is_err() {
            warn!("Audit log writer is not running; nothing to flush");
            return;
        }
        let _ = ack_rx.await;
    }

    /// バックグラウンド書き込みタスク
    async fn background_task(mut rx: mpsc::Receiver<WriterMessage>, sink: Arc<dyn AuditSink>) {
        while let Some(message) = rx.recv().await {
            match message {
                WriterMessage::Entry(record) => match sink.append(&record).await {
                    Ok(()) => debug!(entry = %record.entry, "Log entry added"),
                    Err(e) => warn!(
                        error = %e,
                        entry = %record.entry,
                        "Error adding log entry; entry lost"
                    ),
                },
                WriterMessage::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }
        info!("Audit log writer background task stopped");
    }
}
