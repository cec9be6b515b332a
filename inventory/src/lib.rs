//! Inventory backend
//!
//! 資材の在庫台帳を管理するRESTサーバー。追加・払出しを識別子の整合性と
//! 在庫数・日付の検証にかけ、受理した変更を監査ログに残す。

#![warn(missing_docs)]

/// 共通型定義（レコード型・エラー型）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 監査ログシステム
pub mod audit;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// 在庫整合性・検証エンジン
pub mod engine;

/// ロギング初期化ユーティリティ
pub mod logging;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::audit::sink::AuditSinkKind;
use crate::audit::writer::{AuditLogWriter, AuditLogWriterConfig};
use crate::engine::{EnginePolicy, InventoryEngine};

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 在庫エンジン
    pub engine: InventoryEngine,
}

impl AppState {
    /// プール・監査出力先・ポリシーから状態を組み立てる
    ///
    /// 監査ライターのバックグラウンドタスクを起動するため、tokioランタイム上で呼び出すこと。
    pub fn new(pool: SqlitePool, audit_sink: &AuditSinkKind, policy: EnginePolicy) -> Self {
        let sink = audit_sink.build(&pool);
        let audit = AuditLogWriter::new(sink, AuditLogWriterConfig::default());
        let engine = InventoryEngine::new(Arc::new(pool), audit, policy);
        Self { engine }
    }
}
