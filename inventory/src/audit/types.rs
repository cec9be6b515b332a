//! 監査ログの型定義

use chrono::{DateTime, Utc};

use crate::common::types::LogRecord;

/// 受理された在庫変更の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// 新規行として追加
    Added,
    /// 既存行の在庫数に加算
    Accumulated,
    /// 払出し
    Removed,
}

impl MutationKind {
    /// ログ文言
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Accumulated => "updated by",
            Self::Removed => "removed",
        }
    }
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 監査ログエントリ本文を組み立てる
///
/// 形式: `[<書き込み時刻>] Material ID <id> (<name>) count <kind>: <count>.`
pub fn format_entry(
    written_at: &DateTime<Utc>,
    id: i64,
    name: &str,
    kind: MutationKind,
    count: i64,
) -> String {
    format!(
        "[{}] Material ID {} ({}) count {}: {}.",
        written_at.to_rfc2822(),
        id,
        name,
        kind,
        count
    )
}

/// 現在時刻で監査ログレコードを作成
pub fn mutation_record(id: i64, name: &str, kind: MutationKind, count: i64) -> LogRecord {
    let now = Utc::now();
    LogRecord {
        date: now,
        entry: format_entry(&now, id, name, kind, count),
    }
}
