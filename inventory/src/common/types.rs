//! 共通型定義
//!
//! 資材レコード、監査ログレコード、ワイヤ表現の数値・日付パース

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::error::{InventoryError, InventoryResult};

/// 在庫資材レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// ストレージ上の行キー（論理IDとは別）
    pub row_id: i64,
    /// 論理識別子（ストレージ層では一意ではない）
    pub id: i64,
    /// 資材名
    pub name: String,
    /// 在庫数（負にならない）
    pub count: i64,
    /// 現在の在庫数が確定した日時
    pub date: DateTime<Utc>,
}

/// 新規挿入する資材
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaterial {
    /// 論理識別子
    pub id: i64,
    /// 資材名
    pub name: String,
    /// 在庫数
    pub count: i64,
    /// 登録日時
    pub date: DateTime<Utc>,
}

/// 監査ログレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// イベント日時（書き込み時刻）
    pub date: DateTime<Utc>,
    /// 変更内容
    pub entry: String,
}

impl LogRecord {
    /// 現在時刻でレコードを作成
    pub fn now(entry: impl Into<String>) -> Self {
        Self {
            date: Utc::now(),
            entry: entry.into(),
        }
    }
}

/// JSON上の整数フィールド
///
/// 数値と文字列のどちらでも受け付け、10進整数として解釈する。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireInt {
    /// JSON number
    Number(serde_json::Number),
    /// JSON string
    Text(String),
}

impl WireInt {
    /// 10進整数としてパースする
    ///
    /// 小数・空文字・非数値はクライアントエラーとする（0へ丸めない）。
    pub fn parse(&self, field: &str) -> InventoryResult<i64> {
        let parsed = match self {
            Self::Number(number) => number.as_i64(),
            Self::Text(text) => text.trim().parse::<i64>().ok(),
        };
        parsed.ok_or_else(|| {
            InventoryError::InvalidInput(format!("Invalid {}: expected a base-10 integer", field))
        })
    }
}

impl From<i64> for WireInt {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// 保存できる年の範囲（ストレージ表現が4桁の年で辞書順に並ぶ範囲）
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// ワイヤ表現の日付をパースする
///
/// 受け付ける形式:
/// * RFC 3339 (`2024-01-05T10:00:00Z`, `2024-01-05T10:00:00+09:00`)
/// * オフセットなし日時 (`2024-01-05T10:00:00`, `2024-01-05T10:00`) はUTCとみなす
/// * 日付のみ (`2024-01-05`) はUTCの0時とみなす
///
/// UTCに変換した結果の年が 0000〜9999 の外なら拒否する。
pub fn parse_wire_date(raw: &str) -> InventoryResult<DateTime<Utc>> {
    let raw = raw.trim();
    let parsed = parse_any_wire_format(raw)
        .ok_or_else(|| InventoryError::InvalidInput(format!("Invalid date: '{}'", raw)))?;
    if !STORABLE_YEARS.contains(&parsed.year()) {
        return Err(InventoryError::InvalidInput(format!(
            "Invalid date: '{}' (year must be between 0000 and 9999)",
            raw
        )));
    }
    Ok(parsed)
}

fn parse_any_wire_format(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// ストレージ用の日付表現（辞書順＝時系列順）
pub fn to_storage_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ストレージ表現から日付を復元
pub fn from_storage_date(raw: &str) -> InventoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| InventoryError::Database(format!("Invalid stored date '{}': {}", raw, e)))
}

/// `DD/MM/YYYY` 形式の表示用日付
pub fn format_day_month_year(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}
