//! 整合性・検証ルール（純粋関数）
//!
//! ストアの現在状態と入力だけから受理/拒否を決める。I/Oは行わない。

use chrono::{DateTime, Utc};

use crate::common::error::{ConflictKind, ValidationKind};
use crate::common::types::MaterialRecord;

/// 追加時の識別子整合性チェック
///
/// * `by_id` - 入力IDで見つかった行
/// * `by_name` - 入力名で見つかった行
///
/// ID側の不一致を先に判定する。
pub fn reconcile_identity(
    by_id: Option<&MaterialRecord>,
    by_name: Option<&MaterialRecord>,
    id: i64,
    name: &str,
) -> Result<(), ConflictKind> {
    if let Some(existing) = by_id {
        if existing.name != name {
            return Err(ConflictKind::IdNameMismatch);
        }
    }
    if let Some(existing) = by_name {
        if existing.id != id {
            return Err(ConflictKind::NameIdMismatch);
        }
    }
    Ok(())
}

/// 払出しの検証
///
/// 判定順（最初に失敗したものを返す）:
/// 1. 在庫数 < 要求数
/// 2. 在庫数 == 0
/// 3. 払出し日付 < 登録日付
///
/// 在庫数 == 要求数、払出し日付 == 登録日付は許可する。
pub fn check_removal(
    existing_count: i64,
    requested: i64,
    add_date: &DateTime<Utc>,
    remove_date: &DateTime<Utc>,
) -> Result<(), ValidationKind> {
    if existing_count < requested {
        return Err(ValidationKind::InsufficientQuantity);
    }
    if existing_count == 0 {
        return Err(ValidationKind::ZeroQuantity);
    }
    if remove_date < add_date {
        return Err(ValidationKind::TemporalInversion);
    }
    Ok(())
}
