//! Property-based tests using proptest

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use inventory::common::error::{ConflictKind, ValidationKind};
use inventory::common::types::{
    format_day_month_year, from_storage_date, parse_wire_date, to_storage_date, MaterialRecord,
    WireInt,
};
use inventory::engine::rules::{check_removal, reconcile_identity};

fn record(id: i64, name: &str) -> MaterialRecord {
    MaterialRecord {
        row_id: 1,
        id,
        name: name.to_string(),
        count: 1,
        date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// check_removal
// ---------------------------------------------------------------------------

proptest! {
    /// 要求数が在庫を超えると常に在庫不足
    #[test]
    fn removal_over_stock_is_insufficient(
        existing in 0i64..10_000,
        extra in 1i64..10_000,
        offset_days in -365i64..365,
    ) {
        let add = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let remove = add + Duration::days(offset_days);
        prop_assert_eq!(
            check_removal(existing, existing + extra, &add, &remove),
            Err(ValidationKind::InsufficientQuantity)
        );
    }

    /// 在庫ゼロは要求数ゼロでも拒否
    #[test]
    fn removal_from_zero_stock_is_rejected(offset_days in 0i64..365) {
        let add = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let remove = add + Duration::days(offset_days);
        prop_assert_eq!(
            check_removal(0, 0, &add, &remove),
            Err(ValidationKind::ZeroQuantity)
        );
    }

    /// 在庫が足りていても登録日より前なら拒否
    #[test]
    fn removal_before_add_date_is_rejected(
        existing in 1i64..10_000,
        seconds_before in 1i64..10_000_000,
    ) {
        let add = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let remove = add - Duration::seconds(seconds_before);
        prop_assert_eq!(
            check_removal(existing, existing, &add, &remove),
            Err(ValidationKind::TemporalInversion)
        );
    }

    /// 在庫内・登録日以降なら受理（同日・全量も含む）
    #[test]
    fn removal_within_stock_on_or_after_add_date_passes(
        existing in 1i64..10_000,
        fraction in 0.0f64..=1.0,
        seconds_after in 0i64..10_000_000,
    ) {
        let requested = ((existing as f64) * fraction).floor() as i64;
        let add = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let remove = add + Duration::seconds(seconds_after);
        prop_assert_eq!(check_removal(existing, requested, &add, &remove), Ok(()));
        prop_assert!(existing - requested >= 0);
    }
}

// ---------------------------------------------------------------------------
// reconcile_identity
// ---------------------------------------------------------------------------

proptest! {
    /// 同じIDで別名があれば常に衝突
    #[test]
    fn same_id_different_name_conflicts(
        id in 0i64..1_000_000,
        stored in "[A-Za-z]{1,12}",
        requested in "[A-Za-z]{1,12}",
    ) {
        prop_assume!(stored != requested);
        let existing = record(id, &stored);
        prop_assert_eq!(
            reconcile_identity(Some(&existing), None, id, &requested),
            Err(ConflictKind::IdNameMismatch)
        );
    }

    /// 同じ名前で別IDがあれば常に衝突
    #[test]
    fn same_name_different_id_conflicts(
        stored_id in 0i64..1_000_000,
        requested_id in 0i64..1_000_000,
        name in "[A-Za-z]{1,12}",
    ) {
        prop_assume!(stored_id != requested_id);
        let existing = record(stored_id, &name);
        prop_assert_eq!(
            reconcile_identity(None, Some(&existing), requested_id, &name),
            Err(ConflictKind::NameIdMismatch)
        );
    }

    /// 一致する既存行・未登録なら受理
    #[test]
    fn matching_or_fresh_identity_passes(id in 0i64..1_000_000, name in "[A-Za-z]{1,12}") {
        let existing = record(id, &name);
        prop_assert_eq!(
            reconcile_identity(Some(&existing), Some(&existing), id, &name),
            Ok(())
        );
        prop_assert_eq!(reconcile_identity(None, None, id, &name), Ok(()));
    }
}

// ---------------------------------------------------------------------------
// wire parsing
// ---------------------------------------------------------------------------

proptest! {
    /// 数値文字列は数値と同じ値になる
    #[test]
    fn wire_int_text_matches_number(value in any::<i64>()) {
        prop_assert_eq!(WireInt::Text(value.to_string()).parse("count").unwrap(), value);
        prop_assert_eq!(WireInt::from(value).parse("count").unwrap(), value);
    }

    /// 数字を含まない文字列はクライアントエラー
    #[test]
    fn wire_int_rejects_non_numeric(text in "[a-zA-Z ]{0,10}") {
        prop_assert!(WireInt::Text(text).parse("id").is_err());
    }

    /// 保存形式の辞書順は時系列順と一致する
    #[test]
    fn storage_date_order_matches_time_order(
        a in 0i64..4_000_000_000_000,
        b in 0i64..4_000_000_000_000,
    ) {
        let da = Utc.timestamp_millis_opt(a).unwrap();
        let db = Utc.timestamp_millis_opt(b).unwrap();
        prop_assert_eq!(to_storage_date(&da).cmp(&to_storage_date(&db)), da.cmp(&db));
        prop_assert_eq!(from_storage_date(&to_storage_date(&da)).unwrap(), da);
    }

    /// 日付のみの入力はUTC 0時として表示形式に変換される
    #[test]
    fn date_only_input_displays_as_day_month_year(
        year in 2000i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let parsed = parse_wire_date(&format!("{:04}-{:02}-{:02}", year, month, day)).unwrap();
        prop_assert_eq!(
            format_day_month_year(&parsed),
            format!("{:02}/{:02}/{:04}", day, month, year)
        );
    }

    /// 0000〜9999 の外の年は常に拒否し、範囲内の年は保存形式で読み戻せる
    #[test]
    fn wire_date_year_range_is_enforced(year in -20_000i32..20_000, month in 1u32..=12) {
        let raw = if (0..=9999).contains(&year) {
            format!("{:04}-{:02}-01", year, month)
        } else {
            format!("{:+05}-{:02}-01", year, month)
        };
        match parse_wire_date(&raw) {
            Ok(parsed) => {
                prop_assert!((0..=9999).contains(&year));
                prop_assert_eq!(from_storage_date(&to_storage_date(&parsed)).unwrap(), parsed);
            }
            Err(_) => prop_assert!(!(0..=9999).contains(&year)),
        }
    }
}
