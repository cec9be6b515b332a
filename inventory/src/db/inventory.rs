//! 在庫テーブルのストレージ層
//!
//! 更新系はすべて単一行に対するアトミックなSQL文で行う。
//! ドキュメント全体の読み出し→書き戻しは行わない。

use crate::common::error::{InventoryError, InventoryResult};
use crate::common::types::{from_storage_date, to_storage_date, MaterialRecord, NewMaterial};
use sqlx::SqlitePool;

/// sqlx::FromRow用の行構造体
#[derive(Debug, sqlx::FromRow)]
struct MaterialRow {
    row_id: i64,
    id: i64,
    name: String,
    count: i64,
    date: String,
}

impl MaterialRow {
    fn into_record(self) -> InventoryResult<MaterialRecord> {
        Ok(MaterialRecord {
            row_id: self.row_id,
            id: self.id,
            name: self.name,
            count: self.count,
            date: from_storage_date(&self.date)?,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT row_id, id, name, count, date FROM inventory";

/// IDで最初に登録された資材を検索
pub async fn find_first_by_id(pool: &SqlitePool, id: i64) -> InventoryResult<Option<MaterialRecord>> {
    let row = sqlx::query_as::<_, MaterialRow>(&format!(
        "{} WHERE id = ? ORDER BY row_id ASC LIMIT 1",
        SELECT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| InventoryError::Database(format!("Failed to find material by id: {}", e)))?;

    row.map(MaterialRow::into_record).transpose()
}

/// 名前で最初に登録された資材を検索
pub async fn find_first_by_name(
    pool: &SqlitePool,
    name: &str,
) -> InventoryResult<Option<MaterialRecord>> {
    let row = sqlx::query_as::<_, MaterialRow>(&format!(
        "{} WHERE name = ? ORDER BY row_id ASC LIMIT 1",
        SELECT_COLUMNS
    ))
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(|e| InventoryError::Database(format!("Failed to find material by name: {}", e)))?;

    row.map(MaterialRow::into_record).transpose()
}

/// IDと名前の組で最初に登録された資材を検索
pub async fn find_first_by_id_and_name(
    pool: &SqlitePool,
    id: i64,
    name: &str,
) -> InventoryResult<Option<MaterialRecord>> {
    let row = sqlx::query_as::<_, MaterialRow>(&format!(
        "{} WHERE id = ? AND name = ? ORDER BY row_id ASC LIMIT 1",
        SELECT_COLUMNS
    ))
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(|e| InventoryError::Database(format!("Failed to find material: {}", e)))?;

    row.map(MaterialRow::into_record).transpose()
}

/// 資材を新規挿入
pub async fn insert(pool: &SqlitePool, material: &NewMaterial) -> InventoryResult<MaterialRecord> {
    let result = sqlx::query("INSERT INTO inventory (id, name, count, date) VALUES (?, ?, ?, ?)")
        .bind(material.id)
        .bind(&material.name)
        .bind(material.count)
        .bind(to_storage_date(&material.date))
        .execute(pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to insert material: {}", e)))?;

    Ok(MaterialRecord {
        row_id: result.last_insert_rowid(),
        id: material.id,
        name: material.name.clone(),
        count: material.count,
        date: material.date,
    })
}

/// 在庫数をアトミックに加算（負の値で減算）
///
/// 結果が `i64` の範囲を外れる更新は行わない（SQLiteは整数のオーバーフローを
/// REALに変換するため、条件側で範囲を検査する）。
///
/// # Returns
/// * `Ok(true)` - 更新された
/// * `Ok(false)` - 対象行が存在しない、または結果が範囲外
pub async fn increment_count(pool: &SqlitePool, row_id: i64, delta: i64) -> InventoryResult<bool> {
    let result = sqlx::query(
        "UPDATE inventory SET count = count + ?1 \
         WHERE row_id = ?2 \
           AND (?1 <= 0 OR count <= ?3 - ?1) \
           AND (?1 >= 0 OR count >= ?4 - ?1)",
    )
    .bind(delta)
    .bind(row_id)
    .bind(i64::MAX)
    .bind(i64::MIN)
    .execute(pool)
    .await
    .map_err(|e| InventoryError::Database(format!("Failed to update count: {}", e)))?;

    Ok(result.rows_affected() > 0)
}

/// 在庫数が足りる場合のみアトミックに減算
///
/// # Returns
/// * `Ok(true)` - 減算された
/// * `Ok(false)` - 在庫不足、または対象行が存在しない
pub async fn decrement_count_if_sufficient(
    pool: &SqlitePool,
    row_id: i64,
    amount: i64,
) -> InventoryResult<bool> {
    let result =
        sqlx::query("UPDATE inventory SET count = count - ?1 WHERE row_id = ?2 AND count >= ?1")
            .bind(amount)
            .bind(row_id)
            .execute(pool)
            .await
            .map_err(|e| InventoryError::Database(format!("Failed to decrement count: {}", e)))?;

    Ok(result.rows_affected() > 0)
}

/// 行キーで資材を取得
pub async fn get(pool: &SqlitePool, row_id: i64) -> InventoryResult<Option<MaterialRecord>> {
    let row = sqlx::query_as::<_, MaterialRow>(&format!("{} WHERE row_id = ?", SELECT_COLUMNS))
        .bind(row_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get material: {}", e)))?;

    row.map(MaterialRow::into_record).transpose()
}

/// 日付の新しい順に資材を取得
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> InventoryResult<Vec<MaterialRecord>> {
    let rows = sqlx::query_as::<_, MaterialRow>(&format!(
        "{} ORDER BY date DESC, row_id DESC LIMIT ?",
        SELECT_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| InventoryError::Database(format!("Failed to list recent materials: {}", e)))?;

    rows.into_iter().map(MaterialRow::into_record).collect()
}
