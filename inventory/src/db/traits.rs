//! Repository traitパターン定義
//!
//! DB操作を抽象化し、テスタビリティを向上させるためのtrait。
//! 各メソッドは `db::inventory` のフリー関数に対応する。

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::common::error::InventoryResult;
use crate::common::types::{MaterialRecord, NewMaterial};

// ---------------------------------------------------------------------------
// InventoryRepository
// ---------------------------------------------------------------------------

/// 在庫ストア操作のRepository trait
///
/// 検索は常に「最初に登録された1行」を返す。更新は行キー単位のアトミック操作のみ。
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// IDで検索
    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<MaterialRecord>>;
    /// 名前で検索
    async fn find_by_name(&self, name: &str) -> InventoryResult<Option<MaterialRecord>>;
    /// IDと名前の組で検索
    async fn find_by_id_and_name(
        &self,
        id: i64,
        name: &str,
    ) -> InventoryResult<Option<MaterialRecord>>;
    /// 行キーで取得
    async fn get_material(&self, row_id: i64) -> InventoryResult<Option<MaterialRecord>>;
    /// 新規挿入
    async fn insert_material(&self, material: &NewMaterial) -> InventoryResult<MaterialRecord>;
    /// 在庫数を加算（負値で減算）
    async fn increment_count(&self, row_id: i64, delta: i64) -> InventoryResult<bool>;
    /// 在庫数が足りる場合のみ減算
    async fn decrement_count_if_sufficient(&self, row_id: i64, amount: i64)
        -> InventoryResult<bool>;
    /// 日付の新しい順に取得
    async fn list_recent(&self, limit: i64) -> InventoryResult<Vec<MaterialRecord>>;
}

// ===========================================================================
// SqlitePool implementations
// ===========================================================================

#[async_trait]
impl InventoryRepository for SqlitePool {
    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<MaterialRecord>> {
        super::inventory::find_first_by_id(self, id).await
    }

    async fn find_by_name(&self, name: &str) -> InventoryResult<Option<MaterialRecord>> {
        super::inventory::find_first_by_name(self, name).await
    }

    async fn find_by_id_and_name(
        &self,
        id: i64,
        name: &str,
    ) -> InventoryResult<Option<MaterialRecord>> {
        super::inventory::find_first_by_id_and_name(self, id, name).await
    }

    async fn get_material(&self, row_id: i64) -> InventoryResult<Option<MaterialRecord>> {
        super::inventory::get(self, row_id).await
    }

    async fn insert_material(&self, material: &NewMaterial) -> InventoryResult<MaterialRecord> {
        super::inventory::insert(self, material).await
    }

    async fn increment_count(&self, row_id: i64, delta: i64) -> InventoryResult<bool> {
        super::inventory::increment_count(self, row_id, delta).await
    }

    async fn decrement_count_if_sufficient(
        &self,
        row_id: i64,
        amount: i64,
    ) -> InventoryResult<bool> {
        super::inventory::decrement_count_if_sufficient(self, row_id, amount).await
    }

    async fn list_recent(&self, limit: i64) -> InventoryResult<Vec<MaterialRecord>> {
        super::inventory::list_recent(self, limit).await
    }
}

// ===========================================================================
// Tests
// ===========================================================================
