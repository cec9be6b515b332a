//! 在庫整合性・検証エンジン
//!
//! ハンドラーから受け取った入力をストアの現在状態と突き合わせ、
//! 受理した変更だけをアトミックに確定して監査ログへ流す。
//!
//! 検索→確定は2回の独立したストア呼び出しであり、その間の競合は防がない
//! （楽観的チェック＋アトミック確定）。払出しは [`RemoveCommit::Guarded`] のとき
//! `count >= 要求数` を条件にした単一の更新で確定するため、負の在庫にはならない。

pub mod policy;
pub mod rules;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::audit::types::{mutation_record, MutationKind};
use crate::audit::writer::AuditLogWriter;
use crate::common::error::{InventoryError, InventoryResult, ValidationKind};
use crate::common::types::{format_day_month_year, to_storage_date, MaterialRecord, NewMaterial};
use crate::db::traits::InventoryRepository;

pub use policy::{
    AddPolicy, DateDisplay, EnginePolicy, IdentityPolicy, PolicyProfile, RemoveCommit, RemoveKey,
};

/// 最近のエントリ一覧の最大件数
pub const RECENT_ENTRIES_LIMIT: i64 = 5;

/// 追加リクエスト（パース済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    /// 論理識別子
    pub id: i64,
    /// 資材名
    pub name: String,
    /// 追加数
    pub count: i64,
    /// 登録日時
    pub date: DateTime<Utc>,
}

/// 払出しリクエスト（パース済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveRequest {
    /// 論理識別子
    pub id: i64,
    /// 資材名（`RemoveKey::IdAndName` のとき必須）
    pub name: Option<String>,
    /// 払出し数
    pub count: i64,
    /// 払出し日時
    pub date: DateTime<Utc>,
}

/// 追加結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// 新しい行を挿入した
    Inserted(MaterialRecord),
    /// 既存行の在庫数に加算した
    Accumulated {
        /// 加算前の行
        previous: MaterialRecord,
        /// 加算数
        added: i64,
    },
}

/// 払出し結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// 検証時点の行
    pub record: MaterialRecord,
    /// 払出し数
    pub removed: i64,
    /// 検証時点の在庫数から算出した残数
    pub remaining: i64,
}

/// 最近のエントリ一覧の1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentEntry {
    /// 論理識別子
    pub id: i64,
    /// 資材名
    pub name: String,
    /// 在庫数
    pub count: i64,
    /// 表示用日付
    pub date: String,
}

/// 在庫エンジン
#[derive(Clone)]
pub struct InventoryEngine {
    store: Arc<dyn InventoryRepository>,
    audit: AuditLogWriter,
    policy: EnginePolicy,
}

impl InventoryEngine {
    /// ストア・監査ライター・ポリシーを明示的に受け取って構築する
    pub fn new(
        store: Arc<dyn InventoryRepository>,
        audit: AuditLogWriter,
        policy: EnginePolicy,
    ) -> Self {
        Self {
            store,
            audit,
            policy,
        }
    }

    /// 現在のポリシー
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// 監査ライター
    pub fn audit_writer(&self) -> &AuditLogWriter {
        &self.audit
    }

    /// 識別子を照合して資材を追加する
    pub async fn add_material(&self, request: AddRequest) -> InventoryResult<AddOutcome> {
        validate_name(&request.name)?;
        validate_count(request.count)?;

        let by_id = self.store.find_by_id(request.id).await?;

        if self.policy.identity == IdentityPolicy::Strict {
            let by_name = self.store.find_by_name(&request.name).await?;
            if let Err(kind) = rules::reconcile_identity(
                by_id.as_ref(),
                by_name.as_ref(),
                request.id,
                &request.name,
            ) {
                warn!(
                    id = request.id,
                    name = %request.name,
                    reason = kind.message(),
                    "Add rejected"
                );
                return Err(InventoryError::Conflict(kind));
            }
        }

        if let (AddPolicy::MergeAccumulate, Some(existing)) = (self.policy.add, by_id) {
            if existing.count.checked_add(request.count).is_none() {
                return Err(count_overflow(request.id, existing.count, request.count));
            }
            if self
                .store
                .increment_count(existing.row_id, request.count)
                .await?
            {
                info!(
                    id = request.id,
                    added = request.count,
                    "1 document updated"
                );
                self.audit.send(mutation_record(
                    request.id,
                    &request.name,
                    MutationKind::Accumulated,
                    request.count,
                ));
                return Ok(AddOutcome::Accumulated {
                    previous: existing,
                    added: request.count,
                });
            }
            // 更新されなかった: 行が消えたか、並行する加算で範囲を超える状態になった
            if let Some(current) = self.store.get_material(existing.row_id).await? {
                return Err(count_overflow(request.id, current.count, request.count));
            }
            warn!(
                id = request.id,
                row_id = existing.row_id,
                "Matched row vanished before update; inserting instead"
            );
        }

        let record = self
            .store
            .insert_material(&NewMaterial {
                id: request.id,
                name: request.name.clone(),
                count: request.count,
                date: request.date,
            })
            .await?;
        info!(id = record.id, name = %record.name, "1 document inserted");
        self.audit.send(mutation_record(
            record.id,
            &record.name,
            MutationKind::Added,
            record.count,
        ));

        Ok(AddOutcome::Inserted(record))
    }

    /// 数量・日付を検証して資材を払い出す
    pub async fn remove_material(&self, request: RemoveRequest) -> InventoryResult<RemoveOutcome> {
        validate_count(request.count)?;

        let found = match self.policy.remove_key {
            RemoveKey::IdAndName => {
                let name = request
                    .name
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
                    .ok_or_else(|| InventoryError::InvalidInput("Invalid name: required".into()))?;
                self.store.find_by_id_and_name(request.id, name).await?
            }
            RemoveKey::IdOnly => self.store.find_by_id(request.id).await?,
        };

        let Some(record) = found else {
            warn!(
                id = request.id,
                name = ?request.name,
                "Material with the given id and name not found"
            );
            return Err(InventoryError::NotFound);
        };

        if let Err(kind) =
            rules::check_removal(record.count, request.count, &record.date, &request.date)
        {
            warn!(
                id = record.id,
                existing = record.count,
                requested = request.count,
                reason = kind.message(),
                "Remove rejected"
            );
            return Err(InventoryError::Validation(kind));
        }

        let committed = match self.policy.remove_commit {
            RemoveCommit::Guarded => {
                self.store
                    .decrement_count_if_sufficient(record.row_id, request.count)
                    .await?
            }
            RemoveCommit::Unguarded => {
                self.store
                    .increment_count(record.row_id, -request.count)
                    .await?
            }
        };
        if !committed {
            warn!(
                id = record.id,
                requested = request.count,
                "Count changed between check and commit"
            );
            return Err(InventoryError::Validation(ValidationKind::InsufficientQuantity));
        }

        info!(id = record.id, removed = request.count, "1 document updated");
        self.audit.send(mutation_record(
            record.id,
            &record.name,
            MutationKind::Removed,
            request.count,
        ));

        let remaining = record.count - request.count;
        Ok(RemoveOutcome {
            record,
            removed: request.count,
            remaining,
        })
    }

    /// 日付の新しい順に最大5件を返す
    pub async fn recent_entries(&self) -> InventoryResult<Vec<RecentEntry>> {
        let records = self.store.list_recent(RECENT_ENTRIES_LIMIT).await?;
        Ok(records
            .into_iter()
            .map(|record| RecentEntry {
                date: match self.policy.date_display {
                    DateDisplay::DayMonthYear => format_day_month_year(&record.date),
                    DateDisplay::Raw => to_storage_date(&record.date),
                },
                id: record.id,
                name: record.name,
                count: record.count,
            })
            .collect())
    }
}

fn validate_name(name: &str) -> InventoryResult<()> {
    if name.trim().is_empty() {
        return Err(InventoryError::InvalidInput("Invalid name: required".into()));
    }
    Ok(())
}

fn count_overflow(id: i64, existing: i64, added: i64) -> InventoryError {
    warn!(id, existing, added, "Add rejected: resulting count out of range");
    InventoryError::InvalidInput("Invalid count: resulting count is out of range".into())
}

fn validate_count(count: i64) -> InventoryResult<()> {
    if count < 0 {
        return Err(InventoryError::InvalidInput(
            "Invalid count: must not be negative".into(),
        ));
    }
    Ok(())
}
