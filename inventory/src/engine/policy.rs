//! エンジンのポリシー設定
//!
//! 2系統の既存実装（ドキュメントストア系・ネイティブドライバ系）の挙動差を
//! 個別の設定値として表現する。

use std::str::FromStr;

use crate::common::error::InventoryError;

/// 追加時の識別子整合性チェック
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityPolicy {
    /// ID→名前、名前→IDの双方向で一致を要求
    Strict,
    /// IDのみをキーとし、名前は検査しない
    IdOnly,
}

/// 同一IDが既に存在する場合の追加動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPolicy {
    /// 常に新しい行を挿入（同一ID・同一名の重複行を許容）
    InsertAlways,
    /// 既存行の在庫数に加算
    MergeAccumulate,
}

/// 払出し対象の検索キー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveKey {
    /// IDと名前の両方が一致する行
    IdAndName,
    /// IDのみ（名前は見つかった行から読み戻す）
    IdOnly,
}

/// 払出しの確定方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveCommit {
    /// `count >= 要求数` を条件にした単一のアトミック減算
    Guarded,
    /// 無条件のアトミック減算（検査と減算の間に競合の余地が残る）
    Unguarded,
}

/// 最近のエントリ一覧での日付表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateDisplay {
    /// `DD/MM/YYYY`
    DayMonthYear,
    /// 保存値そのまま（RFC 3339）
    Raw,
}

/// エンジンのポリシー一式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnginePolicy {
    /// 追加時の識別子チェック
    pub identity: IdentityPolicy,
    /// 追加動作
    pub add: AddPolicy,
    /// 払出しキー
    pub remove_key: RemoveKey,
    /// 払出し確定方法
    pub remove_commit: RemoveCommit,
    /// 日付表示
    pub date_display: DateDisplay,
}

impl EnginePolicy {
    /// ドキュメントストア（ODM）系の挙動
    pub fn document_store() -> Self {
        Self {
            identity: IdentityPolicy::Strict,
            add: AddPolicy::InsertAlways,
            remove_key: RemoveKey::IdAndName,
            remove_commit: RemoveCommit::Guarded,
            date_display: DateDisplay::DayMonthYear,
        }
    }

    /// ネイティブドライバ系の挙動
    pub fn native_driver() -> Self {
        Self {
            identity: IdentityPolicy::IdOnly,
            add: AddPolicy::MergeAccumulate,
            remove_key: RemoveKey::IdOnly,
            remove_commit: RemoveCommit::Guarded,
            date_display: DateDisplay::Raw,
        }
    }
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self::document_store()
    }
}

/// ポリシープリセット名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyProfile {
    /// [`EnginePolicy::document_store`]
    DocumentStore,
    /// [`EnginePolicy::native_driver`]
    NativeDriver,
}

impl PolicyProfile {
    /// プリセットのポリシー
    pub fn policy(&self) -> EnginePolicy {
        match self {
            Self::DocumentStore => EnginePolicy::document_store(),
            Self::NativeDriver => EnginePolicy::native_driver(),
        }
    }
}

fn invalid(kind: &str, value: &str) -> InventoryError {
    InventoryError::InvalidInput(format!("Unknown {} '{}'", kind, value))
}

impl FromStr for PolicyProfile {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document-store" | "document_store" | "odm" => Ok(Self::DocumentStore),
            "native-driver" | "native_driver" | "native" => Ok(Self::NativeDriver),
            other => Err(invalid("profile", other)),
        }
    }
}

impl FromStr for IdentityPolicy {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "id-only" | "id_only" => Ok(Self::IdOnly),
            other => Err(invalid("identity policy", other)),
        }
    }
}

impl FromStr for AddPolicy {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insert-always" | "insert_always" | "insert" => Ok(Self::InsertAlways),
            "merge-accumulate" | "merge_accumulate" | "merge" => Ok(Self::MergeAccumulate),
            other => Err(invalid("add policy", other)),
        }
    }
}

impl FromStr for RemoveKey {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id-and-name" | "id_and_name" => Ok(Self::IdAndName),
            "id-only" | "id_only" => Ok(Self::IdOnly),
            other => Err(invalid("remove key", other)),
        }
    }
}

impl FromStr for RemoveCommit {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guarded" => Ok(Self::Guarded),
            "unguarded" => Ok(Self::Unguarded),
            other => Err(invalid("remove commit", other)),
        }
    }
}

impl FromStr for DateDisplay {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day-month-year" | "dd/mm/yyyy" => Ok(Self::DayMonthYear),
            "raw" => Ok(Self::Raw),
            other => Err(invalid("date display", other)),
        }
    }
}
