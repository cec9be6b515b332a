//! 監査ログシステム
//!
//! 受理された在庫変更ごとに1行を追記する。書き込みはベストエフォートで、
//! 失敗してもリクエストは失敗させない。

/// 監査ログの型定義
pub mod types;

/// 出力先trait・DBテーブル出力先
pub mod sink;

/// フラットファイル出力先
pub mod file;

/// 非同期ライター
pub mod writer;
