//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;

/// 在庫テーブル
pub mod inventory;

/// 監査ログテーブル
pub mod log_entries;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

/// 接続プールを作成する
///
/// SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく。
pub async fn create_pool(database_url: &str) -> sqlx::Result<SqlitePool> {
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        // `sqlite::memory:` のような特殊指定はスキップ
        if !path.starts_with(':') {
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            let db_path = std::path::Path::new(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePool::connect_with(connect_options).await
}

/// 埋め込みマイグレーションを実行する
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
