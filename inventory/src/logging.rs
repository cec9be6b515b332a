//! ロギング初期化
//!
//! 標準出力（text/json）と、`INVENTORY_LOG_DIR` 指定時の日次ローテーションファイル出力。

use std::path::PathBuf;
use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名のプレフィックス
pub const LOG_FILE_PREFIX: &str = "inventory.log";

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 人間向けテキスト
    #[default]
    Text,
    /// 1行1JSON（ログ集約向け）
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown log format '{}'", other)),
        }
    }
}

/// ロギング設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `RUST_LOG` 未設定時のフィルタ
    pub level: String,
    /// 出力フォーマット
    pub format: LogFormat,
    /// ファイル出力先ディレクトリ（None なら標準出力のみ）
    pub dir: Option<PathBuf>,
}

impl LogConfig {
    /// 環境変数から読み込む
    ///
    /// - `INVENTORY_LOG_LEVEL`（デフォルト: `info`）
    /// - `INVENTORY_LOG_FORMAT`（`text` / `json`）
    /// - `INVENTORY_LOG_DIR`
    pub fn from_env() -> Self {
        let format = match std::env::var("INVENTORY_LOG_FORMAT") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                eprintln!("{}, falling back to text", e);
                LogFormat::Text
            }),
            Err(_) => LogFormat::Text,
        };

        Self {
            level: std::env::var("INVENTORY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format,
            dir: std::env::var("INVENTORY_LOG_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// 環境変数の設定でロギングを初期化
///
/// 戻り値のガードはプロセス終了まで保持すること（drop時にファイルバッファを書き出す）。
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    init_with(&LogConfig::from_env())
}

/// 指定設定でロギングを初期化。起動時に一度だけ呼ぶ。
pub fn init_with(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_writer, guard) = match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    // ファイル出力は標準出力の形式に関わらず常にJSON
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    let registry = tracing_subscriber::registry()
        .with(config.env_filter())
        .with(file_layer);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(true)
                    .with_ansi(false),
            )
            .try_init()?,
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init()?,
    }

    Ok(guard)
}
