//! Inventory Server Entry Point

use anyhow::Context;
use clap::Parser;
use inventory::cli::{Cli, Commands};
use inventory::config::{get_env_with_fallback_or, get_env_with_fallback_parse, InventoryConfig};
use inventory::{api, db, logging, AppState};
use tracing::info;

#[derive(Clone)]
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = get_env_with_fallback_or("INVENTORY_HOST", "HOST", "0.0.0.0");
        let port = get_env_with_fallback_parse("INVENTORY_PORT", "PORT", 5000);
        Self { host, port }
    }

    fn from_args(host: String, port: u16) -> Self {
        Self { host, port }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let server_config = match cli.command {
        Some(Commands::Serve(args)) => ServerConfig::from_args(args.host, args.port),
        // No subcommand - default to serve
        None => ServerConfig::from_env(),
    };

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_server(server_config).await {
        tracing::error!("Server error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    info!("Inventory server v{} starting...", env!("CARGO_PKG_VERSION"));

    let inventory_config = InventoryConfig::from_env();
    info!(
        database_url = %inventory_config.database_url,
        policy = ?inventory_config.policy,
        audit_sink = ?inventory_config.audit_sink,
        "Loaded configuration"
    );

    let pool = db::create_pool(&inventory_config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                inventory_config.database_url
            )
        })?;
    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Connected to database");

    let state = AppState::new(
        pool,
        &inventory_config.audit_sink,
        inventory_config.policy,
    );
    let audit_writer = state.engine.audit_writer().clone();

    let app = api::create_app(state, &inventory_config.cors_origin);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // 受理済みの変更の監査ログを書き切ってから終了する
    audit_writer.flush().await;
    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
