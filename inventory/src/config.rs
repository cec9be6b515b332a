//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs.

use std::path::PathBuf;
use std::str::FromStr;

use crate::audit::sink::AuditSinkKind;
use crate::engine::{
    AddPolicy, DateDisplay, EnginePolicy, IdentityPolicy, PolicyProfile, RemoveCommit, RemoveKey,
};

/// Default origin allowed by CORS (the Vite dev server of the frontend)
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default SQLite database URL
pub const DEFAULT_DATABASE_URL: &str = "sqlite:inventory.db";

/// Default audit log file (used when the audit sink is `file`)
pub const DEFAULT_AUDIT_FILE: &str = "inventory.log";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use inventory::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("INVENTORY_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse an optional environment variable, warning (and ignoring it) when invalid
fn get_env_parsed<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring invalid value for '{}': {}", name, e);
            None
        }
    }
}

/// Load the engine policy from environment variables.
///
/// `INVENTORY_PROFILE` selects a preset (`document-store` by default);
/// individual knobs override the preset.
pub fn engine_policy_from_env() -> EnginePolicy {
    let mut policy = get_env_parsed::<PolicyProfile>("INVENTORY_PROFILE")
        .unwrap_or(PolicyProfile::DocumentStore)
        .policy();

    if let Some(identity) = get_env_parsed::<IdentityPolicy>("INVENTORY_IDENTITY_POLICY") {
        policy.identity = identity;
    }
    if let Some(add) = get_env_parsed::<AddPolicy>("INVENTORY_ADD_POLICY") {
        policy.add = add;
    }
    if let Some(remove_key) = get_env_parsed::<RemoveKey>("INVENTORY_REMOVE_KEY") {
        policy.remove_key = remove_key;
    }
    if let Some(remove_commit) = get_env_parsed::<RemoveCommit>("INVENTORY_REMOVE_COMMIT") {
        policy.remove_commit = remove_commit;
    }
    if let Some(date_display) = get_env_parsed::<DateDisplay>("INVENTORY_DATE_DISPLAY") {
        policy.date_display = date_display;
    }

    policy
}

/// Load the audit sink selection from environment variables.
///
/// `INVENTORY_AUDIT_SINK` is `database` (default) or `file`; the file path
/// comes from `INVENTORY_AUDIT_FILE`.
pub fn audit_sink_from_env() -> AuditSinkKind {
    let kind = std::env::var("INVENTORY_AUDIT_SINK").unwrap_or_else(|_| "database".to_string());
    match kind.trim().to_ascii_lowercase().as_str() {
        "file" => AuditSinkKind::File(PathBuf::from(
            std::env::var("INVENTORY_AUDIT_FILE").unwrap_or_else(|_| DEFAULT_AUDIT_FILE.into()),
        )),
        "database" | "db" => AuditSinkKind::Database,
        other => {
            tracing::warn!("Unknown audit sink '{}', falling back to database", other);
            AuditSinkKind::Database
        }
    }
}

/// Service configuration (everything except the listen address)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// SQLite database URL
    pub database_url: String,
    /// Allowed CORS origin
    pub cors_origin: String,
    /// Audit log destination
    pub audit_sink: AuditSinkKind,
    /// Engine policy
    pub policy: EnginePolicy,
}

impl InventoryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database_url: get_env_with_fallback_or(
                "INVENTORY_DATABASE_URL",
                "DATABASE_URL",
                DEFAULT_DATABASE_URL,
            ),
            cors_origin: get_env_with_fallback_or(
                "INVENTORY_CORS_ORIGIN",
                "CORS_ORIGIN",
                DEFAULT_CORS_ORIGIN,
            ),
            audit_sink: audit_sink_from_env(),
            policy: engine_policy_from_env(),
        }
    }
}
