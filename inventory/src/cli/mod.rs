//! CLI module for inventory
//!
//! Provides the command-line interface of the inventory server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Inventory backend - material stock ledger with audit log
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    INVENTORY_HOST              Bind address (default: 0.0.0.0)
    INVENTORY_PORT              Listen port (default: 5000)
    INVENTORY_DATABASE_URL      Database URL (default: sqlite:inventory.db)
    INVENTORY_CORS_ORIGIN       Allowed CORS origin (default: http://localhost:5173)
    INVENTORY_PROFILE           Policy preset: document-store | native-driver
    INVENTORY_IDENTITY_POLICY   strict | id-only
    INVENTORY_ADD_POLICY        insert-always | merge-accumulate
    INVENTORY_REMOVE_KEY        id-and-name | id-only
    INVENTORY_REMOVE_COMMIT     guarded | unguarded
    INVENTORY_DATE_DISPLAY      day-month-year | raw
    INVENTORY_AUDIT_SINK        database | file (default: database)
    INVENTORY_AUDIT_FILE        Audit log file (default: inventory.log)
    INVENTORY_LOG_LEVEL         Log level (default: info)
    INVENTORY_LOG_FORMAT        text | json (default: text)
    INVENTORY_LOG_DIR           Directory for daily rotated log files
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the inventory server
    Serve(serve::ServeArgs),
}
