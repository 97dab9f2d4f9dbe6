#![allow(dead_code, unused_imports)]

pub mod builders;
pub mod fake_launcher;
pub mod strategies;

pub use builders::*;
pub use fake_launcher::*;

use optiplan_core::config::DatabaseConfig;
use optiplan_core::database::DatabaseConnection;
use sqlx::SqlitePool;
use std::path::Path;

/// Fresh in-memory database with the full schema applied
pub async fn setup_test_pool() -> SqlitePool {
    DatabaseConnection::in_memory()
        .await
        .expect("in-memory database")
        .pool()
        .clone()
}

/// File-backed database under `dir` with several pooled connections, for
/// tests where writers contend for the SQLite lock
pub async fn setup_file_pool(dir: &Path, max_connections: u32) -> SqlitePool {
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.join("contention.db").display()),
        max_connections,
    };

    DatabaseConnection::new(&config)
        .await
        .expect("file database")
        .pool()
        .clone()
}
