//! # Schema Setup
//!
//! Creates every table and index idempotently (`IF NOT EXISTS`), so it is
//! safe to run on each startup.
//!
//! Foreign keys carry no `ON DELETE CASCADE`; group and baseline deletes
//! remove their dependent rows inside one transaction. The compound unique
//! indexes on `changeover_times` and `changeover_data` are the conflict
//! targets of the baseline and matrix cell upserts.

use sqlx::SqlitePool;
use tracing::debug;

const SCHEMA: &[(&str, &str)] = &[
    (
        "attributes",
        r#"
        CREATE TABLE IF NOT EXISTS attributes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            is_param BOOLEAN NOT NULL DEFAULT 1
        )
        "#,
    ),
    (
        "attribute_parameters",
        r#"
        CREATE TABLE IF NOT EXISTS attribute_parameters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            attribute_id INTEGER NOT NULL REFERENCES attributes(id),
            name TEXT NOT NULL
        )
        "#,
    ),
    (
        "changeover_groups",
        r#"
        CREATE TABLE IF NOT EXISTS changeover_groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "changeover_times",
        r#"
        CREATE TABLE IF NOT EXISTS changeover_times (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            changeover_group_id INTEGER NOT NULL REFERENCES changeover_groups(id),
            attribute_id INTEGER NOT NULL REFERENCES attributes(id),
            changeover_time INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "idx_changeover_times_group_attribute",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_changeover_times_group_attribute
            ON changeover_times (changeover_group_id, attribute_id)
        "#,
    ),
    (
        "changeover_data",
        r#"
        CREATE TABLE IF NOT EXISTS changeover_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            changeover_group_id INTEGER NOT NULL REFERENCES changeover_groups(id),
            attribute_id INTEGER NOT NULL REFERENCES attributes(id),
            from_attr_param_id INTEGER NOT NULL REFERENCES attribute_parameters(id),
            to_attr_param_id INTEGER NOT NULL REFERENCES attribute_parameters(id),
            setup_time INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "idx_changeover_data_cell",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_changeover_data_cell
            ON changeover_data (changeover_group_id, attribute_id, from_attr_param_id, to_attr_param_id)
        "#,
    ),
    (
        "optimization_scenarios",
        r#"
        CREATE TABLE IF NOT EXISTS optimization_scenarios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            description TEXT,
            strategy TEXT,
            campaign_window_days INTEGER,
            gravity BOOLEAN,
            resource_priority TEXT NOT NULL DEFAULT '',
            is_default BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "optimizer_settings",
        r#"
        CREATE TABLE IF NOT EXISTS optimizer_settings (
            id INTEGER PRIMARY KEY,
            strategy TEXT NOT NULL,
            campaign_window_days INTEGER NOT NULL,
            gravity BOOLEAN NOT NULL,
            resource_priority TEXT NOT NULL DEFAULT '',
            updated_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "optimizer_executions",
        r#"
        CREATE TABLE IF NOT EXISTS optimizer_executions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            status TEXT NOT NULL,
            scenario_id INTEGER,
            strategy TEXT NOT NULL,
            campaign_window_days INTEGER NOT NULL,
            gravity BOOLEAN NOT NULL,
            resource_priority TEXT NOT NULL DEFAULT '',
            start_time TEXT NOT NULL,
            end_time TEXT,
            duration_seconds REAL,
            record_count INTEGER NOT NULL DEFAULT 0,
            error_message TEXT
        )
        "#,
    ),
];

/// Schema bootstrapper
pub struct DatabaseMigrations;

impl DatabaseMigrations {
    /// Create all tables and indexes in one transaction
    pub async fn run_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (name, statement) in SCHEMA {
            debug!(object = name, "Ensuring schema object");
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        tx.commit().await
    }

    /// Names of the schema objects created by [`DatabaseMigrations::run_all`]
    pub fn object_names() -> impl Iterator<Item = &'static str> {
        SCHEMA.iter().map(|(name, _)| *name)
    }
}
