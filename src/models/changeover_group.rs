use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

/// A machine family sharing one setup-time matrix.
/// Maps to `changeover_groups` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChangeoverGroup {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChangeoverGroup {
    /// Create a new changeover group
    pub async fn create<'e, E>(executor: E, name: &str) -> Result<ChangeoverGroup, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let now = Utc::now();
        sqlx::query_as::<_, ChangeoverGroup>(
            r#"
            INSERT INTO changeover_groups (name, created_at, updated_at)
            VALUES (?1, ?2, ?2)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(now)
        .fetch_one(executor)
        .await
    }

    /// Find a changeover group by ID
    pub async fn find_by_id<'e, E>(
        executor: E,
        id: i64,
    ) -> Result<Option<ChangeoverGroup>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, ChangeoverGroup>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM changeover_groups
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// List all changeover groups
    pub async fn list_all<'e, E>(executor: E) -> Result<Vec<ChangeoverGroup>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, ChangeoverGroup>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM changeover_groups
            ORDER BY id
            "#,
        )
        .fetch_all(executor)
        .await
    }

    /// Rename a changeover group, `None` when it does not exist
    pub async fn rename<'e, E>(
        executor: E,
        id: i64,
        name: &str,
    ) -> Result<Option<ChangeoverGroup>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, ChangeoverGroup>(
            r#"
            UPDATE changeover_groups
            SET name = ?2, updated_at = ?3
            WHERE id = ?1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(Utc::now())
        .fetch_optional(executor)
        .await
    }

    /// Delete the group row only; dependent rows must already be gone
    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM changeover_groups WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
