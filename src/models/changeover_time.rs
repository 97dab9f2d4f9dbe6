use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

/// Baseline changeover duration (minutes) of one attribute within a group.
///
/// At most one row exists per (group, attribute); it owns every
/// [`ChangeoverData`](super::ChangeoverData) cell with the same pair.
/// Maps to `changeover_times` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChangeoverTime {
    pub id: i64,
    pub changeover_group_id: i64,
    pub attribute_id: i64,
    pub changeover_time: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str =
    "id, changeover_group_id, attribute_id, changeover_time, created_at, updated_at";

impl ChangeoverTime {
    /// Insert the baseline of a (group, attribute) pair or overwrite its time
    pub async fn upsert<'e, E>(
        executor: E,
        changeover_group_id: i64,
        attribute_id: i64,
        changeover_time: i64,
    ) -> Result<ChangeoverTime, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            INSERT INTO changeover_times
                (changeover_group_id, attribute_id, changeover_time, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT (changeover_group_id, attribute_id) DO UPDATE SET
                changeover_time = excluded.changeover_time,
                updated_at = excluded.updated_at
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, ChangeoverTime>(&sql)
            .bind(changeover_group_id)
            .bind(attribute_id)
            .bind(changeover_time)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<ChangeoverTime>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {COLUMNS} FROM changeover_times WHERE id = ?1");

        sqlx::query_as::<_, ChangeoverTime>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_for_group<'e, E>(
        executor: E,
        changeover_group_id: i64,
    ) -> Result<Vec<ChangeoverTime>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM changeover_times
            WHERE changeover_group_id = ?1
            ORDER BY attribute_id
            "#
        );

        sqlx::query_as::<_, ChangeoverTime>(&sql)
            .bind(changeover_group_id)
            .fetch_all(executor)
            .await
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM changeover_times WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_for_group<'e, E>(
        executor: E,
        changeover_group_id: i64,
    ) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM changeover_times WHERE changeover_group_id = ?1")
            .bind(changeover_group_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
