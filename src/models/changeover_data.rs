use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

/// One cell of a transition-cost matrix: the setup time (minutes) of moving
/// from one attribute parameter to another within a group.
/// Maps to `changeover_data` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChangeoverData {
    pub id: i64,
    pub changeover_group_id: i64,
    pub attribute_id: i64,
    pub from_attr_param_id: i64,
    pub to_attr_param_id: i64,
    pub setup_time: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compound key of a matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatrixCellKey {
    pub changeover_group_id: i64,
    pub attribute_id: i64,
    pub from_attr_param_id: i64,
    pub to_attr_param_id: i64,
}

const COLUMNS: &str = "id, changeover_group_id, attribute_id, from_attr_param_id, \
                       to_attr_param_id, setup_time, created_at, updated_at";

impl ChangeoverData {
    pub fn key(&self) -> MatrixCellKey {
        MatrixCellKey {
            changeover_group_id: self.changeover_group_id,
            attribute_id: self.attribute_id,
            from_attr_param_id: self.from_attr_param_id,
            to_attr_param_id: self.to_attr_param_id,
        }
    }

    /// Insert the cell at `key` or overwrite its setup time
    pub async fn upsert<'e, E>(
        executor: E,
        key: MatrixCellKey,
        setup_time: i64,
    ) -> Result<ChangeoverData, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            INSERT INTO changeover_data
                (changeover_group_id, attribute_id, from_attr_param_id, to_attr_param_id,
                 setup_time, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ON CONFLICT (changeover_group_id, attribute_id, from_attr_param_id, to_attr_param_id)
            DO UPDATE SET
                setup_time = excluded.setup_time,
                updated_at = excluded.updated_at
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, ChangeoverData>(&sql)
            .bind(key.changeover_group_id)
            .bind(key.attribute_id)
            .bind(key.from_attr_param_id)
            .bind(key.to_attr_param_id)
            .bind(setup_time)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<ChangeoverData>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {COLUMNS} FROM changeover_data WHERE id = ?1");

        sqlx::query_as::<_, ChangeoverData>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All cells of one (group, attribute) matrix
    pub async fn list_for_matrix<'e, E>(
        executor: E,
        changeover_group_id: i64,
        attribute_id: i64,
    ) -> Result<Vec<ChangeoverData>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM changeover_data
            WHERE changeover_group_id = ?1 AND attribute_id = ?2
            ORDER BY from_attr_param_id, to_attr_param_id
            "#
        );

        sqlx::query_as::<_, ChangeoverData>(&sql)
            .bind(changeover_group_id)
            .bind(attribute_id)
            .fetch_all(executor)
            .await
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM changeover_data WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_for_matrix<'e, E>(
        executor: E,
        changeover_group_id: i64,
        attribute_id: i64,
    ) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "DELETE FROM changeover_data WHERE changeover_group_id = ?1 AND attribute_id = ?2",
        )
        .bind(changeover_group_id)
        .bind(attribute_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_for_group<'e, E>(
        executor: E,
        changeover_group_id: i64,
    ) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM changeover_data WHERE changeover_group_id = ?1")
            .bind(changeover_group_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
