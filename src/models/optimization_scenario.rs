use crate::utils::priority;
use crate::utils::serde::{
    deserialize_nullable, deserialize_priority_list, serialize_priority_list,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

/// Named, reusable bundle of optimizer run parameters.
///
/// Payload fields are optional; an unset field (or `0` days, or an empty
/// priority list) falls through to the global settings during resolution.
/// At most one row has `is_default = true`, which the
/// [`ScenarioRegistry`](crate::services::ScenarioRegistry) maintains.
/// Maps to `optimization_scenarios` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OptimizationScenario {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub strategy: Option<String>,
    pub campaign_window_days: Option<i64>,
    pub gravity: Option<bool>,
    /// Persisted comma-joined form; see [`OptimizationScenario::priority_list`]
    #[serde(
        serialize_with = "serialize_priority_list",
        deserialize_with = "deserialize_priority_list"
    )]
    pub resource_priority: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New OptimizationScenario for creation (without generated fields)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOptimizationScenario {
    pub name: String,
    pub description: Option<String>,
    pub strategy: Option<String>,
    pub campaign_window_days: Option<i64>,
    pub gravity: Option<bool>,
    #[serde(default)]
    pub resource_priority: Vec<i64>,
}

/// Partial update; `None` leaves the stored value untouched.
///
/// Nullable payload fields take `Some(None)` to clear the stored value, so a
/// scenario can fall back to the global settings again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioUpdate {
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub strategy: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub campaign_window_days: Option<Option<i64>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub gravity: Option<Option<bool>>,
    pub resource_priority: Option<Vec<i64>>,
    pub is_default: Option<bool>,
}

const COLUMNS: &str = "id, name, description, strategy, campaign_window_days, gravity, \
                       resource_priority, is_default, created_at, updated_at";

impl OptimizationScenario {
    /// Decoded resource priority list
    pub fn priority_list(&self) -> Vec<i64> {
        priority::decode(&self.resource_priority)
    }

    pub async fn create<'e, E>(
        executor: E,
        new_scenario: &NewOptimizationScenario,
        is_default: bool,
    ) -> Result<OptimizationScenario, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            INSERT INTO optimization_scenarios
                (name, description, strategy, campaign_window_days, gravity,
                 resource_priority, is_default, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, OptimizationScenario>(&sql)
            .bind(&new_scenario.name)
            .bind(&new_scenario.description)
            .bind(&new_scenario.strategy)
            .bind(new_scenario.campaign_window_days)
            .bind(new_scenario.gravity)
            .bind(priority::encode(&new_scenario.resource_priority))
            .bind(is_default)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(
        executor: E,
        id: i64,
    ) -> Result<Option<OptimizationScenario>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {COLUMNS} FROM optimization_scenarios WHERE id = ?1");

        sqlx::query_as::<_, OptimizationScenario>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// The scenario currently flagged as default, if any
    pub async fn find_default<'e, E>(executor: E) -> Result<Option<OptimizationScenario>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            "SELECT {COLUMNS} FROM optimization_scenarios WHERE is_default = 1 ORDER BY id LIMIT 1"
        );

        sqlx::query_as::<_, OptimizationScenario>(&sql)
            .fetch_optional(executor)
            .await
    }

    /// List all scenarios ordered by name
    pub async fn list_all<'e, E>(executor: E) -> Result<Vec<OptimizationScenario>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {COLUMNS} FROM optimization_scenarios ORDER BY name");

        sqlx::query_as::<_, OptimizationScenario>(&sql)
            .fetch_all(executor)
            .await
    }

    /// Apply the supplied fields, `None` when the scenario does not exist
    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        update: &ScenarioUpdate,
    ) -> Result<Option<OptimizationScenario>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            UPDATE optimization_scenarios
            SET
                name = COALESCE(?2, name),
                description = CASE WHEN ?3 THEN ?4 ELSE description END,
                strategy = CASE WHEN ?5 THEN ?6 ELSE strategy END,
                campaign_window_days = CASE WHEN ?7 THEN ?8 ELSE campaign_window_days END,
                gravity = CASE WHEN ?9 THEN ?10 ELSE gravity END,
                resource_priority = COALESCE(?11, resource_priority),
                is_default = COALESCE(?12, is_default),
                updated_at = ?13
            WHERE id = ?1
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, OptimizationScenario>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(update.description.is_some())
            .bind(update.description.clone().flatten())
            .bind(update.strategy.is_some())
            .bind(update.strategy.clone().flatten())
            .bind(update.campaign_window_days.is_some())
            .bind(update.campaign_window_days.flatten())
            .bind(update.gravity.is_some())
            .bind(update.gravity.flatten())
            .bind(update.resource_priority.as_deref().map(priority::encode))
            .bind(update.is_default)
            .bind(Utc::now())
            .fetch_optional(executor)
            .await
    }

    /// Clear the default flag on every row except `keep_id`
    pub async fn clear_default_except<'e, E>(executor: E, keep_id: i64) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE optimization_scenarios SET is_default = 0 WHERE id != ?1 AND is_default = 1",
        )
        .bind(keep_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Clear the default flag on every row
    pub async fn clear_all_defaults<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result =
            sqlx::query("UPDATE optimization_scenarios SET is_default = 0 WHERE is_default = 1")
                .execute(executor)
                .await?;

        Ok(result.rows_affected())
    }

    /// Flag one row as default, `false` when it does not exist
    pub async fn mark_default<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE optimization_scenarios SET is_default = 1, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_defaults<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM optimization_scenarios WHERE is_default = 1",
        )
        .fetch_one(executor)
        .await
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM optimization_scenarios WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
