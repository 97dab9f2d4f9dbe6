use crate::state_machine::ExecutionStatus;
use crate::utils::priority;
use crate::utils::serde::{deserialize_priority_list, serialize_priority_list};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

/// One attempt to run the external optimizer.
///
/// Written twice at most: on creation (RUNNING, before launch) and once on
/// completion with the terminal status and metrics. Resolved parameters are
/// stored by value so scenarios can be deleted freely.
/// Maps to `optimizer_executions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OptimizerExecution {
    pub id: i64,
    pub status: String,
    pub scenario_id: Option<i64>,
    pub strategy: String,
    pub campaign_window_days: i64,
    pub gravity: bool,
    #[serde(
        serialize_with = "serialize_priority_list",
        deserialize_with = "deserialize_priority_list"
    )]
    pub resource_priority: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: Option<f64>,
    pub record_count: i64,
    pub error_message: Option<String>,
}

/// New OptimizerExecution, always persisted in RUNNING
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOptimizerExecution {
    pub scenario_id: Option<i64>,
    pub strategy: String,
    pub campaign_window_days: i64,
    pub gravity: bool,
    pub resource_priority: Vec<i64>,
    pub start_time: DateTime<Utc>,
}

/// Metrics recorded with the terminal status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMetrics {
    pub end_time: DateTime<Utc>,
    pub duration_seconds: f64,
    pub record_count: i64,
}

const COLUMNS: &str = "id, status, scenario_id, strategy, campaign_window_days, gravity, \
                       resource_priority, start_time, end_time, duration_seconds, \
                       record_count, error_message";

impl OptimizerExecution {
    /// Typed view of the persisted status column
    pub fn execution_status(&self) -> Result<ExecutionStatus, String> {
        self.status.parse()
    }

    /// Decoded resource priority list
    pub fn priority_list(&self) -> Vec<i64> {
        priority::decode(&self.resource_priority)
    }

    /// Insert a RUNNING row
    pub async fn create<'e, E>(
        executor: E,
        new_execution: &NewOptimizerExecution,
    ) -> Result<OptimizerExecution, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            INSERT INTO optimizer_executions
                (status, scenario_id, strategy, campaign_window_days, gravity,
                 resource_priority, start_time, record_count)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, OptimizerExecution>(&sql)
            .bind(ExecutionStatus::Running.as_str())
            .bind(new_execution.scenario_id)
            .bind(&new_execution.strategy)
            .bind(new_execution.campaign_window_days)
            .bind(new_execution.gravity)
            .bind(priority::encode(&new_execution.resource_priority))
            .bind(new_execution.start_time)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(
        executor: E,
        id: i64,
    ) -> Result<Option<OptimizerExecution>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {COLUMNS} FROM optimizer_executions WHERE id = ?1");

        sqlx::query_as::<_, OptimizerExecution>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Most recent executions first, bounded by `limit`
    pub async fn list_recent<'e, E>(
        executor: E,
        limit: u32,
    ) -> Result<Vec<OptimizerExecution>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM optimizer_executions
            ORDER BY julianday(start_time) DESC, id DESC
            LIMIT ?1
            "#
        );

        sqlx::query_as::<_, OptimizerExecution>(&sql)
            .bind(i64::from(limit))
            .fetch_all(executor)
            .await
    }

    /// Record the terminal state of a RUNNING row.
    ///
    /// Returns `None` when the row does not exist or has already left RUNNING.
    pub async fn complete<'e, E>(
        executor: E,
        id: i64,
        status: ExecutionStatus,
        metrics: &CompletionMetrics,
        error_message: Option<&str>,
    ) -> Result<Option<OptimizerExecution>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            r#"
            UPDATE optimizer_executions
            SET status = ?2,
                end_time = ?3,
                duration_seconds = ?4,
                record_count = ?5,
                error_message = ?6
            WHERE id = ?1 AND status = ?7
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, OptimizerExecution>(&sql)
            .bind(id)
            .bind(status.as_str())
            .bind(metrics.end_time)
            .bind(metrics.duration_seconds)
            .bind(metrics.record_count)
            .bind(error_message)
            .bind(ExecutionStatus::Running.as_str())
            .fetch_optional(executor)
            .await
    }

    pub async fn count_all<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM optimizer_executions")
            .fetch_one(executor)
            .await
    }
}
