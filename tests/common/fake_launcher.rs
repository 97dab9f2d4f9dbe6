use async_trait::async_trait;
use optiplan_core::error::{OptiplanError, OptiplanResult};
use optiplan_core::models::OptimizerExecution;
use optiplan_core::orchestration::{OptimizerLauncher, ProcessOutcome, ResolvedParameters};
use sqlx::SqlitePool;
use std::sync::Mutex;
use std::time::Duration;

/// Launcher returning a canned outcome and remembering what it was asked to run
pub struct FakeLauncher {
    outcome: Result<ProcessOutcome, String>,
    delay: Duration,
    launched: Mutex<Vec<(i64, ResolvedParameters)>>,
    store: Option<SqlitePool>,
    rows_at_launch: Mutex<Vec<Option<OptimizerExecution>>>,
}

impl FakeLauncher {
    pub fn exiting(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            outcome: Ok(ProcessOutcome {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
            delay: Duration::ZERO,
            launched: Mutex::new(Vec::new()),
            store: None,
            rows_at_launch: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_to_start(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            delay: Duration::ZERO,
            launched: Mutex::new(Vec::new()),
            store: None,
            rows_at_launch: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Read the execution row from `pool` each time a launch starts
    pub fn reading_execution_from(mut self, pool: SqlitePool) -> Self {
        self.store = Some(pool);
        self
    }

    /// Execution rows as they were stored when each launch started
    pub fn rows_at_launch(&self) -> Vec<Option<OptimizerExecution>> {
        self.rows_at_launch.lock().unwrap().clone()
    }

    pub fn launched(&self) -> Vec<(i64, ResolvedParameters)> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait]
impl OptimizerLauncher for FakeLauncher {
    async fn launch(
        &self,
        execution_id: i64,
        params: &ResolvedParameters,
    ) -> OptiplanResult<ProcessOutcome> {
        self.launched
            .lock()
            .unwrap()
            .push((execution_id, params.clone()));

        if let Some(pool) = &self.store {
            let row = OptimizerExecution::find_by_id(pool, execution_id).await?;
            self.rows_at_launch.lock().unwrap().push(row);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.outcome
            .clone()
            .map_err(OptiplanError::ExternalProcessFailure)
    }
}
