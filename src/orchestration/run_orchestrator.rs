//! # Run Orchestrator
//!
//! Executes one optimizer run end to end:
//!
//! 1. resolve the run parameters
//! 2. persist a RUNNING execution before the process starts
//! 3. launch the optimizer and wait for it
//! 4. drive the execution to SUCCESS or FAILED with its metrics
//!
//! Runs are independent of each other; concurrent calls each get their own
//! execution row.

use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::optimizer_process::{OptimizerLauncher, ProcessOptimizerLauncher};
use super::output::{failure_detail, parse_processed_count};
use super::parameter_resolver::ParameterResolver;
use super::types::{RunRequest, RunSummary};
use crate::config::OptiplanConfig;
use crate::constants::{messages, system};
use crate::error::{OptiplanError, OptiplanResult};
use crate::logging::log_execution_event;
use crate::models::{CompletionMetrics, NewOptimizerExecution, OptimizerExecution};
use crate::state_machine::{ExecutionEvent, ExecutionStateMachine, ExecutionStatus};

#[derive(Clone)]
pub struct RunOrchestrator {
    db_pool: SqlitePool,
    launcher: Arc<dyn OptimizerLauncher>,
    history_limit: u32,
}

impl std::fmt::Debug for RunOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOrchestrator")
            .field("history_limit", &self.history_limit)
            .finish_non_exhaustive()
    }
}

impl RunOrchestrator {
    pub fn new(db_pool: SqlitePool, launcher: Arc<dyn OptimizerLauncher>) -> Self {
        Self {
            db_pool,
            launcher,
            history_limit: system::EXECUTION_HISTORY_LIMIT,
        }
    }

    /// Orchestrator launching the configured optimizer process
    pub fn from_config(db_pool: SqlitePool, config: &OptiplanConfig) -> Self {
        Self::new(
            db_pool,
            Arc::new(ProcessOptimizerLauncher::new(config.optimizer.clone())),
        )
        .with_history_limit(config.execution_history_limit)
    }

    pub fn with_history_limit(mut self, history_limit: u32) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Run the optimizer once and record the outcome.
    ///
    /// Resolution and store errors are returned as `Err` before any process is
    /// started. Once the execution row exists, process failures are reported
    /// through a `RunSummary` with `success == false` and the row ends FAILED.
    #[instrument(skip(self))]
    pub async fn run(&self, request: RunRequest) -> OptiplanResult<RunSummary> {
        let params = ParameterResolver::resolve_for_run(&self.db_pool, &request).await?;

        let execution = OptimizerExecution::create(
            &self.db_pool,
            &NewOptimizerExecution {
                scenario_id: params.scenario_id,
                strategy: params.strategy.clone(),
                campaign_window_days: params.campaign_window_days,
                gravity: params.gravity,
                resource_priority: params.resource_priority.clone(),
                start_time: Utc::now(),
            },
        )
        .await?;
        let execution_id = execution.id;

        log_execution_event(
            execution_id,
            ExecutionStatus::Running.as_str(),
            None,
            None,
            Some(&params.strategy),
        );

        let launched = self.launcher.launch(execution_id, &params).await;

        let end_time = Utc::now();
        let duration_seconds = (end_time - execution.start_time)
            .to_std()
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or(0.0);

        let (event, record_count) = match &launched {
            Ok(outcome) if outcome.succeeded() => (
                ExecutionEvent::Succeed,
                parse_processed_count(&outcome.stdout),
            ),
            // Failed runs report no processed records
            Ok(outcome) => (ExecutionEvent::Fail(failure_detail(outcome)), 0),
            Err(e) => {
                warn!(execution_id = execution_id, error = %e, "Optimizer could not be run");
                (ExecutionEvent::Fail(e.to_string()), 0)
            }
        };

        let mut state_machine = ExecutionStateMachine::new(execution, self.db_pool.clone());
        let status = state_machine
            .transition(
                event.clone(),
                CompletionMetrics {
                    end_time,
                    duration_seconds,
                    record_count,
                },
            )
            .await
            .map_err(|e| {
                error!(execution_id = execution_id, error = %e, "Failed to record execution outcome");
                OptiplanError::from(e)
            })?;

        log_execution_event(
            execution_id,
            status.as_str(),
            Some(record_count),
            Some(duration_seconds),
            event.error_message(),
        );

        let summary = match event {
            ExecutionEvent::Succeed => RunSummary {
                success: true,
                message: messages::RUN_SUCCEEDED.to_string(),
                execution_id,
            },
            ExecutionEvent::Fail(detail) => RunSummary {
                success: false,
                message: format!("Execution failed: {detail}"),
                execution_id,
            },
        };

        info!(
            execution_id = execution_id,
            success = summary.success,
            record_count = record_count,
            "Optimizer run finished"
        );

        Ok(summary)
    }

    /// Most recent executions, newest first, bounded by the history limit
    pub async fn list_executions(&self) -> OptiplanResult<Vec<OptimizerExecution>> {
        Ok(OptimizerExecution::list_recent(&self.db_pool, self.history_limit).await?)
    }

    pub async fn get_execution(&self, id: i64) -> OptiplanResult<OptimizerExecution> {
        OptimizerExecution::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| OptiplanError::not_found("OptimizerExecution", id))
    }
}
