use super::{
    errors::{StateMachineError, StateMachineResult},
    events::ExecutionEvent,
    states::ExecutionStatus,
};
use crate::models::{CompletionMetrics, OptimizerExecution};
use sqlx::SqlitePool;

/// Drives a persisted execution from RUNNING to its terminal state
pub struct ExecutionStateMachine {
    execution: OptimizerExecution,
    pool: SqlitePool,
}

impl ExecutionStateMachine {
    pub fn new(execution: OptimizerExecution, pool: SqlitePool) -> Self {
        Self { execution, pool }
    }

    pub fn execution(&self) -> &OptimizerExecution {
        &self.execution
    }

    pub fn into_execution(self) -> OptimizerExecution {
        self.execution
    }

    /// Current state as last read from or written to the store
    pub fn current_state(&self) -> StateMachineResult<ExecutionStatus> {
        self.execution.execution_status().map_err(|_| {
            StateMachineError::Internal(format!(
                "Invalid state in database: {}",
                self.execution.status
            ))
        })
    }

    /// Apply `event` and persist the terminal state with its metrics
    pub async fn transition(
        &mut self,
        event: ExecutionEvent,
        metrics: CompletionMetrics,
    ) -> StateMachineResult<ExecutionStatus> {
        let current_state = self.current_state()?;
        let target_state = Self::determine_target_state(current_state, &event)?;

        let updated = OptimizerExecution::complete(
            &self.pool,
            self.execution.id,
            target_state,
            &metrics,
            event.error_message(),
        )
        .await?
        .ok_or(StateMachineError::AlreadyTerminal {
            execution_id: self.execution.id,
        })?;

        self.execution = updated;

        Ok(target_state)
    }

    /// Only `RUNNING -> SUCCESS` and `RUNNING -> FAILED` exist
    pub fn determine_target_state(
        current_state: ExecutionStatus,
        event: &ExecutionEvent,
    ) -> StateMachineResult<ExecutionStatus> {
        match (current_state, event) {
            (ExecutionStatus::Running, ExecutionEvent::Succeed) => Ok(ExecutionStatus::Success),
            (ExecutionStatus::Running, ExecutionEvent::Fail(_)) => Ok(ExecutionStatus::Failed),
            (from_state, _) => Err(StateMachineError::InvalidTransition {
                from: Some(from_state.to_string()),
                to: event.event_type().to_string(),
            }),
        }
    }
}
