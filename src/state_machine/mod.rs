// State machine for optimizer executions.
//
// An execution is persisted in RUNNING before the optimizer starts and is
// moved to SUCCESS or FAILED exactly once after the process exits.

pub mod errors;
pub mod events;
pub mod execution_state_machine;
pub mod states;

pub use errors::{StateMachineError, StateMachineResult};
pub use events::ExecutionEvent;
pub use execution_state_machine::ExecutionStateMachine;
pub use states::ExecutionStatus;
