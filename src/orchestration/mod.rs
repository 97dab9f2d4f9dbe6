//! # Orchestration
//!
//! Everything between "run the optimizer" and a recorded execution.
//!
//! ## Components
//!
//! - **ParameterResolver**: merges request, scenario, global settings and
//!   fallbacks into one concrete configuration
//! - **OptimizerLauncher**: the process boundary; [`ProcessOptimizerLauncher`]
//!   spawns the real optimizer, tests substitute their own
//! - **RunOrchestrator**: persists the execution, launches, parses the
//!   processed-record marker and drives the execution state machine

pub mod optimizer_process;
pub mod output;
pub mod parameter_resolver;
pub mod run_orchestrator;
pub mod types;

pub use optimizer_process::{OptimizerLauncher, ProcessOptimizerLauncher};
pub use output::{build_arguments, parse_processed_count};
pub use parameter_resolver::ParameterResolver;
pub use run_orchestrator::RunOrchestrator;
pub use types::{ProcessOutcome, ResolvedParameters, RunRequest, RunSummary};
