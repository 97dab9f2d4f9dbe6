#![allow(clippy::doc_markdown)] // Allow technical terms like SQLite, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # OptiPlan Core
//!
//! Planning-side core of the OptiPlan manufacturing scheduler.
//!
//! ## Overview
//!
//! The crate keeps the sequence-dependent setup times ("changeover matrix")
//! the external optimizer consumes, manages named optimizer scenarios and the
//! global optimizer settings, and runs the optimizer as a child process while
//! recording every attempt as an execution with status, duration and the
//! number of records it processed.
//!
//! ## Module Organization
//!
//! - [`services`] - Changeover matrix store and scenario registry
//! - [`orchestration`] - Parameter resolution and optimizer runs
//! - [`models`] - One module per table, executor-generic queries
//! - [`state_machine`] - RUNNING → SUCCESS / FAILED execution lifecycle
//! - [`database`] - SQLite pool construction and schema setup
//! - [`config`] - Layered configuration (defaults, TOML file, environment)
//! - [`error`] - Structured error handling
//! - [`utils`] - Resource priority codec
//! - [`validation`] - Shared input checks for run parameters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use optiplan_core::config::OptiplanConfig;
//! use optiplan_core::database::DatabaseConnection;
//! use optiplan_core::orchestration::{RunOrchestrator, RunRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OptiplanConfig::load(None)?;
//! let db = DatabaseConnection::new(&config.database).await?;
//!
//! let orchestrator = RunOrchestrator::from_config(db.pool().clone(), &config);
//! let summary = orchestrator.run(RunRequest::default()).await?;
//! println!("execution {}: {}", summary.execution_id, summary.message);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Integration tests run against an in-memory SQLite pool and a fake optimizer
//! launcher:
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod services;
pub mod state_machine;
pub mod utils;
pub mod validation;

pub use config::{DatabaseConfig, OptimizerProcessConfig, OptiplanConfig};
pub use database::{DatabaseConnection, DatabaseMigrations};
pub use error::{ErrorKind, OperationResult, OptiplanError, OptiplanResult};
pub use orchestration::{
    OptimizerLauncher, ParameterResolver, ProcessOptimizerLauncher, ResolvedParameters,
    RunOrchestrator, RunRequest, RunSummary,
};
pub use services::{ChangeoverMatrixStore, ScenarioRegistry};
pub use state_machine::{ExecutionEvent, ExecutionStatus};
