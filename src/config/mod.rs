//! # OptiPlan Configuration
//!
//! Layered configuration for the store connection, the external optimizer
//! process and execution history retention.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults ([`OptiplanConfig::default`])
//! 2. An optional TOML file (`config/optiplan.toml` unless a path is given)
//! 3. `OPTIPLAN__*` environment variables, `__` separating sections,
//!    e.g. `OPTIPLAN__DATABASE__URL=sqlite://plan.db?mode=rwc`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use optiplan_core::config::OptiplanConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OptiplanConfig::load(None)?;
//! println!("optimizer program: {}", config.optimizer.program);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{optimizer, system};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub use error::{ConfigResult, ConfigurationError};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OptiplanConfig {
    /// Store connection settings
    pub database: DatabaseConfig,

    /// External optimizer launch contract
    pub optimizer: OptimizerProcessConfig,

    /// Number of executions surfaced by the default history listing
    pub execution_history_limit: u32,
}

/// SQLite connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// How to start the external optimizer.
///
/// The process is spawned as `program [args...] <run arguments...>` without a
/// shell, so neither scenario names nor priority values are ever interpolated.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerProcessConfig {
    /// Executable, e.g. a virtualenv interpreter
    pub program: String,
    /// Leading arguments, e.g. the optimizer script
    pub args: Vec<String>,
    pub working_directory: Option<PathBuf>,
    /// Extra environment for the child, applied after the inherited environment
    /// and `PYTHONIOENCODING=utf-8`
    pub env: HashMap<String, String>,
    /// Bytes kept per output stream; older output is dropped first
    pub max_output_bytes: usize,
}

impl Default for OptiplanConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            optimizer: OptimizerProcessConfig::default(),
            execution_history_limit: system::EXECUTION_HISTORY_LIMIT,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://optiplan.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for OptimizerProcessConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["main.py".to_string()],
            working_directory: Some(PathBuf::from("optiplan-optimizer")),
            env: HashMap::new(),
            max_output_bytes: optimizer::MAX_OUTPUT_BYTES,
        }
    }
}

impl OptiplanConfig {
    /// Reject configurations that cannot possibly work
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigurationError::MissingRequiredField {
                field: "url".to_string(),
                context: "database".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "database.max_connections".to_string(),
                value: "0".to_string(),
                context: "at least one connection is required".to_string(),
            });
        }

        if self.optimizer.program.trim().is_empty() {
            return Err(ConfigurationError::MissingRequiredField {
                field: "program".to_string(),
                context: "optimizer".to_string(),
            });
        }

        if self.optimizer.max_output_bytes == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "optimizer.max_output_bytes".to_string(),
                value: "0".to_string(),
                context: "optimizer output would be discarded entirely".to_string(),
            });
        }

        if self.execution_history_limit == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "execution_history_limit".to_string(),
                value: "0".to_string(),
                context: "history listing must return at least one row".to_string(),
            });
        }

        Ok(())
    }
}
