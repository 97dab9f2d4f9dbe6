//! # Orchestration Types
//!
//! Request, resolved configuration and outcome types shared by the parameter
//! resolver, the optimizer launcher and the run orchestrator.

use serde::{Deserialize, Serialize};

/// Partial run request; every field may be left to the lower layers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Scenario to resolve against; the default scenario is used when absent
    pub scenario_id: Option<i64>,
    pub strategy: Option<String>,
    /// `0` counts as not provided
    pub campaign_window_days: Option<i64>,
    /// `Some(false)` is a real value, distinct from not provided
    pub gravity: Option<bool>,
    /// An empty list counts as not provided
    pub resource_priority: Option<Vec<i64>>,
}

/// Fully concrete configuration of one optimizer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParameters {
    /// Scenario that took part in resolution, recorded by value on the execution
    pub scenario_id: Option<i64>,
    pub strategy: String,
    pub campaign_window_days: i64,
    pub gravity: bool,
    pub resource_priority: Vec<i64>,
}

/// What the caller of a run gets back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub success: bool,
    pub message: String,
    pub execution_id: i64,
}

/// Exit status and captured output of a finished optimizer process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}
