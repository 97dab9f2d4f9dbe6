//! # Error Types
//!
//! Structured error handling for the changeover store, the scenario registry
//! and the optimizer run orchestrator.
//!
//! Create and update operations surface typed [`OptiplanError`]s so callers can
//! tell "not found" from "conflict" from "internal". Deletes and default
//! toggles report through [`OperationResult`] instead of failing the caller.

use crate::config::ConfigurationError;
use crate::state_machine::StateMachineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptiplanError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External process failure: {0}")]
    ExternalProcessFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    StateMachine(#[from] StateMachineError),
}

/// Coarse classification used by callers to render feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    ExternalProcessFailure,
    Internal,
}

impl OptiplanError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::ExternalProcessFailure(_) => ErrorKind::ExternalProcessFailure,
            Self::Internal(_)
            | Self::Database(_)
            | Self::Configuration(_)
            | Self::StateMachine(_) => ErrorKind::Internal,
        }
    }

    /// Map a unique-constraint violation to `Conflict`, everything else to `Database`.
    pub fn from_write_error(error: sqlx::Error, conflict_message: &str) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::Conflict(conflict_message.to_string())
            }
            _ => Self::Database(error),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::InvalidInput => write!(f, "invalid_input"),
            Self::ExternalProcessFailure => write!(f, "external_process_failure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

pub type OptiplanResult<T> = std::result::Result<T, OptiplanError>;

/// Success/message envelope returned by delete-style operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
}

impl OperationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
