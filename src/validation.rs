//! Input validation for run parameters
//!
//! Shared by the scenario registry, the global settings write and the
//! parameter resolver so every entry point rejects the same values.

use crate::error::{OptiplanError, OptiplanResult};

/// Campaign window days may be zero (unset) but never negative
pub fn validate_campaign_window_days(days: Option<i64>) -> OptiplanResult<()> {
    match days {
        Some(days) if days < 0 => Err(OptiplanError::InvalidInput(format!(
            "campaign window days must not be negative, got {days}"
        ))),
        _ => Ok(()),
    }
}

/// Resource ids are non-negative; the persisted codec only round-trips those
pub fn validate_priority_ids(ids: Option<&[i64]>) -> OptiplanResult<()> {
    match ids.and_then(|ids| ids.iter().find(|id| **id < 0)) {
        Some(id) => Err(OptiplanError::InvalidInput(format!(
            "resource priority ids must not be negative, got {id}"
        ))),
        None => Ok(()),
    }
}

/// Setup and changeover durations are minutes, zero allowed
pub fn validate_duration(label: &str, minutes: i64) -> OptiplanResult<()> {
    if minutes < 0 {
        return Err(OptiplanError::InvalidInput(format!(
            "{label} must not be negative, got {minutes}"
        )));
    }
    Ok(())
}
