//! Shared helpers used across models and orchestration.

pub mod priority;
pub mod serde;
