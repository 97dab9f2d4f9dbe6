//! # Data Layer
//!
//! One module per table. Every query function takes any SQLite executor, so
//! the same call works against the pool or inside an open transaction
//! (`&mut *tx`).

pub mod attribute;
pub mod changeover_data;
pub mod changeover_group;
pub mod changeover_time;
pub mod optimization_scenario;
pub mod optimizer_execution;
pub mod optimizer_setting;

// Re-export core models for easy access
pub use attribute::{Attribute, AttributeParameter, NewAttribute};
pub use changeover_data::{ChangeoverData, MatrixCellKey};
pub use changeover_group::ChangeoverGroup;
pub use changeover_time::ChangeoverTime;
pub use optimization_scenario::{NewOptimizationScenario, OptimizationScenario, ScenarioUpdate};
pub use optimizer_execution::{CompletionMetrics, NewOptimizerExecution, OptimizerExecution};
pub use optimizer_setting::{OptimizerSetting, OptimizerSettingsUpdate};
