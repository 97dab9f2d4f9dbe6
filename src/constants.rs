//! # System Constants
//!
//! Fallback run parameters, the optimizer output marker and persisted status
//! names shared by the resolver, the orchestrator and the models.

/// Hard-coded run parameter fallbacks, used when neither the request, the
/// scenario nor the global settings provide a value
pub mod fallback {
    pub const STRATEGY: &str = "balanced";
    pub const CAMPAIGN_WINDOW_DAYS: i64 = 0;
    pub const GRAVITY: bool = true;
}

/// External optimizer contract
pub mod optimizer {
    /// Marker line the optimizer prints with its result record count
    pub const PROCESSED_COUNT_PATTERN: &str = r"PROCESSED_COUNT:\s*(\d+)";

    pub const CAMPAIGN_WINDOW_DAYS_FLAG: &str = "--campaign_window_days";
    pub const GRAVITY_FLAG: &str = "--gravity";
    pub const NO_GRAVITY_FLAG: &str = "--no-gravity";
    pub const RESOURCE_PRIORITY_FLAG: &str = "--resource_priority";

    pub const PYTHON_IO_ENCODING: (&str, &str) = ("PYTHONIOENCODING", "utf-8");

    /// Literal prefix of the marker line, kept when captured output is truncated
    pub const PROCESSED_COUNT_MARKER: &str = "PROCESSED_COUNT";

    /// Default cap on the bytes captured from each output stream (10 MiB)
    pub const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;
}

pub mod system {
    /// Default bound on the execution history listing
    pub const EXECUTION_HISTORY_LIMIT: u32 = 50;

    /// Primary key of the optimizer settings singleton row
    pub const OPTIMIZER_SETTING_ID: i64 = 1;

    /// Separator of the persisted resource priority list
    pub const PRIORITY_DELIMITER: char = ',';
}

/// Caller-facing messages of structured results
pub mod messages {
    pub const GROUP_DELETED: &str = "Changeover Group deleted";
    pub const GROUP_NOT_FOUND: &str = "Changeover group not found";
    pub const BASELINE_DELETED: &str =
        "Attribute and all associated matrix data removed from group.";
    pub const RECORD_NOT_FOUND: &str = "Record not found";
    pub const CELL_DELETED: &str = "Changeover data deleted.";
    pub const SCENARIO_NAME_TAKEN: &str = "A scenario with this name already exists.";
    pub const SCENARIO_DELETED: &str = "Scenario deleted successfully.";
    pub const SCENARIO_NOT_FOUND: &str = "Scenario not found";
    pub const SCENARIO_DEFAULT_SET: &str = "Scenario set as default successfully.";
    pub const RUN_SUCCEEDED: &str = "Optimizer finished successfully.";
}
