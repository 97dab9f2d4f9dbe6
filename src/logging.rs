//! # Structured Logging Module
//!
//! Environment-aware structured logging for optimizer runs and changeover
//! maintenance. Console output by default, JSON lines when
//! `OPTIPLAN_LOG_FORMAT=json`.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));
        let json = std::env::var("OPTIPLAN_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let layer = if json {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // Another subscriber (e.g. a test harness) may already be installed
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("OPTIPLAN_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log a lifecycle event of an optimizer execution
pub fn log_execution_event(
    execution_id: i64,
    status: &str,
    record_count: Option<i64>,
    duration_seconds: Option<f64>,
    details: Option<&str>,
) {
    tracing::info!(
        execution_id = execution_id,
        status = %status,
        record_count = record_count,
        duration_seconds = duration_seconds,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "OPTIMIZER_EXECUTION"
    );
}

/// Log a write against the changeover matrix
pub fn log_matrix_operation(
    operation: &str,
    changeover_group_id: i64,
    attribute_id: Option<i64>,
    record_id: Option<i64>,
    status: &str,
) {
    tracing::info!(
        operation = %operation,
        changeover_group_id = changeover_group_id,
        attribute_id = attribute_id,
        record_id = record_id,
        status = %status,
        "CHANGEOVER_MATRIX"
    );
}
