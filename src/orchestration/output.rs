//! Command-line arguments passed to the optimizer and parsing of what it prints back.

use regex::Regex;
use std::sync::OnceLock;

use super::types::{ProcessOutcome, ResolvedParameters};
use crate::constants::optimizer;
use crate::utils::priority;

static PROCESSED_COUNT: OnceLock<Option<Regex>> = OnceLock::new();

/// Arguments following the configured program and script.
///
/// The strategy goes first as a positional argument. The campaign window is
/// passed only when positive and the priority list only when non-empty;
/// gravity always appears as one of its two flags.
pub fn build_arguments(params: &ResolvedParameters) -> Vec<String> {
    let mut args = vec![params.strategy.clone()];

    if params.campaign_window_days > 0 {
        args.push(optimizer::CAMPAIGN_WINDOW_DAYS_FLAG.to_string());
        args.push(params.campaign_window_days.to_string());
    }

    args.push(if params.gravity {
        optimizer::GRAVITY_FLAG.to_string()
    } else {
        optimizer::NO_GRAVITY_FLAG.to_string()
    });

    if !params.resource_priority.is_empty() {
        args.push(optimizer::RESOURCE_PRIORITY_FLAG.to_string());
        args.push(priority::encode(&params.resource_priority));
    }

    args
}

/// Record count reported by the optimizer on stdout, `0` when absent or unreadable
pub fn parse_processed_count(stdout: &str) -> i64 {
    let Some(pattern) = PROCESSED_COUNT
        .get_or_init(|| Regex::new(optimizer::PROCESSED_COUNT_PATTERN).ok())
        .as_ref()
    else {
        return 0;
    };

    pattern
        .captures(stdout)
        .and_then(|captures| captures.get(1))
        .and_then(|count| count.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Error text recorded for a process that did not exit cleanly
pub fn failure_detail(outcome: &ProcessOutcome) -> String {
    let stderr = outcome.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }

    match outcome.exit_code {
        Some(code) => format!("Process exited with code {code}"),
        None => "Process terminated by signal".to_string(),
    }
}
