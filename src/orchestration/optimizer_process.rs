//! # Optimizer Process
//!
//! Launches the external optimizer as a child process with discrete
//! arguments (no shell), captures stdout and stderr concurrently and waits
//! for the exit status.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::output::build_arguments;
use super::types::{ProcessOutcome, ResolvedParameters};
use crate::config::OptimizerProcessConfig;
use crate::constants::optimizer;
use crate::error::{OptiplanError, OptiplanResult};

/// Seam between the run orchestrator and whatever actually runs the optimizer
#[async_trait]
pub trait OptimizerLauncher: Send + Sync {
    /// Run the optimizer to completion.
    ///
    /// A non-zero exit is an `Ok` outcome; `Err` means the process could not
    /// be started or its output could not be collected.
    async fn launch(
        &self,
        execution_id: i64,
        params: &ResolvedParameters,
    ) -> OptiplanResult<ProcessOutcome>;
}

/// Launcher backed by `tokio::process`
#[derive(Debug, Clone)]
pub struct ProcessOptimizerLauncher {
    config: OptimizerProcessConfig,
}

impl ProcessOptimizerLauncher {
    pub fn new(config: OptimizerProcessConfig) -> Self {
        Self { config }
    }

    fn command(&self, params: &ResolvedParameters) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .args(build_arguments(params))
            .env(optimizer::PYTHON_IO_ENCODING.0, optimizer::PYTHON_IO_ENCODING.1)
            .envs(&self.config.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.config.working_directory {
            command.current_dir(dir);
        }

        command
    }
}

#[async_trait]
impl OptimizerLauncher for ProcessOptimizerLauncher {
    async fn launch(
        &self,
        execution_id: i64,
        params: &ResolvedParameters,
    ) -> OptiplanResult<ProcessOutcome> {
        let mut child = self.command(params).spawn().map_err(|e| {
            OptiplanError::ExternalProcessFailure(format!(
                "failed to start {}: {e}",
                self.config.program
            ))
        })?;

        info!(
            execution_id = execution_id,
            pid = child.id(),
            program = %self.config.program,
            strategy = %params.strategy,
            "Optimizer process started"
        );

        let stdout = child.stdout.take().ok_or_else(|| {
            OptiplanError::Internal("optimizer stdout was not captured".to_string())
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            OptiplanError::Internal("optimizer stderr was not captured".to_string())
        })?;

        let limit = self.config.max_output_bytes;
        let (stdout, stderr, status) = futures::try_join!(
            collect_stream(stdout, "stdout", execution_id, limit),
            collect_stream(stderr, "stderr", execution_id, limit),
            child.wait(),
        )
        .map_err(|e| OptiplanError::ExternalProcessFailure(e.to_string()))?;

        debug!(
            execution_id = execution_id,
            exit_code = status.code(),
            "Optimizer process exited"
        );

        Ok(ProcessOutcome {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    }
}

/// Read a stream to its end, logging each complete line as it arrives.
///
/// A chunk without a trailing newline stays buffered until the newline or
/// end of stream shows up, so lines are never split across log events.
/// At most `limit` bytes are kept, the oldest dropped first; the first
/// `PROCESSED_COUNT` line survives truncation.
async fn collect_stream<R>(
    reader: R,
    stream: &'static str,
    execution_id: i64,
    limit: usize,
) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut captured = Vec::new();
    let mut line = Vec::new();
    let mut marker_line: Option<Vec<u8>> = None;
    let mut dropped = 0usize;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        let text = String::from_utf8_lossy(&line);
        debug!(
            execution_id = execution_id,
            stream = stream,
            line = %text.trim_end(),
            "optimizer output"
        );

        if marker_line.is_none() && text.contains(optimizer::PROCESSED_COUNT_MARKER) {
            marker_line = Some(line.clone());
        }

        captured.extend_from_slice(&line);
        if captured.len() > limit {
            let excess = captured.len() - limit;
            captured.drain(..excess);
            dropped += excess;
        }
    }

    if dropped > 0 {
        warn!(
            execution_id = execution_id,
            stream = stream,
            dropped_bytes = dropped,
            limit = limit,
            "Optimizer output exceeded the capture limit, oldest output dropped"
        );

        if let Some(mut marker) = marker_line {
            if !captured.windows(marker.len()).any(|window| window == marker.as_slice()) {
                if !marker.ends_with(b"\n") {
                    marker.push(b'\n');
                }
                marker.extend_from_slice(&captured);
                captured = marker;
            }
        }
    }

    Ok(String::from_utf8_lossy(&captured).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_stream_keeps_partial_last_line() {
        let input: &[u8] = b"first\nsecond\npartial";
        let captured = collect_stream(input, "stdout", 1, 1024).await.unwrap();
        assert_eq!(captured, "first\nsecond\npartial");
    }

    #[tokio::test]
    async fn test_collect_stream_keeps_tail_within_limit() {
        let input: &[u8] = b"aaaa\nbbbb\ncccc\n";
        let captured = collect_stream(input, "stderr", 1, 10).await.unwrap();
        assert_eq!(captured, "bbbb\ncccc\n");
    }

    #[tokio::test]
    async fn test_collect_stream_keeps_marker_line_when_truncated() {
        let input: &[u8] = b"PROCESSED_COUNT: 12\nnoise noise noise\nmore noise here\n";
        let captured = collect_stream(input, "stdout", 1, 16).await.unwrap();

        assert!(captured.starts_with("PROCESSED_COUNT: 12\n"));
        assert!(captured.ends_with("more noise here\n"));
        assert_eq!(crate::orchestration::output::parse_processed_count(&captured), 12);
    }

    #[tokio::test]
    async fn test_spawn_failure_is_external_process_failure() {
        let launcher = ProcessOptimizerLauncher::new(OptimizerProcessConfig {
            program: "/nonexistent/optimizer-binary".to_string(),
            args: vec![],
            working_directory: None,
            env: Default::default(),
            max_output_bytes: 1024,
        });
        let params = ResolvedParameters {
            scenario_id: None,
            strategy: "balanced".to_string(),
            campaign_window_days: 0,
            gravity: true,
            resource_priority: vec![],
        };

        let err = launcher.launch(1, &params).await.unwrap_err();
        assert!(matches!(err, OptiplanError::ExternalProcessFailure(_)));
    }
}
