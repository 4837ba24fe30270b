// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Generic adapter driven by a static [`ToolSpec`].

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use super::process::{ProcessOutput, run_bounded};
use super::{
    RunRequest, TargetMode, ToolAdapter, ToolAvailability, ToolOutcome, ToolSpec,
    format_timeout_message,
};
use crate::check::{CapturedOutput, CheckStatus, MAX_CAPTURE_BYTES};

/// Upper bound on a version probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Bytes of target paths passed to one invocation.
///
/// Well below the smallest common `ARG_MAX` once the environment is counted.
pub const ARG_BUDGET: usize = 100 * 1024;

/// Runs a command-line tool described by a [`ToolSpec`].
#[derive(Debug, Clone)]
pub struct CommandAdapter {
    spec: &'static ToolSpec,
    key: String,
}

impl CommandAdapter {
    pub fn new(spec: &'static ToolSpec) -> Self {
        Self {
            spec,
            key: spec.key(),
        }
    }

    /// Build the check-only command line for one batch of targets.
    ///
    /// Project-mode tools never receive targets.
    pub fn command(&self, root: &Path, batch: &[PathBuf]) -> Command {
        let mut cmd = Command::new(self.spec.program);
        cmd.args(self.spec.args).current_dir(root);
        if self.spec.targets == TargetMode::Files {
            cmd.args(batch);
        }
        cmd
    }

    fn interpret(&self, output: &ProcessOutput, timeout: Duration) -> (CheckStatus, Option<String>) {
        if output.timed_out() {
            return (
                CheckStatus::TimedOut,
                Some(format_timeout_message(self.spec.program, timeout)),
            );
        }

        let captured = CapturedOutput::from_bytes(&output.stdout, &output.stderr);
        let (status, message) = self.spec.exit.classify(output.code(), &captured);
        tracing::debug!(
            "{} exited with {:?} after {:?} -> {}",
            self.spec.program,
            output.code(),
            output.elapsed,
            status
        );
        (status, message)
    }
}

impl ToolAdapter for CommandAdapter {
    fn key(&self) -> &str {
        &self.key
    }

    fn probe(&self) -> ToolAvailability {
        let path = match which::which(self.spec.program) {
            Ok(path) => path,
            Err(_) => {
                return ToolAvailability::Unavailable {
                    reason: format!("{} not found on PATH", self.spec.program),
                };
            }
        };

        // Installed from here on: a failing probe is a broken install, not absence.
        let mut cmd = Command::new(&path);
        cmd.args(self.spec.probe_args);
        let reason = match run_bounded(cmd, PROBE_TIMEOUT) {
            Ok(output) if output.code() == Some(0) => {
                let text = String::from_utf8_lossy(&output.stdout);
                let version = text
                    .lines()
                    .chain(String::from_utf8_lossy(&output.stderr).lines())
                    .map(str::trim)
                    .find(|l| !l.is_empty())
                    .map(str::to_string);
                return ToolAvailability::Available { path, version };
            }
            Ok(output) if output.timed_out() => {
                format!("`{}` did not respond within {:?}", self.key, PROBE_TIMEOUT)
            }
            Ok(output) => {
                let captured = CapturedOutput::from_bytes(&output.stdout, &output.stderr);
                let detail = captured
                    .tail(1)
                    .first()
                    .map(|line| format!(": {}", line.trim()))
                    .unwrap_or_default();
                match output.code() {
                    Some(code) => format!("`{}` exited with {}{}", self.key, code, detail),
                    None => format!("`{}` was terminated by a signal", self.key),
                }
            }
            Err(e) => format!("failed to run {}: {}", path.display(), e),
        };
        ToolAvailability::Broken { path, reason }
    }

    fn run(&self, request: &RunRequest<'_>) -> ToolOutcome {
        let batches = match self.spec.targets {
            TargetMode::Files => batches(request.targets, ARG_BUDGET),
            TargetMode::Project => vec![&request.targets[..0]],
        };
        if batches.len() > 1 {
            tracing::debug!(
                "{}: {} targets in {} invocations",
                self.spec.program,
                request.targets.len(),
                batches.len()
            );
        }

        // Every batch shares the check's single deadline.
        let deadline = Instant::now() + request.timeout;
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut worst: Option<(CheckStatus, Option<String>)> = None;

        for batch in batches {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let (status, message) = if remaining.is_zero() {
                (
                    CheckStatus::TimedOut,
                    Some(format_timeout_message(self.spec.program, request.timeout)),
                )
            } else {
                match run_bounded(self.command(request.root, batch), remaining) {
                    Ok(output) => {
                        extend_bounded(&mut stdout, &output.stdout);
                        extend_bounded(&mut stderr, &output.stderr);
                        self.interpret(&output, request.timeout)
                    }
                    Err(e) => (
                        CheckStatus::Error,
                        Some(format!("failed to run {}: {}", self.spec.program, e)),
                    ),
                }
            };

            let stop = matches!(status, CheckStatus::TimedOut | CheckStatus::Error);
            if worst.as_ref().is_none_or(|(w, _)| rank(status) > rank(*w)) {
                worst = Some((status, message));
            }
            if stop {
                break;
            }
        }

        let (status, message) = worst.unwrap_or((CheckStatus::Passed, None));
        let outcome =
            ToolOutcome::new(status).with_output(CapturedOutput::from_bytes(&stdout, &stderr));
        match message {
            Some(m) => outcome.with_message(m),
            None => outcome,
        }
    }
}

/// Split targets into consecutive runs whose paths fit in `budget` bytes.
///
/// Each run holds at least one path, so an oversized path still gets its
/// own invocation.
fn batches(targets: &[PathBuf], budget: usize) -> Vec<&[PathBuf]> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (i, target) in targets.iter().enumerate() {
        let cost = target.as_os_str().len() + 1;
        if i > start && used + cost > budget {
            out.push(&targets[start..i]);
            start = i;
            used = 0;
        }
        used += cost;
    }
    if start < targets.len() || out.is_empty() {
        out.push(&targets[start..]);
    }
    out
}

/// Which batch outcome a multi-invocation run reports.
fn rank(status: CheckStatus) -> u8 {
    match status {
        CheckStatus::SkippedUnavailable | CheckStatus::SkippedNoTargets => 0,
        CheckStatus::Passed => 1,
        CheckStatus::Failed => 2,
        CheckStatus::TimedOut => 3,
        CheckStatus::Error => 4,
    }
}

/// Append, keeping one byte past the capture limit so truncation is visible.
fn extend_bounded(buf: &mut Vec<u8>, bytes: &[u8]) {
    let room = (MAX_CAPTURE_BYTES + 1).saturating_sub(buf.len());
    buf.extend_from_slice(&bytes[..bytes.len().min(room)]);
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
