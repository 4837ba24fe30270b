// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check definitions and result types.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::adapter::ToolSpec;
use crate::language::Language;

/// Maximum bytes kept per captured stream.
pub const MAX_CAPTURE_BYTES: usize = 64 * 1024;

/// What a check verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    /// Formatting verification (never rewrites files).
    Format,
    /// Static lint.
    Lint,
    /// Fast smoke tests.
    SmokeTest,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [CheckKind::Format, CheckKind::Lint, CheckKind::SmokeTest];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::Format => "format",
            CheckKind::Lint => "lint",
            CheckKind::SmokeTest => "smoke-test",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "format" => Ok(CheckKind::Format),
            "lint" => Ok(CheckKind::Lint),
            "smoke-test" | "smoke" => Ok(CheckKind::SmokeTest),
            _ => Err(format!("unknown check kind `{s}`")),
        }
    }
}

/// Whether a failure gates the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocking,
    Advisory,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Blocking => "blocking",
            Severity::Advisory => "advisory",
        }
    }
}

/// A statically registered unit of work.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    /// Unique identifier (e.g., "ruff", "dart-format").
    pub name: &'static str,
    pub language: Language,
    pub kind: CheckKind,
    /// Command template for the wrapped tool.
    pub tool: &'static ToolSpec,
    /// Default timeout; always non-zero.
    pub timeout: Duration,
    pub severity: Severity,
}

impl Check {
    /// Severity after applying strict mode.
    pub fn effective_severity(&self, strict: bool) -> Severity {
        if strict {
            Severity::Blocking
        } else {
            self.severity
        }
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckStatus {
    Passed,
    Failed,
    SkippedUnavailable,
    SkippedNoTargets,
    TimedOut,
    Error,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
            CheckStatus::SkippedUnavailable => "skipped-unavailable",
            CheckStatus::SkippedNoTargets => "skipped-no-targets",
            CheckStatus::TimedOut => "timed-out",
            CheckStatus::Error => "error",
        }
    }

    /// Short uppercase label for text output.
    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Passed => "PASS",
            CheckStatus::Failed => "FAIL",
            CheckStatus::SkippedUnavailable | CheckStatus::SkippedNoTargets => "SKIP",
            CheckStatus::TimedOut => "TIMEOUT",
            CheckStatus::Error => "ERROR",
        }
    }

    /// Failed, timed out, or errored.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            CheckStatus::Failed | CheckStatus::TimedOut | CheckStatus::Error
        )
    }

    pub fn is_skipped(self) -> bool {
        matches!(
            self,
            CheckStatus::SkippedUnavailable | CheckStatus::SkippedNoTargets
        )
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounded stdout/stderr of a tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    /// True if either stream exceeded [`MAX_CAPTURE_BYTES`].
    pub truncated: bool,
}

impl CapturedOutput {
    /// Build from raw bytes, cutting each stream at [`MAX_CAPTURE_BYTES`].
    pub fn from_bytes(stdout: &[u8], stderr: &[u8]) -> Self {
        let (stdout, cut_out) = bounded_lossy(stdout);
        let (stderr, cut_err) = bounded_lossy(stderr);
        Self {
            stdout,
            stderr,
            truncated: cut_out || cut_err,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.trim().is_empty() && self.stderr.trim().is_empty()
    }

    /// Last `n` non-blank lines, stderr after stdout.
    pub fn tail(&self, n: usize) -> Vec<&str> {
        let lines: Vec<&str> = self
            .stdout
            .lines()
            .chain(self.stderr.lines())
            .filter(|l| !l.trim().is_empty())
            .collect();
        let skip = lines.len().saturating_sub(n);
        lines[skip..].to_vec()
    }
}

fn bounded_lossy(bytes: &[u8]) -> (String, bool) {
    if bytes.len() <= MAX_CAPTURE_BYTES {
        (String::from_utf8_lossy(bytes).into_owned(), false)
    } else {
        (
            String::from_utf8_lossy(&bytes[..MAX_CAPTURE_BYTES]).into_owned(),
            true,
        )
    }
}

/// Result of running a single check. Produced exactly once per selected check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub check: Check,
    pub status: CheckStatus,
    pub duration: Duration,
    /// One-line explanation (skip reason, timeout, error cause).
    pub message: Option<String>,
    pub output: CapturedOutput,
}

impl CheckResult {
    pub fn new(check: Check, status: CheckStatus, duration: Duration) -> Self {
        Self {
            check,
            status,
            duration,
            message: None,
            output: CapturedOutput::default(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_output(mut self, output: CapturedOutput) -> Self {
        self.output = output;
        self
    }

    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }

    /// Whether this result forces a failing verdict.
    pub fn is_blocking_failure(&self, strict: bool) -> bool {
        self.status.is_failure() && self.check.effective_severity(strict) == Severity::Blocking
    }

    /// Failure that does not gate the verdict.
    pub fn is_advisory_failure(&self, strict: bool) -> bool {
        self.status.is_failure() && self.check.effective_severity(strict) == Severity::Advisory
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
