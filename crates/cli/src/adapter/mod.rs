// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tool adapters wrap external formatters, linters, and test runners.
//!
//! An adapter knows how to probe for its tool, how to invoke it in
//! check-only mode, and how to map the tool's exit code onto a
//! [`CheckStatus`]. The runner only talks to the [`ToolAdapter`] trait.
//!
//! ## Adding a tool
//!
//! Most tools fit [`CommandAdapter`]: declare a [`ToolSpec`] in `tools.rs`
//! with the program, check-only arguments, target mode, and exit-code
//! convention, then register a check for it. Tools whose behavior does not
//! fit a spec implement [`ToolAdapter`] directly.

use std::path::{Path, PathBuf};
use std::time::Duration;

mod command;
pub mod process;
pub mod tools;

pub use command::{CommandAdapter, PROBE_TIMEOUT};

use crate::check::{CapturedOutput, CheckStatus};

/// Whether a tool can be invoked on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolAvailability {
    Available {
        path: PathBuf,
        /// First line of the version output, if any.
        version: Option<String>,
    },
    /// Not resolvable on PATH.
    Unavailable {
        reason: String,
    },
    /// Resolvable, but the version invocation failed or hung.
    Broken {
        path: PathBuf,
        reason: String,
    },
}

/// Inputs for one tool invocation.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    /// Project root; the tool runs with this as its working directory.
    pub root: &'a Path,
    /// Target files relative to `root`. Never empty.
    pub targets: &'a [PathBuf],
    pub timeout: Duration,
}

/// What an adapter observed when running its tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub status: CheckStatus,
    pub message: Option<String>,
    pub output: CapturedOutput,
}

impl ToolOutcome {
    pub fn new(status: CheckStatus) -> Self {
        Self {
            status,
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
}

/// Capability interface for an external checking tool.
///
/// Implementations must not panic or error when the tool is absent:
/// an unavailable tool is reported through [`ToolAdapter::probe`].
pub trait ToolAdapter: Send + Sync {
    /// Identity used to cache availability (one probe per key per run).
    fn key(&self) -> &str;

    /// Resolve the tool without side effects beyond a version invocation.
    fn probe(&self) -> ToolAvailability;

    /// Invoke the tool in check-only mode and interpret its result.
    fn run(&self, request: &RunRequest<'_>) -> ToolOutcome;
}

/// Which paths a tool receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Target files are appended to the argument list.
    Files,
    /// The tool discovers its own inputs from the project root.
    Project,
}

/// How a tool reports its result through its exit code.
///
/// Exit code 0 is success; anything not listed is an invocation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitConvention {
    /// Codes meaning "ran correctly and reported violations".
    pub violations: &'static [i32],
    /// Codes meaning "nothing to check" (e.g. no tests collected).
    pub no_targets: &'static [i32],
    /// Tool exits 0 but lists offending files on stdout (gofmt -l).
    pub output_is_violation: bool,
}

impl ExitConvention {
    /// 0 = pass, 1 = violations.
    pub const STANDARD: ExitConvention = ExitConvention {
        violations: &[1],
        no_targets: &[],
        output_is_violation: false,
    };

    /// Map an exit code (None = killed by signal) onto a status.
    pub fn classify(&self, code: Option<i32>, output: &CapturedOutput) -> (CheckStatus, Option<String>) {
        match code {
            None => (
                CheckStatus::Error,
                Some("terminated by signal".to_string()),
            ),
            Some(0) if self.output_is_violation && !output.stdout.trim().is_empty() => (
                CheckStatus::Failed,
                Some("reported files needing changes".to_string()),
            ),
            Some(0) => (CheckStatus::Passed, None),
            Some(c) if self.violations.contains(&c) => (
                CheckStatus::Failed,
                Some(format!("reported violations (exit {c})")),
            ),
            Some(c) if self.no_targets.contains(&c) => (
                CheckStatus::SkippedNoTargets,
                Some(format!("nothing to check (exit {c})")),
            ),
            Some(c) => (
                CheckStatus::Error,
                Some(format!("unexpected exit code {c}")),
            ),
        }
    }
}

/// Static command template for one external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    /// Executable name resolved on PATH.
    pub program: &'static str,
    /// Check-only arguments (never auto-fix).
    pub args: &'static [&'static str],
    /// Arguments for the availability probe (usually `--version`).
    pub probe_args: &'static [&'static str],
    pub targets: TargetMode,
    pub exit: ExitConvention,
}

impl ToolSpec {
    /// Cache key: the program plus its probe arguments.
    ///
    /// `cargo fmt` and `cargo clippy` share a program but not a key.
    pub fn key(&self) -> String {
        std::iter::once(self.program)
            .chain(self.probe_args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Human-readable command line without targets.
    pub fn command_line(&self) -> String {
        let mut line = std::iter::once(self.program)
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        if self.targets == TargetMode::Files {
            line.push_str(" <files>");
        }
        line
    }
}

/// Format a timeout message with tool-specific advice.
pub fn format_timeout_message(program: &str, timeout: Duration) -> String {
    let advice = match program {
        "pytest" | "dart" | "go" | "cargo" => "check for hanging tests or slow fixtures",
        _ => "check for very large inputs or a hung tool",
    };
    format!("timed out after {:?} - {}", timeout, advice)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
