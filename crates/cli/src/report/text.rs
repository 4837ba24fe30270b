// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text report formatter.
//!
//! ```text
//! python
//!   black         format      PASS  0.4s
//!   ruff          lint        FAIL  0.1s  reported violations (exit 1)
//!     app/main.py:3:1: F401 `os` imported but unused
//!   pytest-smoke  smoke-test  SKIP  0.0s  pytest not found on PATH
//!
//! FAIL: 1 passed, 1 failed, 1 skipped in 0.5s
//! ```

use std::time::Duration;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::{RunReport, Verdict};
use crate::check::{CheckResult, CheckStatus, Severity};
use crate::color::scheme;

/// Diagnostic lines shown under a failing check.
pub const DIAGNOSTIC_LINES: usize = 20;

/// Text formatting options.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Show captured diagnostics of failing advisory checks.
    pub show_advisory: bool,
    /// Trailing lines of captured output to show per failure.
    pub diagnostic_lines: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            show_advisory: true,
            diagnostic_lines: DIAGNOSTIC_LINES,
        }
    }
}

/// Text report formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    options: TextOptions,
}

impl TextFormatter<StandardStream> {
    pub fn stdout(color_choice: ColorChoice, options: TextOptions) -> Self {
        Self::new(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W, options: TextOptions) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the whole report: every language, every check, then the summary.
    pub fn write(&mut self, report: &RunReport) -> std::io::Result<()> {
        if report.languages.is_empty() {
            writeln!(self.out, "No supported languages detected.")?;
        }

        for language in &report.languages {
            let name_width = language
                .results
                .iter()
                .map(|r| r.check.name.len())
                .max()
                .unwrap_or(0);

            self.out.set_color(&scheme::language())?;
            write!(self.out, "{}", language.language)?;
            self.out.reset()?;
            writeln!(self.out)?;

            for result in &language.results {
                self.write_check(result, name_width, report.strict)?;
            }
        }

        writeln!(self.out)?;
        self.write_summary(report)
    }

    fn write_check(
        &mut self,
        result: &CheckResult,
        name_width: usize,
        strict: bool,
    ) -> std::io::Result<()> {
        let advisory = result.check.effective_severity(strict) == Severity::Advisory;

        self.out.set_color(&scheme::check_name())?;
        write!(self.out, "  {:<width$}", result.check.name, width = name_width)?;
        self.out.reset()?;
        write!(self.out, "  {:<10}  ", result.check.kind.as_str())?;

        self.out.set_color(&status_color(result.status, advisory))?;
        write!(self.out, "{:<7}", result.status.label())?;
        self.out.reset()?;

        write!(self.out, " {}", format_duration(result.duration))?;
        if advisory {
            write!(self.out, "  (advisory)")?;
        }
        if let Some(message) = &result.message {
            write!(self.out, "  {}", message)?;
        }
        writeln!(self.out)?;

        if result.status.is_failure() && (!advisory || self.options.show_advisory) {
            self.write_diagnostics(result)?;
        }
        Ok(())
    }

    fn write_diagnostics(&mut self, result: &CheckResult) -> std::io::Result<()> {
        let tail = result.output.tail(self.options.diagnostic_lines);
        self.out.set_color(&scheme::diagnostic())?;
        for line in tail {
            writeln!(self.out, "    {}", line)?;
        }
        if result.output.truncated {
            writeln!(self.out, "    (output truncated)")?;
        }
        self.out.reset()
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, report: &RunReport) -> std::io::Result<()> {
        let counts = report.counts();

        match report.verdict {
            Verdict::Pass => self.out.set_color(&scheme::pass())?,
            Verdict::Fail => self.out.set_color(&scheme::fail())?,
        }
        write!(self.out, "{}", report.verdict.as_str().to_ascii_uppercase())?;
        self.out.reset()?;

        write!(
            self.out,
            ": {} passed, {} failed, {} skipped",
            counts.passed, counts.failed, counts.skipped
        )?;
        if counts.timed_out > 0 {
            write!(self.out, ", {} timed out", counts.timed_out)?;
        }
        if counts.errors > 0 {
            write!(
                self.out,
                ", {} error{}",
                counts.errors,
                if counts.errors == 1 { "" } else { "s" }
            )?;
        }
        let advisory = report.advisory_failures();
        if advisory > 0 {
            write!(self.out, " ({} advisory)", advisory)?;
        }
        writeln!(self.out, " in {}", format_duration(report.duration))
    }
}

/// One-decimal seconds, e.g. `1.2s`.
pub fn format_duration(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}

fn status_color(status: CheckStatus, advisory: bool) -> termcolor::ColorSpec {
    match status {
        CheckStatus::Passed => scheme::pass(),
        CheckStatus::SkippedUnavailable | CheckStatus::SkippedNoTargets => scheme::skip(),
        _ if advisory => scheme::warn(),
        _ => scheme::fail(),
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
