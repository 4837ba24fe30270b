// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run aggregation and reporting.
//!
//! A [`RunReport`] is built once from the runner's results and never
//! mutated. The verdict and exit code are pure functions of the results,
//! strict mode, and the advisory exit policy.

pub mod json;
pub mod text;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::check::{CheckResult, CheckStatus};
use crate::error::ExitCode;
use crate::language::Language;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to exit with when only advisory checks failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AdvisoryExit {
    /// Exit 0.
    #[default]
    Pass,
    /// Exit 3 so CI can flag the run without failing it.
    Soft,
}

impl FromStr for AdvisoryExit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(AdvisoryExit::Pass),
            "soft" => Ok(AdvisoryExit::Soft),
            _ => Err(format!("unknown advisory exit policy `{s}` (use pass or soft)")),
        }
    }
}

/// Results of one language, in check declaration order.
#[derive(Debug, Clone)]
pub struct LanguageResults {
    pub language: Language,
    pub results: Vec<CheckResult>,
}

/// Status counts over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub timed_out: usize,
    pub errors: usize,
}

impl Counts {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.timed_out + self.errors
    }
}

/// Verdict over a set of results: fail iff an effectively blocking check
/// failed, timed out, or errored.
pub fn verdict_of<'a>(results: impl IntoIterator<Item = &'a CheckResult>, strict: bool) -> Verdict {
    if results.into_iter().any(|r| r.is_blocking_failure(strict)) {
        Verdict::Fail
    } else {
        Verdict::Pass
    }
}

/// Immutable summary of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub verdict: Verdict,
    pub strict: bool,
    /// Ordered by language declaration order.
    pub languages: Vec<LanguageResults>,
    pub duration: Duration,
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
}

impl RunReport {
    pub fn build(
        mut languages: Vec<LanguageResults>,
        strict: bool,
        generated_at: String,
        duration: Duration,
    ) -> Self {
        languages.sort_by_key(|l| l.language.index());
        let verdict = verdict_of(languages.iter().flat_map(|l| &l.results), strict);
        Self {
            verdict,
            strict,
            languages,
            duration,
            generated_at,
        }
    }

    /// Every result in report order.
    pub fn results(&self) -> impl Iterator<Item = &CheckResult> {
        self.languages.iter().flat_map(|l| l.results.iter())
    }

    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for result in self.results() {
            match result.status {
                CheckStatus::Passed => counts.passed += 1,
                CheckStatus::Failed => counts.failed += 1,
                CheckStatus::SkippedUnavailable | CheckStatus::SkippedNoTargets => {
                    counts.skipped += 1
                }
                CheckStatus::TimedOut => counts.timed_out += 1,
                CheckStatus::Error => counts.errors += 1,
            }
        }
        counts
    }

    pub fn advisory_failures(&self) -> usize {
        self.results()
            .filter(|r| r.is_advisory_failure(self.strict))
            .count()
    }

    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }

    /// Process exit code for this report.
    pub fn exit_code(&self, policy: AdvisoryExit) -> ExitCode {
        match (self.verdict, policy) {
            (Verdict::Fail, _) => ExitCode::CheckFailed,
            (Verdict::Pass, AdvisoryExit::Soft) if self.advisory_failures() > 0 => {
                ExitCode::AdvisoryFailed
            }
            (Verdict::Pass, _) => ExitCode::Success,
        }
    }
}

/// Current time as an RFC 3339 UTC timestamp.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
