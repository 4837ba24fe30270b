// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel check runner with error recovery.
//!
//! Languages run in parallel on a bounded rayon pool. Checks within a
//! language run sequentially in declaration order, and a failing check never
//! skips a later one. A panicking adapter is recorded as an `error` result
//! for that check alone.

use std::collections::{BTreeMap, HashMap};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::adapter::{RunRequest, ToolAdapter, ToolAvailability, ToolOutcome};
use crate::check::{CheckResult, CheckStatus};
use crate::error::{Error, Result};
use crate::options::RunOptions;
use crate::registry::{LanguagePlan, RegisteredCheck};
use crate::report::LanguageResults;

/// Tool availability keyed by adapter key. Built once, then read-only.
pub type Availability = HashMap<String, ToolAvailability>;

/// Executes a plan of checks.
pub struct CheckRunner {
    options: RunOptions,
}

impl CheckRunner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Run every planned check and return results in language order.
    ///
    /// Produces exactly one result per planned check.
    pub fn run(&self, plans: &[LanguagePlan]) -> Result<Vec<LanguageResults>> {
        if plans.is_empty() {
            return Ok(Vec::new());
        }

        let jobs = self.options.jobs_for(plans.len());
        tracing::debug!("running {} languages on {} workers", plans.len(), jobs);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("bronze-worker-{i}"))
            .build()
            .map_err(|e| Error::Internal(format!("cannot start worker pool: {e}")))?;

        let mut results = pool.install(|| {
            let availability = probe_all(plans);
            plans
                .par_iter()
                .map(|plan| self.run_language(plan, &availability))
                .collect::<Vec<_>>()
        });

        results.sort_by_key(|r| r.language.index());
        Ok(results)
    }

    fn run_language(&self, plan: &LanguagePlan, availability: &Availability) -> LanguageResults {
        let results = plan
            .checks
            .iter()
            .map(|entry| self.run_check(entry, &plan.targets, availability))
            .collect();
        LanguageResults {
            language: plan.language,
            results,
        }
    }

    fn run_check(
        &self,
        entry: &RegisteredCheck,
        targets: &[PathBuf],
        availability: &Availability,
    ) -> CheckResult {
        let check = entry.check;

        match availability.get(entry.adapter.key()) {
            Some(ToolAvailability::Available { .. }) => {}
            Some(ToolAvailability::Unavailable { reason }) => {
                tracing::debug!("{}: skipped, {}", check.name, reason);
                return CheckResult::new(check, CheckStatus::SkippedUnavailable, Duration::ZERO)
                    .with_message(reason.clone());
            }
            Some(ToolAvailability::Broken { path, reason }) => {
                tracing::debug!("{}: {} is broken, {}", check.name, path.display(), reason);
                return CheckResult::new(check, CheckStatus::Error, Duration::ZERO)
                    .with_message(format!("tool is installed but not working: {reason}"));
            }
            None => {
                return CheckResult::new(check, CheckStatus::Error, Duration::ZERO)
                    .with_message(format!("internal error: {} was never probed", check.name));
            }
        }

        if targets.is_empty() {
            tracing::debug!("{}: skipped, no {} files", check.name, check.language);
            return CheckResult::new(check, CheckStatus::SkippedNoTargets, Duration::ZERO)
                .with_message(format!("no {} files to check", check.language));
        }

        let request = RunRequest {
            root: &self.options.root,
            targets,
            timeout: self.options.timeout_for(&check),
        };

        tracing::trace!("{}: starting ({} targets)", check.name, targets.len());
        let start = Instant::now();
        let outcome = invoke(entry.adapter.as_ref(), &request);
        let duration = start.elapsed();
        tracing::debug!("{}: {} in {:?}", check.name, outcome.status, duration);

        let result = CheckResult::new(check, outcome.status, duration).with_output(outcome.output);
        match outcome.message {
            Some(message) => result.with_message(message),
            None => result,
        }
    }
}

/// Run an adapter, converting a panic into an `error` outcome.
fn invoke(adapter: &dyn ToolAdapter, request: &RunRequest<'_>) -> ToolOutcome {
    match catch_unwind(AssertUnwindSafe(|| adapter.run(request))) {
        Ok(outcome) => outcome,
        Err(_) => ToolOutcome::new(CheckStatus::Error)
            .with_message("internal error: adapter panicked"),
    }
}

/// Probe each distinct tool once, in parallel.
pub fn probe_all(plans: &[LanguagePlan]) -> Availability {
    let mut adapters: BTreeMap<&str, Arc<dyn ToolAdapter>> = BTreeMap::new();
    for entry in plans.iter().flat_map(|p| &p.checks) {
        adapters
            .entry(entry.adapter.key())
            .or_insert_with(|| Arc::clone(&entry.adapter));
    }

    adapters
        .into_par_iter()
        .map(|(key, adapter)| {
            let availability = catch_unwind(AssertUnwindSafe(|| adapter.probe())).unwrap_or_else(
                |_| ToolAvailability::Unavailable {
                    reason: "availability probe panicked".to_string(),
                },
            );
            match &availability {
                ToolAvailability::Available { path, version } => tracing::debug!(
                    "probe {}: {} ({})",
                    key,
                    path.display(),
                    version.as_deref().unwrap_or("unknown version")
                ),
                ToolAvailability::Unavailable { reason } => {
                    tracing::debug!("probe {}: unavailable, {}", key, reason)
                }
                ToolAvailability::Broken { path, reason } => {
                    tracing::warn!("probe {}: {} is broken, {}", key, path.display(), reason)
                }
            }
            (key.to_string(), availability)
        })
        .collect()
}

/// Root-relative display of a plan, used by `--list`.
pub fn describe_plan(plans: &[LanguagePlan], root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for plan in plans {
        let n = plan.targets.len();
        lines.push(format!(
            "{} ({} file{} under {})",
            plan.language,
            n,
            if n == 1 { "" } else { "s" },
            root.display()
        ));
        for entry in &plan.checks {
            lines.push(format!(
                "  {:<18} {:<10} {:<8} {}",
                entry.check.name,
                entry.check.kind.as_str(),
                entry.check.severity.as_str(),
                entry.check.tool.command_line()
            ));
        }
    }
    lines
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
