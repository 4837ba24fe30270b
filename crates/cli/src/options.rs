// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run options resolved once from CLI flags and the config file.
//!
//! Precedence: CLI flag > config file > built-in default.

use std::path::PathBuf;
use std::time::Duration;

use crate::check::Check;
use crate::cli::Cli;
use crate::config::Config;
use crate::registry::Selection;
use crate::report::AdvisoryExit;
use crate::walker::WalkerConfig;

/// Immutable options for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root: PathBuf,
    pub selection: Selection,
    /// Overrides every check's default timeout when set.
    pub timeout: Option<Duration>,
    /// Worker-pool size; `None` picks one from the plan.
    pub jobs: Option<usize>,
    pub strict: bool,
    pub show_advisory: bool,
    pub advisory_exit: AdvisoryExit,
    pub walker: WalkerConfig,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            selection: Selection::default(),
            timeout: None,
            jobs: None,
            strict: false,
            show_advisory: true,
            advisory_exit: AdvisoryExit::default(),
            walker: WalkerConfig::default(),
        }
    }
}

impl RunOptions {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let run = &config.run;

        // --all clears any kind restriction from the config file.
        let kinds = match cli.kinds() {
            kinds if !kinds.is_empty() => kinds,
            _ if cli.all => Vec::new(),
            _ => run.kinds.clone(),
        };
        let languages = if cli.languages.is_empty() {
            run.languages.clone()
        } else {
            cli.languages.clone()
        };

        let mut walker = WalkerConfig {
            exclude_patterns: config.walk.exclude.clone(),
            ..WalkerConfig::default()
        };
        if let Some(depth) = config.walk.max_depth {
            walker.max_depth = Some(depth);
        }

        Self {
            root: cli.path.clone(),
            selection: Selection { kinds, languages },
            timeout: cli.timeout.or(run.timeout),
            jobs: cli.jobs.map(usize::from).or(run.jobs),
            strict: cli.strict || run.strict.unwrap_or(false),
            show_advisory: !cli.hide_advisory && run.show_advisory.unwrap_or(true),
            advisory_exit: cli
                .advisory_exit
                .or(run.advisory_exit)
                .unwrap_or_default(),
            walker,
        }
    }

    /// Timeout to enforce for a check.
    pub fn timeout_for(&self, check: &Check) -> Duration {
        self.timeout.unwrap_or(check.timeout)
    }

    /// Worker-pool size for a plan of `languages` languages.
    pub fn jobs_for(&self, languages: usize) -> usize {
        let jobs = self.jobs.unwrap_or_else(|| {
            let cpus = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
            cpus.min(languages)
        });
        jobs.max(1)
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
