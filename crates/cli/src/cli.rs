// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::check::CheckKind;
use crate::config::parse_timeout;
use crate::language::Language;
use crate::report::AdvisoryExit;

/// Run formatters, linters, and smoke tests for every language in a project
#[derive(Parser, Debug)]
#[command(name = "bronze")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root to check
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "BRONZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run every registered check (default)
    #[arg(long, conflicts_with_all = ["check_format", "lint", "smoke_test"])]
    pub all: bool,

    /// Run format checks
    #[arg(long)]
    pub check_format: bool,

    /// Run lint checks
    #[arg(long)]
    pub lint: bool,

    /// Run smoke tests
    #[arg(long)]
    pub smoke_test: bool,

    /// Only check this language (repeatable)
    #[arg(long = "language", value_name = "NAME", ignore_case = true)]
    pub languages: Vec<Language>,

    /// Per-check timeout (e.g. 30, 1.5, 30s, 500ms, 2m)
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Write the JSON report to a file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Treat advisory checks as blocking
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Maximum languages checked in parallel
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Do not show diagnostics of failing advisory checks
    #[arg(long)]
    pub hide_advisory: bool,

    /// Exit code when only advisory checks fail
    #[arg(long, value_name = "POLICY")]
    pub advisory_exit: Option<AdvisoryExit>,

    /// List the selected checks and exit without running them
    #[arg(long)]
    pub list: bool,

    /// Print detected languages as JSON and exit
    #[arg(long, conflicts_with = "list")]
    pub detect: bool,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,
}

impl Cli {
    /// Kinds requested through flags. Empty when none (or `--all`) was given.
    pub fn kinds(&self) -> Vec<CheckKind> {
        [
            (self.check_format, CheckKind::Format),
            (self.lint, CheckKind::Lint),
            (self.smoke_test, CheckKind::SmokeTest),
        ]
        .into_iter()
        .filter_map(|(on, kind)| on.then_some(kind))
        .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
