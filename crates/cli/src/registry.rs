// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check registry and selection.
//!
//! The built-in catalogue, per language in declaration order:
//! - dart: dart-format, dart-analyze, dart-test
//! - python: black, ruff, pytest-smoke
//! - cpp: clang-format, cppcheck (advisory)
//! - rust: rustfmt, clippy, cargo-test-smoke
//! - go: gofmt, go-vet, go-test-smoke
//! - javascript: prettier, eslint
//! - shell: shfmt (advisory), shellcheck

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::{CommandAdapter, ToolAdapter, ToolSpec, tools};
use crate::check::{Check, CheckKind, Severity};
use crate::detect::Detection;
use crate::language::Language;

/// Default timeout for format and lint checks.
pub const DEFAULT_LINT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default timeout for smoke tests.
pub const DEFAULT_SMOKE_TIMEOUT: Duration = Duration::from_secs(300);

/// A check paired with the adapter that executes it.
#[derive(Clone)]
pub struct RegisteredCheck {
    pub check: Check,
    pub adapter: Arc<dyn ToolAdapter>,
}

impl std::fmt::Debug for RegisteredCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredCheck")
            .field("check", &self.check.name)
            .field("adapter", &self.adapter.key())
            .finish()
    }
}

/// Which checks a run selects. Empty lists mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub kinds: Vec<CheckKind>,
    pub languages: Vec<Language>,
}

impl Selection {
    pub fn includes_kind(&self, kind: CheckKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }

    pub fn includes_language(&self, language: Language) -> bool {
        self.languages.is_empty() || self.languages.contains(&language)
    }
}

/// Selected work for one detected language.
#[derive(Debug, Clone)]
pub struct LanguagePlan {
    pub language: Language,
    /// Target files relative to the root; may be empty.
    pub targets: Vec<PathBuf>,
    /// Selected checks in declaration order.
    pub checks: Vec<RegisteredCheck>,
}

/// Static catalogue of checks. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<RegisteredCheck>,
}

impl Registry {
    /// Build a registry from arbitrary entries.
    ///
    /// Entries are ordered by language; relative order within a language
    /// is preserved.
    pub fn new(mut entries: Vec<RegisteredCheck>) -> Self {
        entries.sort_by_key(|e| e.check.language.index());
        Self { entries }
    }

    /// The built-in catalogue backed by [`CommandAdapter`].
    pub fn builtin() -> Self {
        use CheckKind::{Format, Lint, SmokeTest};
        use Language::*;
        use Severity::{Advisory, Blocking};

        Self::new(vec![
            command("dart-format", Dart, Format, &tools::DART_FORMAT, Blocking),
            command("dart-analyze", Dart, Lint, &tools::DART_ANALYZE, Blocking),
            command("dart-test", Dart, SmokeTest, &tools::DART_TEST, Blocking),
            command("black", Python, Format, &tools::BLACK, Blocking),
            command("ruff", Python, Lint, &tools::RUFF, Blocking),
            command("pytest-smoke", Python, SmokeTest, &tools::PYTEST_SMOKE, Blocking),
            command("clang-format", Cpp, Format, &tools::CLANG_FORMAT, Advisory),
            command("cppcheck", Cpp, Lint, &tools::CPPCHECK, Advisory),
            command("rustfmt", Rust, Format, &tools::RUSTFMT, Blocking),
            command("clippy", Rust, Lint, &tools::CLIPPY, Blocking),
            command("cargo-test-smoke", Rust, SmokeTest, &tools::CARGO_TEST_SMOKE, Blocking),
            command("gofmt", Go, Format, &tools::GOFMT, Blocking),
            command("go-vet", Go, Lint, &tools::GO_VET, Blocking),
            command("go-test-smoke", Go, SmokeTest, &tools::GO_TEST_SMOKE, Blocking),
            command("prettier", JavaScript, Format, &tools::PRETTIER, Blocking),
            command("eslint", JavaScript, Lint, &tools::ESLINT, Blocking),
            command("shfmt", Shell, Format, &tools::SHFMT, Advisory),
            command("shellcheck", Shell, Lint, &tools::SHELLCHECK, Blocking),
        ])
    }

    /// Checks of one language in declaration order.
    pub fn checks_for(&self, language: Language) -> Vec<&RegisteredCheck> {
        self.entries
            .iter()
            .filter(|e| e.check.language == language)
            .collect()
    }

    /// Every check, language order first.
    pub fn all_checks(&self) -> &[RegisteredCheck] {
        &self.entries
    }

    /// Selected checks for each detected language.
    ///
    /// Languages with no remaining checks after selection are dropped.
    pub fn plan(&self, detection: &Detection, selection: &Selection) -> Vec<LanguagePlan> {
        detection
            .languages()
            .filter(|lang| selection.includes_language(*lang))
            .filter_map(|language| {
                let checks: Vec<RegisteredCheck> = self
                    .checks_for(language)
                    .into_iter()
                    .filter(|e| selection.includes_kind(e.check.kind))
                    .cloned()
                    .collect();
                if checks.is_empty() {
                    tracing::debug!("{}: no checks selected", language);
                    return None;
                }
                Some(LanguagePlan {
                    language,
                    targets: detection.targets(language).to_vec(),
                    checks,
                })
            })
            .collect()
    }
}

/// Default timeout for a check kind.
pub fn default_timeout(kind: CheckKind) -> Duration {
    match kind {
        CheckKind::Format | CheckKind::Lint => DEFAULT_LINT_TIMEOUT,
        CheckKind::SmokeTest => DEFAULT_SMOKE_TIMEOUT,
    }
}

fn command(
    name: &'static str,
    language: Language,
    kind: CheckKind,
    tool: &'static ToolSpec,
    severity: Severity,
) -> RegisteredCheck {
    RegisteredCheck {
        check: Check {
            name,
            language,
            kind,
            tool,
            timeout: default_timeout(kind),
            severity,
        },
        adapter: Arc::new(CommandAdapter::new(tool)),
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
