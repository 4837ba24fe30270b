// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command templates for the built-in tools.
//!
//! Every template runs its tool in check-only mode. None of them rewrite
//! files.

use super::{ExitConvention, TargetMode, ToolSpec};

const VERSION: &[&str] = &["--version"];

// =============================================================================
// Dart
// =============================================================================

pub static DART_FORMAT: ToolSpec = ToolSpec {
    program: "dart",
    args: &["format", "--output=none", "--set-exit-if-changed"],
    probe_args: VERSION,
    targets: TargetMode::Files,
    exit: ExitConvention::STANDARD,
};

pub static DART_ANALYZE: ToolSpec = ToolSpec {
    program: "dart",
    args: &["analyze"],
    probe_args: VERSION,
    targets: TargetMode::Project,
    // 1 = info, 2 = warnings, 3 = errors. 64 is a usage error.
    exit: ExitConvention {
        violations: &[1, 2, 3],
        no_targets: &[],
        output_is_violation: false,
    },
};

pub static DART_TEST: ToolSpec = ToolSpec {
    program: "dart",
    args: &["test"],
    probe_args: VERSION,
    targets: TargetMode::Project,
    // 79: no test files found
    exit: ExitConvention {
        violations: &[1],
        no_targets: &[79],
        output_is_violation: false,
    },
};

// =============================================================================
// Python
// =============================================================================

pub static BLACK: ToolSpec = ToolSpec {
    program: "black",
    args: &["--check", "--quiet"],
    probe_args: VERSION,
    targets: TargetMode::Files,
    // 123 is an internal error
    exit: ExitConvention::STANDARD,
};

pub static RUFF: ToolSpec = ToolSpec {
    program: "ruff",
    args: &["check", "--quiet"],
    probe_args: VERSION,
    targets: TargetMode::Files,
    exit: ExitConvention::STANDARD,
};

pub static PYTEST_SMOKE: ToolSpec = ToolSpec {
    program: "pytest",
    args: &["-m", "smoke", "-q"],
    probe_args: VERSION,
    targets: TargetMode::Project,
    // 5: no tests collected
    exit: ExitConvention {
        violations: &[1],
        no_targets: &[5],
        output_is_violation: false,
    },
};

// =============================================================================
// C++
// =============================================================================

pub static CLANG_FORMAT: ToolSpec = ToolSpec {
    program: "clang-format",
    args: &["--dry-run", "--Werror"],
    probe_args: VERSION,
    targets: TargetMode::Files,
    exit: ExitConvention::STANDARD,
};

pub static CPPCHECK: ToolSpec = ToolSpec {
    program: "cppcheck",
    args: &["--error-exitcode=1", "--quiet"],
    probe_args: VERSION,
    targets: TargetMode::Files,
    exit: ExitConvention::STANDARD,
};

// =============================================================================
// Rust
// =============================================================================

pub static RUSTFMT: ToolSpec = ToolSpec {
    program: "cargo",
    args: &["fmt", "--check"],
    probe_args: &["fmt", "--version"],
    targets: TargetMode::Project,
    exit: ExitConvention::STANDARD,
};

pub static CLIPPY: ToolSpec = ToolSpec {
    program: "cargo",
    args: &["clippy", "--quiet", "--", "-D", "warnings"],
    probe_args: &["clippy", "--version"],
    targets: TargetMode::Project,
    // 101: compilation or lint failure
    exit: ExitConvention {
        violations: &[101],
        no_targets: &[],
        output_is_violation: false,
    },
};

pub static CARGO_TEST_SMOKE: ToolSpec = ToolSpec {
    program: "cargo",
    args: &["test", "--quiet", "smoke"],
    probe_args: VERSION,
    targets: TargetMode::Project,
    exit: ExitConvention {
        violations: &[101],
        no_targets: &[],
        output_is_violation: false,
    },
};

// =============================================================================
// Go
// =============================================================================

pub static GOFMT: ToolSpec = ToolSpec {
    program: "gofmt",
    args: &["-l"],
    // No --version flag; formatting empty stdin exits 0.
    probe_args: &[],
    targets: TargetMode::Files,
    exit: ExitConvention {
        violations: &[],
        no_targets: &[],
        output_is_violation: true,
    },
};

pub static GO_VET: ToolSpec = ToolSpec {
    program: "go",
    args: &["vet", "./..."],
    probe_args: &["version"],
    targets: TargetMode::Project,
    exit: ExitConvention::STANDARD,
};

pub static GO_TEST_SMOKE: ToolSpec = ToolSpec {
    program: "go",
    args: &["test", "-run", "Smoke", "./..."],
    probe_args: &["version"],
    targets: TargetMode::Project,
    exit: ExitConvention::STANDARD,
};

// =============================================================================
// JavaScript / TypeScript
// =============================================================================

pub static PRETTIER: ToolSpec = ToolSpec {
    program: "prettier",
    args: &["--check"],
    probe_args: VERSION,
    targets: TargetMode::Files,
    exit: ExitConvention::STANDARD,
};

pub static ESLINT: ToolSpec = ToolSpec {
    program: "eslint",
    args: &[],
    probe_args: VERSION,
    targets: TargetMode::Files,
    exit: ExitConvention::STANDARD,
};

// =============================================================================
// Shell
// =============================================================================

pub static SHFMT: ToolSpec = ToolSpec {
    program: "shfmt",
    args: &["-d"],
    probe_args: VERSION,
    targets: TargetMode::Files,
    exit: ExitConvention::STANDARD,
};

pub static SHELLCHECK: ToolSpec = ToolSpec {
    program: "shellcheck",
    args: &[],
    probe_args: VERSION,
    targets: TargetMode::Files,
    exit: ExitConvention::STANDARD,
};

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
