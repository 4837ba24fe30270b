//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::TempDir;

use crate::adapter::{RunRequest, ToolAdapter, ToolAvailability, ToolOutcome, tools};
use crate::check::{Check, CheckKind, CheckResult, CheckStatus, Severity};
use crate::language::Language;
use crate::registry::{RegisteredCheck, default_timeout};

/// Creates an empty temp directory.
pub fn temp_project() -> TempDir {
    TempDir::new().unwrap()
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = temp_project();
/// create_tree(tmp.path(), &[
///     ("pubspec.yaml", "name: app\n"),
///     ("lib/main.dart", "void main() {}\n"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Scripted behavior of a [`FakeTool`] run.
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Return this status.
    Status(CheckStatus),
    /// Sleep, then return passed (the runner enforces timeouts via the adapter,
    /// so this only exercises timing).
    Sleep(Duration),
    /// Panic inside `run`.
    Panic,
}

/// In-memory adapter used to drive the runner without spawning processes.
pub struct FakeTool {
    key: String,
    available: bool,
    broken: bool,
    behavior: FakeBehavior,
    probes: AtomicUsize,
    runs: AtomicUsize,
}

impl FakeTool {
    pub fn new(key: &str, available: bool, behavior: FakeBehavior) -> Arc<Self> {
        Arc::new(Self {
            key: key.to_string(),
            available,
            broken: false,
            behavior,
            probes: AtomicUsize::new(0),
            runs: AtomicUsize::new(0),
        })
    }

    pub fn passing(key: &str) -> Arc<Self> {
        Self::new(key, true, FakeBehavior::Status(CheckStatus::Passed))
    }

    pub fn returning(key: &str, status: CheckStatus) -> Arc<Self> {
        Self::new(key, true, FakeBehavior::Status(status))
    }

    pub fn missing(key: &str) -> Arc<Self> {
        Self::new(key, false, FakeBehavior::Status(CheckStatus::Passed))
    }

    /// Installed, but its version probe fails.
    pub fn broken(key: &str) -> Arc<Self> {
        Arc::new(Self {
            key: key.to_string(),
            available: true,
            broken: true,
            behavior: FakeBehavior::Status(CheckStatus::Passed),
            probes: AtomicUsize::new(0),
            runs: AtomicUsize::new(0),
        })
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn run_count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl ToolAdapter for FakeTool {
    fn key(&self) -> &str {
        &self.key
    }

    fn probe(&self) -> ToolAvailability {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            ToolAvailability::Broken {
                path: format!("/fake/bin/{}", self.key).into(),
                reason: format!("`{} --version` exited with 1", self.key),
            }
        } else if self.available {
            ToolAvailability::Available {
                path: format!("/fake/bin/{}", self.key).into(),
                version: Some("1.0.0".to_string()),
            }
        } else {
            ToolAvailability::Unavailable {
                reason: format!("{} not found on PATH", self.key),
            }
        }
    }

    fn run(&self, _request: &RunRequest<'_>) -> ToolOutcome {
        self.runs.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            FakeBehavior::Status(status) => ToolOutcome::new(*status),
            FakeBehavior::Sleep(d) => {
                std::thread::sleep(*d);
                ToolOutcome::new(CheckStatus::Passed)
            }
            FakeBehavior::Panic => panic!("fake tool {} crashed", self.key),
        }
    }
}

/// A lint check with a placeholder tool spec.
pub fn check(name: &'static str, language: Language, severity: Severity) -> Check {
    Check {
        name,
        language,
        kind: CheckKind::Lint,
        tool: &tools::RUFF,
        timeout: default_timeout(CheckKind::Lint),
        severity,
    }
}

/// A finished result for report tests.
pub fn result(
    name: &'static str,
    language: Language,
    severity: Severity,
    status: CheckStatus,
) -> CheckResult {
    CheckResult::new(check(name, language, severity), status, Duration::from_millis(100))
}

/// Registers a check backed by `adapter`.
///
/// The tool spec is a placeholder; fake adapters never read it.
pub fn fake_check(
    name: &'static str,
    language: Language,
    kind: CheckKind,
    severity: Severity,
    adapter: Arc<FakeTool>,
) -> RegisteredCheck {
    RegisteredCheck {
        check: Check {
            kind,
            timeout: default_timeout(kind),
            ..check(name, language, severity)
        },
        adapter,
    }
}

/// Shorthand for blocking severity in test tables.
pub const BLOCKING: Severity = Severity::Blocking;
/// Shorthand for advisory severity in test tables.
pub const ADVISORY: Severity = Severity::Advisory;
