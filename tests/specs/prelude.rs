//! Test helpers for behavioral specifications.
//!
//! Real formatters and linters are replaced by shell scripts in a private
//! bin directory, and `PATH` is pointed at that directory only. Each script
//! answers `--version` with exit 0 so availability probes succeed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the bronze binary
pub fn bronze_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bronze"));
    cmd.env_remove("BRONZE_CONFIG")
        .env_remove("BRONZE_LOG")
        .env_remove("NO_COLOR")
        .env_remove("COLOR");
    cmd
}

// =============================================================================
// Project
// =============================================================================

/// Temporary source tree plus a private bin directory of fake tools.
///
/// ```ignore
/// let temp = Project::empty();
/// temp.file("app/main.py", "print('hi')\n");
/// temp.tool("ruff", "exit 0");
/// temp.run().passes();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
    bin: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files and no tools
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            bin: tempfile::tempdir().unwrap(),
        }
    }

    /// A Python project whose black, ruff, and pytest all pass.
    pub fn python() -> Self {
        let temp = Self::empty();
        temp.file("app/main.py", "print('hello')\n");
        temp.file("pyproject.toml", "[project]\nname = \"app\"\n");
        temp.tool("black", "exit 0");
        temp.tool("ruff", "exit 0");
        temp.tool("pytest", "echo '1 passed'");
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory holding the fake tools
    pub fn bin(&self) -> &Path {
        self.bin.path()
    }

    /// Write bronze.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("bronze.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Install a fake tool. `body` runs for every invocation except
    /// `--version`, with the tool's arguments in `$@`.
    pub fn tool(&self, name: &str, body: &str) {
        let path = self.bin.path().join(name);
        let script = format!(
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo \"{name} 1.0.0\"; exit 0; fi\n{body}\n"
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Install a fake tool that never exits.
    pub fn hanging_tool(&self, name: &str) {
        self.tool(name, "while :; do :; done");
    }

    /// Builder for a run against this project.
    pub fn run(&self) -> RunBuilder {
        RunBuilder {
            root: self.path().to_path_buf(),
            bin: self.bin().to_path_buf(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }
}

// =============================================================================
// RunBuilder
// =============================================================================

/// Fluent runner for `bronze <project>` with the project's fake tools on PATH.
pub struct RunBuilder {
    root: PathBuf,
    bin: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RunBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = bronze_cmd();
        cmd.arg(&self.root)
            .args(&self.args)
            .current_dir(&self.root)
            .env("PATH", &self.bin);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    pub fn fails(self) -> RunAssert {
        self.exits(1)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.command().output().unwrap();
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run with `-o json` and parse stdout.
    pub fn json(self, code: i32) -> ReportJson {
        let run = self.args(&["-o", "json"]).exits(code);
        ReportJson::new(run.output.stdout.as_slice())
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = self.stderr();
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = self.stderr();
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}

// =============================================================================
// ReportJson
// =============================================================================

/// Parsed JSON report with lookup helpers.
pub struct ReportJson {
    value: serde_json::Value,
}

#[allow(dead_code)]
impl ReportJson {
    pub fn new(bytes: &[u8]) -> Self {
        let value = serde_json::from_slice(bytes).unwrap_or_else(|e| {
            panic!(
                "report is not valid JSON: {e}\n{}",
                String::from_utf8_lossy(bytes)
            )
        });
        Self { value }
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    pub fn verdict(&self) -> &str {
        self.value["verdict"].as_str().unwrap()
    }

    /// Language names in report order.
    pub fn languages(&self) -> Vec<&str> {
        self.value["languages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["name"].as_str().unwrap())
            .collect()
    }

    /// Check names of one language in report order.
    pub fn check_names(&self, language: &str) -> Vec<&str> {
        self.language(language)["checks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect()
    }

    pub fn language(&self, name: &str) -> &serde_json::Value {
        self.value["languages"]
            .as_array()
            .unwrap()
            .iter()
            .find(|l| l["name"] == name)
            .unwrap_or_else(|| panic!("language {name} not in report:\n{:#}", self.value))
    }

    /// Look up a check by name across all languages.
    pub fn check(&self, name: &str) -> &serde_json::Value {
        self.value["languages"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|l| l["checks"].as_array().unwrap())
            .find(|c| c["name"] == name)
            .unwrap_or_else(|| panic!("check {name} not in report:\n{:#}", self.value))
    }

    pub fn status(&self, name: &str) -> &str {
        self.check(name)["status"].as_str().unwrap()
    }

    /// The report with volatile fields (timestamps, durations) removed.
    pub fn stable(&self) -> serde_json::Value {
        let mut value = self.value.clone();
        strip_volatile(&mut value);
        value
    }
}

fn strip_volatile(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("generatedAt");
            map.remove("durationMs");
            for v in map.values_mut() {
                strip_volatile(v);
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(strip_volatile),
        _ => {}
    }
}
