//! Multi-language quality gate: detects the languages in a tree, runs each
//! language's formatters, linters, and smoke tests, and reports one verdict.

pub mod adapter;
pub mod check;
pub mod cli;
pub mod color;
pub mod config;
pub mod detect;
pub mod discovery;
pub mod error;
pub mod language;
pub mod options;
pub mod registry;
pub mod report;
pub mod runner;
pub mod walker;

pub use check::{Check, CheckKind, CheckResult, CheckStatus, Severity};
pub use cli::{Cli, OutputFormat};
pub use detect::{Detection, Detector};
pub use error::{Error, ExitCode, Result};
pub use language::Language;
pub use options::RunOptions;
pub use registry::{Registry, Selection};
pub use report::{AdvisoryExit, RunReport, Verdict};
pub use runner::CheckRunner;
pub use walker::{FileWalker, WalkStats, WalkedFile, WalkerConfig};

#[cfg(test)]
pub mod test_utils;
