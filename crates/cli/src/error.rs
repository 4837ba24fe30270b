// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Bronze error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source tree could not be inspected.
    #[error("detection failed: {}: {message}", .root.display())]
    Detection { root: PathBuf, message: String },

    /// The structured report could not be written.
    #[error("cannot write report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using bronze Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
///
/// CI distinguishes "checks failed" (1) from "the orchestrator broke" (2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Verdict is pass
    Success = 0,
    /// One or more blocking checks failed
    CheckFailed = 1,
    /// Detector, config, argument, or report-write failure
    InternalError = 2,
    /// Verdict is pass but advisory checks failed (opt-in soft exit)
    AdvisoryFailed = 3,
}

impl From<&Error> for ExitCode {
    fn from(_err: &Error) -> Self {
        // Every error that escapes the run is orchestrator-level.
        ExitCode::InternalError
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
