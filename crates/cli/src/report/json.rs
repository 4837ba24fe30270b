// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON report formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::{RunReport, Verdict};
use crate::check::{CheckKind, CheckResult, CheckStatus, Severity};
use crate::detect::Detection;
use crate::error::{Error, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    verdict: Verdict,
    generated_at: &'a str,
    duration_ms: u64,
    strict: bool,
    languages: Vec<JsonLanguage<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonLanguage<'a> {
    name: &'static str,
    checks: Vec<JsonCheck<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonCheck<'a> {
    name: &'static str,
    kind: CheckKind,
    severity: Severity,
    status: CheckStatus,
    duration_ms: u64,
    tool: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    stdout: &'a str,
    stderr: &'a str,
    truncated: bool,
}

impl<'a> From<&'a CheckResult> for JsonCheck<'a> {
    fn from(result: &'a CheckResult) -> Self {
        Self {
            name: result.check.name,
            kind: result.check.kind,
            severity: result.check.severity,
            status: result.status,
            duration_ms: result.duration_ms(),
            tool: result.check.tool.program,
            message: result.message.as_deref(),
            stdout: &result.output.stdout,
            stderr: &result.output.stderr,
            truncated: result.output.truncated,
        }
    }
}

impl<'a> From<&'a RunReport> for JsonReport<'a> {
    fn from(report: &'a RunReport) -> Self {
        Self {
            verdict: report.verdict,
            generated_at: &report.generated_at,
            duration_ms: report.duration_ms(),
            strict: report.strict,
            languages: report
                .languages
                .iter()
                .map(|l| JsonLanguage {
                    name: l.language.name(),
                    checks: l.results.iter().map(JsonCheck::from).collect(),
                })
                .collect(),
        }
    }
}

/// Serialize a report as pretty-printed JSON.
pub fn to_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::from(report))
}

#[derive(Debug, Serialize)]
struct JsonDetection {
    languages: Vec<&'static str>,
}

/// Serialize the detected languages, in declaration order.
pub fn detection_json(detection: &Detection) -> serde_json::Result<String> {
    let languages = detection.languages().map(|l| l.name()).collect();
    serde_json::to_string_pretty(&JsonDetection { languages })
}

/// JSON report formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON report.
    pub fn write(&mut self, report: &RunReport) -> std::io::Result<()> {
        let json = to_json(report).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

/// Write the JSON report to `path`, replacing any existing file.
pub fn write_report_file(report: &RunReport, path: &Path) -> Result<()> {
    let report_error = |source: std::io::Error| Error::Report {
        path: path.to_path_buf(),
        source,
    };
    let json = to_json(report).map_err(|e| report_error(std::io::Error::other(e)))?;
    std::fs::write(path, format!("{json}\n")).map_err(report_error)?;
    tracing::debug!("wrote report to {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
