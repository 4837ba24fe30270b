// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duration string parsing for check timeouts.
//!
//! Supports formats:
//! - `"30"` → 30 seconds (bare numbers are seconds)
//! - `"30s"` → 30 seconds
//! - `"500ms"` → 500 milliseconds
//! - `"2m"` → 2 minutes
//! - `"1.5s"` → 1.5 seconds

use std::time::Duration;

/// Parse a duration string into a Duration.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Check for milliseconds first (longer suffix)
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_millis(n));
    }

    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_secs(n.saturating_mul(60)));
    }

    let secs = s.strip_suffix('s').unwrap_or(s).trim();
    if secs.is_empty() || !secs.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') {
        return Err(format!(
            "invalid duration format: {s} (use 30, 30s, 500ms, or 2m)"
        ));
    }
    let n: f64 = secs
        .parse()
        .map_err(|_| format!("invalid duration: {s}"))?;
    if n < 0.0 {
        return Err(format!("negative duration: {s}"));
    }
    Duration::try_from_secs_f64(n).map_err(|_| format!("invalid duration: {s}"))
}

/// Parse a check timeout. Zero is rejected.
pub fn parse_timeout(s: &str) -> Result<Duration, String> {
    let duration = parse_duration(s)?;
    if duration.is_zero() {
        return Err(format!("timeout must be greater than zero: {s}"));
    }
    Ok(duration)
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
