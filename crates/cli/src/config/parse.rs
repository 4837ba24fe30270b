// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use super::duration::parse_timeout;

/// Parse a TOML array of strings.
pub(super) fn parse_string_array(value: &toml::Value, key: &str) -> Result<Vec<String>, String> {
    let array = value
        .as_array()
        .ok_or_else(|| format!("{key}: expected an array of strings"))?;
    array
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("{key}: expected an array of strings"))
        })
        .collect()
}

/// Parse a TOML array of strings into values of `T`.
pub(super) fn parse_name_array<T>(value: &toml::Value, key: &str) -> Result<Vec<T>, String>
where
    T: FromStr<Err = String> + PartialEq,
{
    let mut parsed = Vec::new();
    for name in parse_string_array(value, key)? {
        let item = name.parse::<T>().map_err(|e| format!("{key}: {e}"))?;
        if !parsed.contains(&item) {
            parsed.push(item);
        }
    }
    Ok(parsed)
}

pub(super) fn parse_bool(value: &toml::Value, key: &str) -> Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("{key}: expected true or false"))
}

pub(super) fn parse_positive_usize(value: &toml::Value, key: &str) -> Result<usize, String> {
    value
        .as_integer()
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("{key}: expected a positive integer"))
}

/// Parse a timeout given as a duration string or a number of seconds.
pub(super) fn parse_timeout_value(value: &toml::Value, key: &str) -> Result<Duration, String> {
    let text = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(n) => n.to_string(),
        toml::Value::Float(f) => f.to_string(),
        _ => return Err(format!("{key}: expected a duration like \"90s\" or a number of seconds")),
    };
    parse_timeout(&text).map_err(|e| format!("{key}: {e}"))
}

/// Warn about an unrecognized config key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "bronze: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}
