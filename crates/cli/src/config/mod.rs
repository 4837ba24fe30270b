// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles bronze.toml parsing with version validation and unknown key warnings.
//!
//! ```toml
//! version = 1
//!
//! [run]
//! timeout = "90s"
//! jobs = 4
//! strict = false
//! show_advisory = true
//! advisory_exit = "pass"
//! languages = ["python", "dart"]
//! kinds = ["format", "lint"]
//!
//! [walk]
//! exclude = ["third_party/**"]
//! max_depth = 100
//! ```

mod duration;
mod parse;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

pub use duration::{parse_duration, parse_timeout};

use crate::check::CheckKind;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::report::AdvisoryExit;
use parse::{
    parse_bool, parse_name_array, parse_positive_usize, parse_string_array, parse_timeout_value,
    warn_unknown_key,
};

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    run: Option<toml::Value>,

    #[serde(default)]
    walk: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,
    pub run: RunConfig,
    pub walk: WalkConfig,
    /// Dotted paths of keys that were ignored.
    pub unknown_keys: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            run: RunConfig::default(),
            walk: WalkConfig::default(),
            unknown_keys: Vec::new(),
        }
    }
}

/// `[run]` table. Unset fields fall back to CLI flags or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    /// Per-check timeout override.
    pub timeout: Option<Duration>,
    pub jobs: Option<usize>,
    pub strict: Option<bool>,
    pub show_advisory: Option<bool>,
    pub advisory_exit: Option<AdvisoryExit>,
    /// Empty = all languages.
    pub languages: Vec<Language>,
    /// Empty = all kinds.
    pub kinds: Vec<CheckKind>,
}

/// `[walk]` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkConfig {
    /// Extra glob patterns to prune, on top of gitignore and built-in skips.
    pub exclude: Vec<String>,
    pub max_depth: Option<usize>,
}

/// Load config from a file path, warning on unknown keys.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = parse(&content, path)?;
    for key in &config.unknown_keys {
        warn_unknown_key(path, key);
    }
    Ok(config)
}

/// Parse config from string content.
///
/// Unknown keys are collected into [`Config::unknown_keys`]; invalid values
/// of known keys are errors.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = flexible
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;
    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})\n  Upgrade bronze to use this config.",
            version, SUPPORTED_VERSION
        )));
    }

    let mut unknown_keys: Vec<String> = flexible.unknown.keys().cloned().collect();

    let run = match &flexible.run {
        None => RunConfig::default(),
        Some(value) => parse_run(value, &mut unknown_keys).map_err(config_error)?,
    };
    let walk = match &flexible.walk {
        None => WalkConfig::default(),
        Some(value) => parse_walk(value, &mut unknown_keys).map_err(config_error)?,
    };

    Ok(Config {
        version,
        run,
        walk,
        unknown_keys,
    })
}

fn parse_run(value: &toml::Value, unknown: &mut Vec<String>) -> std::result::Result<RunConfig, String> {
    let table = value
        .as_table()
        .ok_or_else(|| "run: expected a table".to_string())?;

    let mut run = RunConfig::default();
    for (key, value) in table {
        match key.as_str() {
            "timeout" => run.timeout = Some(parse_timeout_value(value, "run.timeout")?),
            "jobs" => run.jobs = Some(parse_positive_usize(value, "run.jobs")?),
            "strict" => run.strict = Some(parse_bool(value, "run.strict")?),
            "show_advisory" => run.show_advisory = Some(parse_bool(value, "run.show_advisory")?),
            "advisory_exit" => {
                let text = value
                    .as_str()
                    .ok_or_else(|| "run.advisory_exit: expected \"pass\" or \"soft\"".to_string())?;
                run.advisory_exit = Some(
                    text.parse()
                        .map_err(|e| format!("run.advisory_exit: {e}"))?,
                );
            }
            "languages" => run.languages = parse_name_array(value, "run.languages")?,
            "kinds" => run.kinds = parse_name_array(value, "run.kinds")?,
            other => unknown.push(format!("run.{other}")),
        }
    }
    Ok(run)
}

fn parse_walk(value: &toml::Value, unknown: &mut Vec<String>) -> std::result::Result<WalkConfig, String> {
    let table = value
        .as_table()
        .ok_or_else(|| "walk: expected a table".to_string())?;

    let mut walk = WalkConfig::default();
    for (key, value) in table {
        match key.as_str() {
            "exclude" => walk.exclude = parse_string_array(value, "walk.exclude")?,
            "max_depth" => walk.max_depth = Some(parse_positive_usize(value, "walk.max_depth")?),
            other => unknown.push(format!("walk.{other}")),
        }
    }
    Ok(walk)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
