// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Looks for bronze.toml in the checked directory and its ancestors,
//! stopping at the enclosing git root.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Config file name.
pub const CONFIG_FILE: &str = "bronze.toml";

/// Find bronze.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    // Relative roots like "." have no useful ancestors until resolved.
    let start = std::fs::canonicalize(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());

    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!("found config at {}", candidate.display());
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Resolve the config path from `-C`/`BRONZE_CONFIG` or by discovery.
///
/// An explicit path must exist; discovery finding nothing is not an error.
pub fn resolve_config(explicit: Option<&Path>, project_root: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = explicit else {
        return Ok(find_config(project_root));
    };
    if path.is_file() {
        Ok(Some(path.to_path_buf()))
    } else {
        Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
