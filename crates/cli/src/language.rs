// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Supported languages and their marker patterns.
//!
//! Declaration order of [`Language::ALL`] is the order in which languages
//! are planned, run, and reported.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;

/// A language the orchestrator knows how to check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[value(alias = "flutter")]
    Dart,
    #[value(alias = "py")]
    Python,
    #[value(alias = "c++", alias = "cxx")]
    Cpp,
    #[value(alias = "rs")]
    Rust,
    #[value(alias = "golang")]
    Go,
    #[value(name = "javascript", alias = "js", alias = "ts", alias = "typescript")]
    JavaScript,
    #[value(alias = "sh", alias = "bash")]
    Shell,
}

/// How a marker pattern identifies a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    /// Source file: qualifies the language and is a check target.
    Source,
    /// Project manifest: qualifies the language only.
    Manifest,
}

impl Language {
    /// All languages in declaration order.
    pub const ALL: [Language; 7] = [
        Language::Dart,
        Language::Python,
        Language::Cpp,
        Language::Rust,
        Language::Go,
        Language::JavaScript,
        Language::Shell,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::Dart => "dart",
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::JavaScript => "javascript",
            Language::Shell => "shell",
        }
    }

    /// Position in declaration order.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or(usize::MAX)
    }

    /// File-name globs for source files of this language.
    pub fn source_patterns(self) -> &'static [&'static str] {
        match self {
            Language::Dart => &["*.dart"],
            Language::Python => &["*.py", "*.pyi"],
            Language::Cpp => &[
                "*.c", "*.h", "*.cpp", "*.cc", "*.cxx", "*.hpp", "*.hh", "*.hxx",
            ],
            Language::Rust => &["*.rs"],
            Language::Go => &["*.go"],
            Language::JavaScript => &["*.js", "*.jsx", "*.mjs", "*.cjs", "*.ts", "*.tsx"],
            Language::Shell => &["*.sh", "*.bash"],
        }
    }

    /// Well-known manifest file names for this language.
    pub fn manifest_patterns(self) -> &'static [&'static str] {
        match self {
            Language::Dart => &["pubspec.yaml"],
            Language::Python => &[
                "pyproject.toml",
                "setup.py",
                "setup.cfg",
                "requirements.txt",
            ],
            Language::Cpp => &["CMakeLists.txt"],
            Language::Rust => &["Cargo.toml"],
            Language::Go => &["go.mod"],
            Language::JavaScript => &["package.json", "tsconfig.json"],
            Language::Shell => &[],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Language as clap::ValueEnum>::from_str(s.trim(), true)
            .map_err(|_| format!("unknown language `{s}`"))
    }
}

/// Matches file names against every language's marker patterns.
///
/// Built once per run; a single `GlobSet` lookup per file.
pub struct MarkerMatcher {
    set: GlobSet,
    owners: Vec<(Language, MarkerRole)>,
}

impl MarkerMatcher {
    pub fn new() -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut owners = Vec::new();

        for language in Language::ALL {
            let roles = [
                (MarkerRole::Source, language.source_patterns()),
                (MarkerRole::Manifest, language.manifest_patterns()),
            ];
            for (role, patterns) in roles {
                for pattern in patterns {
                    match Glob::new(pattern) {
                        Ok(glob) => {
                            builder.add(glob);
                            owners.push((language, role));
                        }
                        Err(e) => tracing::warn!("invalid marker pattern '{}': {}", pattern, e),
                    }
                }
            }
        }

        Self {
            set: builder.build().unwrap_or_else(|_| GlobSet::empty()),
            owners,
        }
    }

    /// Languages (and roles) whose markers match this path's file name.
    pub fn classify(&self, path: &Path) -> Vec<(Language, MarkerRole)> {
        let Some(name) = path.file_name() else {
            return Vec::new();
        };
        let mut hits: Vec<(Language, MarkerRole)> = self
            .set
            .matches(Path::new(name))
            .into_iter()
            .filter_map(|i| self.owners.get(i).copied())
            .collect();
        hits.dedup();
        hits
    }
}

impl Default for MarkerMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "language_tests.rs"]
mod tests;
