// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Language detection from marker files.
//!
//! A language is detected when at least one walked file matches one of its
//! source or manifest patterns. Detection never runs external tools.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::language::{Language, MarkerMatcher, MarkerRole};
use crate::walker::{FileWalker, WalkerConfig};

/// Languages found in a tree, with each language's target files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    /// Detected language -> sorted target files relative to the root.
    ///
    /// A language detected only through a manifest maps to an empty list.
    targets: BTreeMap<Language, Vec<PathBuf>>,
}

impl Detection {
    /// Detected languages in declaration order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.targets.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Target files of a language (empty if undetected or manifest-only).
    pub fn targets(&self, language: Language) -> &[PathBuf] {
        self.targets
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Build a detection directly from language -> targets pairs.
    pub fn from_targets(targets: impl IntoIterator<Item = (Language, Vec<PathBuf>)>) -> Self {
        let mut map: BTreeMap<Language, Vec<PathBuf>> = BTreeMap::new();
        for (language, mut files) in targets {
            let entry = map.entry(language).or_default();
            entry.append(&mut files);
        }
        for files in map.values_mut() {
            files.sort();
            files.dedup();
        }
        Self { targets: map }
    }
}

/// Scans a tree for language markers.
pub struct Detector {
    walker: WalkerConfig,
    matcher: MarkerMatcher,
}

impl Detector {
    pub fn new(walker: WalkerConfig) -> Self {
        Self {
            walker,
            matcher: MarkerMatcher::new(),
        }
    }

    /// Detect the languages present under `root`.
    ///
    /// Fails only when the root itself cannot be read. Unreadable subtrees
    /// are logged by the walker and skipped.
    pub fn detect(&self, root: &Path) -> Result<Detection> {
        let metadata = std::fs::metadata(root).map_err(|e| Error::Detection {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if !metadata.is_dir() {
            return Err(Error::Detection {
                root: root.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }
        std::fs::read_dir(root).map_err(|e| Error::Detection {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;

        let walker = FileWalker::new(self.walker.clone());
        let (rx, handle) = walker.walk(root);

        let mut targets: BTreeMap<Language, Vec<PathBuf>> = BTreeMap::new();
        for file in rx {
            for (language, role) in self.matcher.classify(&file.path) {
                let files = targets.entry(language).or_default();
                if role == MarkerRole::Source {
                    let relative = file.path.strip_prefix(root).unwrap_or(&file.path);
                    files.push(relative.to_path_buf());
                }
            }
        }

        let stats = handle.join();
        tracing::debug!(
            "scanned {} files ({} errors, {} symlink loops)",
            stats.files_found,
            stats.errors,
            stats.symlink_loops
        );

        let detection = Detection::from_targets(targets);
        tracing::debug!(
            "detected languages: {:?}",
            detection.languages().map(Language::name).collect::<Vec<_>>()
        );
        Ok(detection)
    }
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
