// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel file walking with gitignore support.
//!
//! Uses the `ignore` crate for file discovery that respects `.gitignore`,
//! custom exclude patterns, and depth limits. Build output and dependency
//! directories are pruned during traversal.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use ignore::overrides::OverrideBuilder;
use ignore::{WalkBuilder, WalkState};

/// Helper to check if an ignore::Error is a symlink loop error.
fn is_loop_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. } => is_loop_error(err),
        ignore::Error::WithDepth { err, .. } => is_loop_error(err),
        ignore::Error::WithLineNumber { err, .. } => is_loop_error(err),
        _ => false,
    }
}

/// Default maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Directories never descended into.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &[
    ".git",
    "node_modules",
    ".dart_tool",
    "build",
    "target",
    "vendor",
    "__pycache__",
    ".venv",
    "venv",
];

/// Default threshold for switching from sequential to parallel walking.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum directory depth (default: 100).
    pub max_depth: Option<usize>,

    /// Exclude globs relative to the root.
    pub exclude_patterns: Vec<String>,

    /// Whether to respect gitignore files.
    pub git_ignore: bool,

    /// Whether to skip hidden files.
    pub hidden: bool,

    /// Minimum top-level entry estimate (x10) for parallel walking.
    pub parallel_threshold: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            exclude_patterns: Vec::new(),
            git_ignore: true,
            hidden: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// File discovered by the walker.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path to the file.
    pub path: PathBuf,
}

/// Statistics from a walk operation.
#[derive(Debug, Default)]
pub struct WalkStats {
    /// Total files discovered.
    pub files_found: usize,

    /// Symlink loops detected.
    pub symlink_loops: usize,

    /// Errors encountered (unreadable subtrees, broken entries).
    pub errors: usize,
}

/// File walker with gitignore support.
pub struct FileWalker {
    config: WalkerConfig,
}

impl FileWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    #[inline]
    fn is_skipped_dir(entry: &ignore::DirEntry) -> bool {
        entry.file_type().is_some_and(|t| t.is_dir())
            && entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
    }

    /// Quick heuristic: a wide root usually means a large tree.
    fn should_use_parallel(&self, root: &Path) -> bool {
        let entry_count = std::fs::read_dir(root)
            .map(|entries| entries.count())
            .unwrap_or(0);
        entry_count >= self.config.parallel_threshold / 10
    }

    /// Walk the given root, streaming discovered files through a channel.
    ///
    /// Returns (receiver, handle); join the handle to get stats.
    pub fn walk(&self, root: &Path) -> (Receiver<WalkedFile>, WalkHandle) {
        let (tx, rx) = bounded(1000);

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .follow_links(true)
            .max_depth(self.config.max_depth);

        // In ignore's override syntax a leading `!` excludes.
        if !self.config.exclude_patterns.is_empty() {
            let mut overrides = OverrideBuilder::new(root);
            for pattern in &self.config.exclude_patterns {
                if let Err(e) = overrides.add(&format!("!{pattern}")) {
                    tracing::warn!("invalid exclude pattern '{}': {}", pattern, e);
                }
            }
            match overrides.build() {
                Ok(overrides) => {
                    builder.overrides(overrides);
                }
                Err(e) => tracing::warn!("ignoring exclude patterns: {}", e),
            }
        }

        builder.filter_entry(|entry| !Self::is_skipped_dir(entry));

        let handle = if self.should_use_parallel(root) {
            Self::walk_parallel(builder, tx)
        } else {
            Self::walk_sequential(builder, tx)
        };

        (rx, handle)
    }

    fn walk_parallel(builder: WalkBuilder, tx: Sender<WalkedFile>) -> WalkHandle {
        let walker = builder.build_parallel();

        let files_found = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));
        let symlink_loops = Arc::new(AtomicUsize::new(0));

        let stats_files = Arc::clone(&files_found);
        let stats_errors = Arc::clone(&errors);
        let stats_loops = Arc::clone(&symlink_loops);

        let handle = std::thread::spawn(move || {
            walker.run(|| {
                let tx = tx.clone();
                let files_found = Arc::clone(&files_found);
                let errors = Arc::clone(&errors);
                let symlink_loops = Arc::clone(&symlink_loops);

                Box::new(move |entry| match entry {
                    Ok(entry) => {
                        if !entry.file_type().is_some_and(|t| t.is_file()) {
                            return WalkState::Continue;
                        }
                        files_found.fetch_add(1, Ordering::Relaxed);
                        let walked = WalkedFile {
                            path: entry.into_path(),
                        };
                        if tx.send(walked).is_err() {
                            return WalkState::Quit;
                        }
                        WalkState::Continue
                    }
                    Err(err) => {
                        if is_loop_error(&err) {
                            tracing::warn!("symlink loop detected: {}", err);
                            symlink_loops.fetch_add(1, Ordering::Relaxed);
                        } else {
                            tracing::warn!("walk error: {}", err);
                            errors.fetch_add(1, Ordering::Relaxed);
                        }
                        WalkState::Continue
                    }
                })
            });

            WalkStats {
                files_found: stats_files.load(Ordering::Relaxed),
                errors: stats_errors.load(Ordering::Relaxed),
                symlink_loops: stats_loops.load(Ordering::Relaxed),
            }
        });

        WalkHandle { handle }
    }

    fn walk_sequential(builder: WalkBuilder, tx: Sender<WalkedFile>) -> WalkHandle {
        let walker = builder.build();

        let handle = std::thread::spawn(move || {
            let mut stats = WalkStats::default();

            for entry in walker {
                match entry {
                    Ok(entry) => {
                        if !entry.file_type().is_some_and(|t| t.is_file()) {
                            continue;
                        }
                        stats.files_found += 1;
                        let walked = WalkedFile {
                            path: entry.into_path(),
                        };
                        if tx.send(walked).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        if is_loop_error(&err) {
                            tracing::warn!("symlink loop detected: {}", err);
                            stats.symlink_loops += 1;
                        } else {
                            tracing::warn!("walk error: {}", err);
                            stats.errors += 1;
                        }
                    }
                }
            }

            stats
        });

        WalkHandle { handle }
    }

}

/// Handle to a running walk operation.
pub struct WalkHandle {
    handle: std::thread::JoinHandle<WalkStats>,
}

impl WalkHandle {
    /// Wait for the walk to complete and return stats.
    pub fn join(self) -> WalkStats {
        self.handle.join().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
