//! Run configuration.
//!
//! `RenameConfig` is built once from the parsed arguments and handed to the
//! traversal by reference. It is never mutated while a pass is running; the
//! controller derives per-pass copies instead.

use crate::cli::Args;
use std::path::PathBuf;

/// Immutable options for one run of the renamer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameConfig {
    /// Descend into subdirectories.
    pub recurse: bool,
    /// Rename directory entries, not only files.
    pub rename_directories: bool,
    /// Replace targets that already exist on disk.
    pub overwrite: bool,
    /// Perform renames instead of only reporting them.
    pub apply: bool,
    /// Simulate first and apply only when the simulation found no collision.
    pub simulate_then_apply: bool,
    /// Let the pattern see file extensions.
    pub match_extensions: bool,
    /// Report non-matching entries and directories being recursed into.
    pub verbose: bool,
    /// Directory the walk starts from.
    pub base_path: PathBuf,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            recurse: false,
            rename_directories: false,
            overwrite: false,
            apply: false,
            simulate_then_apply: false,
            match_extensions: false,
            verbose: false,
            base_path: PathBuf::from("."),
        }
    }
}

impl RenameConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            recurse: args.recurse,
            rename_directories: args.rename_directories,
            overwrite: args.force_overwrite,
            apply: args.apply,
            simulate_then_apply: args.safe,
            match_extensions: args.match_extensions,
            verbose: args.verbose,
            base_path: args
                .base_directory
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Returns a copy of this configuration with `apply` forced to `apply`.
    pub fn with_apply(&self, apply: bool) -> Self {
        Self {
            apply,
            ..self.clone()
        }
    }
}
