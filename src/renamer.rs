//! Recursive directory renaming.
//!
//! Lists one directory level at a time, descends into subdirectories before
//! deciding on the directory's own name, and reports one [`Event`] per
//! decision. Each listing keeps its own [`ConflictTracker`] so two entries
//! whose names collapse to the same target are caught even in a dry run.

use crate::config::RenameConfig;
use crate::pattern::Pattern;
use crate::report::{Event, Outcome, Reporter};
use crate::tracker::ConflictTracker;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File name, if it is valid UTF-8.
    pub name: Option<String>,
    pub full_path: PathBuf,
    /// True for directories and for symlinks pointing at one.
    pub is_directory: bool,
    /// True if the entry itself is a symlink; those are never descended into.
    pub is_symlink: bool,
}

impl DirectoryEntry {
    fn from_walkdir(entry: walkdir::DirEntry) -> Self {
        let is_symlink = entry.path_is_symlink();
        let is_directory = if is_symlink {
            fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
        } else {
            entry.file_type().is_dir()
        };
        Self {
            name: entry.file_name().to_str().map(str::to_owned),
            is_directory,
            is_symlink,
            full_path: entry.into_path(),
        }
    }

    /// Byte offset of the extension dot, when the extension is excluded from matching.
    fn extension_start(&self, match_extensions: bool) -> Option<usize> {
        if self.is_directory || match_extensions {
            return None;
        }
        self.name.as_deref().and_then(split_extension)
    }
}

/// Returns the index of the last `.` in `name`, unless it is the first character.
///
/// `"report.v1.txt"` splits at 9, `".bashrc"` and `"README"` do not split.
pub fn split_extension(name: &str) -> Option<usize> {
    name.rfind('.').filter(|&i| i > 0)
}

/// Processes every entry of `dir`, recursing as configured.
///
/// Returns `true` if no collision (existing target or target already
/// claimed in the same listing) occurred anywhere in the subtree. Listing and
/// rename failures are reported but do not count as collisions.
pub fn process_directory(
    dir: &Path,
    pattern: &Pattern,
    config: &RenameConfig,
    reporter: &mut dyn Reporter,
) -> bool {
    log::debug!("Processing directory: \"{}\"", dir.display());

    let mut tracker = ConflictTracker::new();
    let mut clean = true;

    for entry in list_directory(dir, reporter) {
        log::trace!("Entry: {}", entry.full_path.display());

        if entry.is_directory {
            if config.recurse && !entry.is_symlink {
                emit(reporter, config, Event::dir(Outcome::Recursing, &entry.full_path));
                clean &= process_directory(&entry.full_path, pattern, config, reporter);
            } else {
                emit(reporter, config, Event::dir(Outcome::NotRecursed, &entry.full_path));
            }

            if !config.rename_directories {
                continue;
            }
        }

        if let Some(outcome) = decide(dir, &entry, pattern, config, &mut tracker, reporter) {
            clean &= !outcome.is_collision();
        }
    }

    log::debug!(
        "Finished directory: \"{}\" ({} target(s) claimed)",
        dir.display(),
        tracker.len()
    );

    clean
}

/// Lists `dir` one level deep, sorted by name.
///
/// A directory that cannot be opened is reported and treated as empty.
fn list_directory(dir: &Path, reporter: &mut dyn Reporter) -> Vec<DirectoryEntry> {
    let mut entries = Vec::new();

    for result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        match result {
            Ok(entry) => entries.push(DirectoryEntry::from_walkdir(entry)),
            Err(err) if err.depth() == 0 => {
                reporter.listing_failed(dir, &err);
                return Vec::new();
            }
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                reporter.listing_failed(&path, &err);
            }
        }
    }

    entries
}

/// Matches one entry and renames or simulates renaming it.
///
/// Returns the final outcome for a matched entry, `None` if nothing matched.
fn decide(
    dir: &Path,
    entry: &DirectoryEntry,
    pattern: &Pattern,
    config: &RenameConfig,
    tracker: &mut ConflictTracker,
    reporter: &mut dyn Reporter,
) -> Option<Outcome> {
    let event = |outcome: Outcome, path: &Path| {
        if entry.is_directory {
            Event::dir(outcome, path)
        } else {
            Event::file(outcome, path)
        }
    };

    let Some(name) = entry.name.as_deref() else {
        log::debug!("Skipping non UTF-8 name: {}", entry.full_path.display());
        emit(reporter, config, event(Outcome::NoMatch, entry.full_path.as_path()));
        return None;
    };

    let extension_start = entry.extension_start(config.match_extensions);
    let replaced = pattern.apply(name, extension_start.unwrap_or(name.len()));
    if !replaced.matched {
        emit(reporter, config, event(Outcome::NoMatch, entry.full_path.as_path()));
        return None;
    }

    emit(reporter, config, event(Outcome::Matched, entry.full_path.as_path()));

    let mut new_name = replaced.text;
    if let Some(start) = extension_start {
        new_name.push_str(&name[start..]);
    }
    if !is_valid_name(&new_name) {
        log::warn!(
            "Replacement turns {} into unusable name {:?}",
            entry.full_path.display(),
            new_name
        );
        emit(reporter, config, event(Outcome::RenameFailed, dir));
        return Some(Outcome::RenameFailed);
    }
    let target = dir.join(&new_name);

    let outcome = resolve_target(&entry.full_path, &target, config, tracker);
    emit(reporter, config, event(outcome, target.as_path()));
    Some(outcome)
}

/// Picks the outcome for renaming `source` to `target`, performing the rename when applying.
///
/// A target already on disk wins over the in-listing claim check, except
/// when this listing put it there: a claimed target is never overwritten.
fn resolve_target(
    source: &Path,
    target: &Path,
    config: &RenameConfig,
    tracker: &mut ConflictTracker,
) -> Outcome {
    let claimed = tracker.is_claimed(target);

    if !claimed && exists(target) {
        if !config.overwrite {
            return Outcome::ExistsSkipped;
        }
        if config.apply {
            if let Err(err) = fs::rename(source, target) {
                log::debug!("Overwrite of {} failed: {}", target.display(), err);
                return Outcome::ExistsOverwriteFailed;
            }
        }
        tracker.claim(target);
        return Outcome::ExistsOverwritten;
    }

    if claimed {
        return Outcome::AlreadyClaimed;
    }

    if config.apply {
        if let Err(err) = fs::rename(source, target) {
            log::debug!("Rename of {} failed: {}", source.display(), err);
            return Outcome::RenameFailed;
        }
    }
    tracker.claim(target);
    Outcome::Renamed
}

/// Rejects names that would not stay a single entry of the same directory.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.chars().any(std::path::is_separator)
}

/// Existence without following symlinks, so dangling links count.
fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn emit(reporter: &mut dyn Reporter, config: &RenameConfig, event: Event) {
    if event.outcome.is_verbose_only() && !config.verbose {
        return;
    }
    reporter.event(&event);
}
