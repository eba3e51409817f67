//! Per-listing bookkeeping of claimed rename targets.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Target paths already claimed by earlier renames in one directory listing.
///
/// Each call to [`crate::renamer::process_directory`] owns a fresh tracker and
/// drops it when the listing is done; subdirectories get their own.
#[derive(Debug, Default)]
pub struct ConflictTracker {
    claimed: HashSet<PathBuf>,
}

impl ConflictTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `target` as used.
    pub fn claim(&mut self, target: &Path) {
        self.claimed.insert(target.to_path_buf());
    }

    pub fn is_claimed(&self, target: &Path) -> bool {
        self.claimed.contains(target)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
