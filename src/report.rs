//! Per-entry outcomes and the sinks that consume them.
//!
//! The renamer never prints. Every decision becomes an [`Event`] handed to a
//! [`Reporter`]; the binary picks a console or JSON reporter, tests use
//! [`RecordingReporter`].

use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to a single directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The pattern did not change the name.
    NoMatch,
    /// The pattern matched; a rename is being attempted. Carries the old name.
    Matched,
    /// Renamed (or would be renamed) to a free name.
    Renamed,
    /// The target was free but the filesystem rename failed.
    RenameFailed,
    /// The target exists and overwriting is disabled.
    ExistsSkipped,
    /// The target exists and was (or would be) overwritten.
    ExistsOverwritten,
    /// The target exists, overwriting was attempted and failed.
    ExistsOverwriteFailed,
    /// The target was already claimed by an earlier rename in the same listing.
    AlreadyClaimed,
    /// Directory listed, recursion disabled.
    NotRecursed,
    /// Directory listed, about to be recursed into.
    Recursing,
}

impl Outcome {
    /// The single-character code printed after the `d` / space marker.
    pub fn code(self) -> char {
        match self {
            Outcome::NoMatch => '#',
            Outcome::Matched => '-',
            Outcome::Renamed => '+',
            Outcome::RenameFailed => 'e',
            Outcome::ExistsSkipped => '!',
            Outcome::ExistsOverwritten => '*',
            Outcome::ExistsOverwriteFailed => 'E',
            Outcome::AlreadyClaimed => '$',
            Outcome::NotRecursed => 's',
            Outcome::Recursing => 'r',
        }
    }

    /// Whether this outcome counts against the simulate-then-apply gate.
    ///
    /// Plain rename failures do not; every target-exists or already-claimed
    /// outcome does, including a successful overwrite.
    pub fn is_collision(self) -> bool {
        matches!(
            self,
            Outcome::ExistsSkipped
                | Outcome::ExistsOverwritten
                | Outcome::ExistsOverwriteFailed
                | Outcome::AlreadyClaimed
        )
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::RenameFailed | Outcome::ExistsOverwriteFailed)
    }

    /// Whether this outcome is only reported in verbose mode.
    pub fn is_verbose_only(self) -> bool {
        matches!(self, Outcome::NoMatch | Outcome::Recursing)
    }
}

/// One reported line: an outcome for a path, flagged as file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub outcome: Outcome,
    pub directory: bool,
    /// The old path for `NoMatch`, `Matched` and directory listings, the target otherwise.
    pub path: PathBuf,
}

impl Event {
    pub fn file(outcome: Outcome, path: impl Into<PathBuf>) -> Self {
        Self {
            outcome,
            directory: false,
            path: path.into(),
        }
    }

    pub fn dir(outcome: Outcome, path: impl Into<PathBuf>) -> Self {
        Self {
            outcome,
            directory: true,
            path: path.into(),
        }
    }

    /// Two-character prefix, e.g. `" +"` or `"d$"`.
    pub fn code(&self) -> String {
        let marker = if self.directory { 'd' } else { ' ' };
        format!("{}{}", marker, self.outcome.code())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.path.display())
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    code: String,
    outcome: Outcome,
    directory: bool,
    path: std::borrow::Cow<'a, str>,
}

impl<'a> From<&'a Event> for JsonEvent<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            code: event.code(),
            outcome: event.outcome,
            directory: event.directory,
            path: event.path.to_string_lossy(),
        }
    }
}

/// Counters for one traversal pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub matched: usize,
    pub renamed: usize,
    pub collisions: usize,
    pub failures: usize,
    pub unreadable_dirs: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Matched => self.matched += 1,
            Outcome::Renamed | Outcome::ExistsOverwritten => self.renamed += 1,
            _ => {}
        }
        if outcome.is_collision() {
            self.collisions += 1;
        }
        if outcome.is_failure() {
            self.failures += 1;
        }
    }
}

/// Sink for traversal events.
pub trait Reporter {
    /// Called once per reported decision.
    fn event(&mut self, event: &Event);

    /// Called when a directory cannot be listed; its contents are skipped.
    fn listing_failed(&mut self, dir: &Path, error: &dyn Error);

    /// Called before a traversal pass starts.
    fn pass_started(&mut self, _apply: bool) {}

    /// Called after a traversal pass returns.
    fn pass_finished(&mut self) {}
}

/// Prints code lines to stdout, coloured by severity.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    verbose: bool,
    summary: Summary,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            summary: Summary::default(),
        }
    }
}

/// Colours the code column of an event line.
pub fn styled_code(event: &Event) -> ColoredString {
    let code = event.code();
    let outcome = event.outcome;
    if outcome.is_failure() || outcome.is_collision() {
        code.red().bold()
    } else if outcome == Outcome::Renamed {
        code.green().bold()
    } else if outcome == Outcome::Matched {
        code.yellow()
    } else {
        code.dimmed()
    }
}

impl Reporter for ConsoleReporter {
    fn event(&mut self, event: &Event) {
        self.summary.record(event.outcome);
        println!("{} {}", styled_code(event), event.path.display());
    }

    fn listing_failed(&mut self, dir: &Path, error: &dyn Error) {
        self.summary.unreadable_dirs += 1;
        eprintln!(
            "{} Cannot get directory listing for \"{}\": {}",
            "warn:".yellow().bold(),
            dir.display(),
            error
        );
    }

    fn pass_started(&mut self, apply: bool) {
        self.summary = Summary::default();
        if apply {
            println!("Applying changes");
        }
    }

    fn pass_finished(&mut self) {
        if !self.verbose {
            return;
        }
        let s = &self.summary;
        eprintln!(
            "{} Matched: {}, Renamed: {}, Collisions: {}, Failures: {}, Unreadable directories: {}",
            "Summary:".bold(),
            s.matched,
            s.renamed,
            s.collisions,
            s.failures,
            s.unreadable_dirs
        );
    }
}

/// Prints one JSON object per event to stdout.
#[derive(Debug, Default)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn event(&mut self, event: &Event) {
        match serde_json::to_string(&JsonEvent::from(event)) {
            Ok(line) => println!("{}", line),
            Err(err) => log::warn!("Cannot serialize event for {}: {}", event.path.display(), err),
        }
    }

    fn listing_failed(&mut self, dir: &Path, error: &dyn Error) {
        eprintln!(
            "{} Cannot get directory listing for \"{}\": {}",
            "warn:".yellow().bold(),
            dir.display(),
            error
        );
    }
}

/// Keeps every event in memory.
///
/// `events` and `unreadable` span the whole run; `summary` covers the latest
/// pass only, like the console output.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
    pub unreadable: Vec<PathBuf>,
    pub summary: Summary,
    pub passes: usize,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events rendered as output lines, paths shown relative to `root`.
    pub fn lines_relative_to(&self, root: &Path) -> Vec<String> {
        self.events
            .iter()
            .map(|e| {
                let path = e.path.strip_prefix(root).unwrap_or(&e.path);
                format!("{} {}", e.code(), path.display())
            })
            .collect()
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.events.iter().map(|e| e.outcome).collect()
    }
}

impl Reporter for RecordingReporter {
    fn event(&mut self, event: &Event) {
        self.summary.record(event.outcome);
        self.events.push(event.clone());
    }

    fn listing_failed(&mut self, dir: &Path, _error: &dyn Error) {
        self.summary.unreadable_dirs += 1;
        self.unreadable.push(dir.to_path_buf());
    }

    fn pass_started(&mut self, _apply: bool) {
        self.summary = Summary::default();
        self.passes += 1;
    }
}
