//! Runs the renamer once, or twice for simulate-then-apply.

use crate::config::RenameConfig;
use crate::pattern::Pattern;
use crate::renamer::process_directory;
use crate::report::Reporter;
use serde::Serialize;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// A single pass ran; `clean` is false if any collision was reported.
    Completed { clean: bool },
    /// The simulation was clean and the apply pass ran.
    Applied { clean: bool },
    /// The simulation found collisions; nothing was renamed.
    Withheld,
}

/// Walks `config.base_path` with `pattern`.
///
/// With `simulate_then_apply`, the first pass runs with apply forced off and
/// the second, a full independent re-walk with apply forced on, only runs if
/// the first reported no collision.
pub fn run(pattern: &Pattern, config: &RenameConfig, reporter: &mut dyn Reporter) -> RunOutcome {
    if !config.simulate_then_apply {
        let clean = pass(pattern, config, reporter);
        return RunOutcome::Completed { clean };
    }

    let simulation = config.with_apply(false);
    if !pass(pattern, &simulation, reporter) {
        log::info!("Simulation reported collisions, withholding changes");
        return RunOutcome::Withheld;
    }

    let apply = config.with_apply(true);
    let clean = pass(pattern, &apply, reporter);
    RunOutcome::Applied { clean }
}

fn pass(pattern: &Pattern, config: &RenameConfig, reporter: &mut dyn Reporter) -> bool {
    reporter.pass_started(config.apply);
    let clean = process_directory(&config.base_path, pattern, config, reporter);
    reporter.pass_finished();
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use std::fs;
    use tempfile::TempDir;

    fn safe_config(root: &std::path::Path) -> RenameConfig {
        RenameConfig {
            simulate_then_apply: true,
            base_path: root.to_path_buf(),
            ..RenameConfig::default()
        }
    }

    #[test]
    fn plain_mode_runs_one_pass() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("foo"), "").unwrap();
        let pattern = Pattern::new("foo", "bar", false).unwrap();
        let config = RenameConfig {
            base_path: tmp.path().to_path_buf(),
            ..RenameConfig::default()
        };
        let mut reporter = RecordingReporter::new();

        let outcome = run(&pattern, &config, &mut reporter);

        assert_eq!(outcome, RunOutcome::Completed { clean: true });
        assert_eq!(reporter.passes, 1);
        assert!(tmp.path().join("foo").exists());
    }

    #[test]
    fn clean_simulation_is_followed_by_apply() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("foo"), "").unwrap();
        let pattern = Pattern::new("foo", "bar", false).unwrap();
        let mut reporter = RecordingReporter::new();

        let outcome = run(&pattern, &safe_config(tmp.path()), &mut reporter);

        assert_eq!(outcome, RunOutcome::Applied { clean: true });
        assert_eq!(reporter.passes, 2);
        assert!(tmp.path().join("bar").exists());
        assert!(!tmp.path().join("foo").exists());
    }

    #[test]
    fn collision_withholds_changes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("foo"), "").unwrap();
        fs::write(tmp.path().join("bar"), "").unwrap();
        fs::write(tmp.path().join("foo2"), "").unwrap();
        let pattern = Pattern::new("foo", "bar", false).unwrap();
        let mut reporter = RecordingReporter::new();

        let outcome = run(&pattern, &safe_config(tmp.path()), &mut reporter);

        assert_eq!(outcome, RunOutcome::Withheld);
        assert_eq!(reporter.passes, 1);
        assert!(tmp.path().join("foo").exists());
        assert!(tmp.path().join("foo2").exists());
        assert!(!tmp.path().join("bar2").exists());
    }
}
