//! baren library for batch renaming files with regular expressions.
//!
//! The renaming workflow has three parts:
//!
//! 1. **Matching**: a [`Pattern`] substitutes its replacement into an entry's
//!    name, leaving file extensions alone unless asked otherwise
//! 2. **Traversal**: [`renamer::process_directory`] walks a directory tree,
//!    decides every rename and detects collisions with existing files and
//!    with earlier renames in the same listing
//! 3. **Control**: [`controller::run`] performs one pass, or a dry run
//!    followed by a real one when the dry run was collision-free
//!
//! # Example
//!
//! ```no_run
//! use baren::{controller, Pattern, RecordingReporter, RenameConfig};
//! use std::path::PathBuf;
//!
//! let pattern = Pattern::new(r"IMG_(\d+)", "holiday_$1", true).unwrap();
//! let config = RenameConfig {
//!     recurse: true,
//!     base_path: PathBuf::from("./photos"),
//!     ..RenameConfig::default()
//! };
//!
//! let mut reporter = RecordingReporter::new();
//! let outcome = controller::run(&pattern, &config, &mut reporter);
//!
//! for event in &reporter.events {
//!     println!("{}", event);
//! }
//! println!("{:?}", outcome);
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod pattern;
pub mod renamer;
pub mod report;
pub mod tracker;

// Re-export commonly used types at crate root
pub use config::RenameConfig;
pub use controller::RunOutcome;
pub use pattern::Pattern;
pub use report::{ConsoleReporter, Event, JsonReporter, Outcome, RecordingReporter, Reporter};
