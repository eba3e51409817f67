//! Command-line interface definitions.
//!
//! Defines the argument parser using clap's derive API. The two positionals
//! are collected loosely so the binary can report a wrong argument count with
//! its own exit code instead of clap's usage error.

use clap::Parser;
use std::path::PathBuf;

const OUTPUT_KEY: &str = "\
Output Key:
   # File/Directory not matching pattern
   - File/Directory renamed (old name)
   + File/Directory new name
   e File/Directory new name, rename failed
   * File/Directory new name, overwrite forced
   E File/Directory new name, overwrite failed
   ! File/Directory new name, overwrite disabled
   $ File/Directory new name, would overwrite already-renamed file
  ds Directory, not recursing
  dr Directory, recursing
An initial 'd' means 'directory'. # and dr are only shown in verbose mode.";

/// Batch rename files by matching their names against a regular expression.
#[derive(Debug, Parser)]
#[command(author, version, about, after_help = OUTPUT_KEY)]
pub struct Args {
    /// PATTERN and REPLACEMENT.
    #[arg(value_name = "PATTERN REPLACEMENT", num_args = 0..)]
    pub positionals: Vec<String>,

    /// Be verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Apply changes, do not simulate only.
    #[arg(short, long)]
    pub apply: bool,

    /// Simulate first, then apply only if no collision was found.
    #[arg(short, long)]
    pub safe: bool,

    /// Match pattern case-insensitively.
    #[arg(short = 'i', long)]
    pub case_insensitive: bool,

    /// Recurse into subdirectories.
    #[arg(short, long)]
    pub recurse: bool,

    /// Overwrite existing files/directories.
    #[arg(short = 'f', long)]
    pub force_overwrite: bool,

    /// Rename directories as well, not only files.
    #[arg(short = 'n', long)]
    pub rename_directories: bool,

    /// Match pattern in file extensions as well.
    #[arg(short = 'e', long)]
    pub match_extensions: bool,

    /// Match files in DIRECTORY instead of the current directory.
    #[arg(short = 'd', long, value_name = "DIRECTORY")]
    pub base_directory: Option<PathBuf>,

    /// Emit one JSON object per entry instead of text lines.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Returns `(pattern, replacement)` when exactly two positionals were given.
    pub fn pattern_and_replacement(&self) -> Option<(&str, &str)> {
        match self.positionals.as_slice() {
            [pattern, replacement] => Some((pattern, replacement)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags_and_positionals() {
        let args = Args::try_parse_from(["baren", "-rnaf", "-d", "/tmp", "foo", "bar"]).unwrap();
        assert!(args.recurse);
        assert!(args.rename_directories);
        assert!(args.apply);
        assert!(args.force_overwrite);
        assert!(!args.verbose);
        assert_eq!(args.base_directory, Some(PathBuf::from("/tmp")));
        assert_eq!(args.pattern_and_replacement(), Some(("foo", "bar")));
    }

    #[test]
    fn wrong_positional_count_is_not_a_parse_error() {
        let args = Args::try_parse_from(["baren", "foo"]).unwrap();
        assert_eq!(args.pattern_and_replacement(), None);

        let args = Args::try_parse_from(["baren", "a", "b", "c"]).unwrap();
        assert_eq!(args.pattern_and_replacement(), None);
    }

    #[test]
    fn empty_replacement_is_accepted() {
        let args = Args::try_parse_from(["baren", "-e", "_old", ""]).unwrap();
        assert!(args.match_extensions);
        assert_eq!(args.pattern_and_replacement(), Some(("_old", "")));
    }

    #[test]
    fn help_lists_every_output_code() {
        for code in ["#", "-", "+", "e", "*", "E", "!", "$", "ds", "dr"] {
            assert!(
                OUTPUT_KEY.lines().any(|l| l.trim_start().starts_with(&format!("{} ", code))),
                "missing {code}"
            );
        }
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["baren", "--bogus", "a", "b"]).is_err());
    }
}
