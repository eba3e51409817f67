//! baren: batch rename files and directories with a regular expression.
//!
//! Parses arguments, compiles the pattern and hands a `RenameConfig` to the
//! library. Dry run is the default; `--apply` renames, `--safe` renames only
//! after a collision-free dry run.

use anyhow::{Result, bail};
use baren::cli::Args;
use baren::controller::{self, RunOutcome};
use baren::{ConsoleReporter, JsonReporter, Pattern, RenameConfig, Reporter};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // --help and --version are reported through the error path too
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let Some((pattern, replacement)) = args.pattern_and_replacement() else {
        eprintln!("{}", Args::command().render_help());
        return ExitCode::from(2);
    };

    match run(&args, pattern, replacement) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args, pattern: &str, replacement: &str) -> Result<()> {
    let pattern = Pattern::new(pattern, replacement, args.case_insensitive)?;
    let config = RenameConfig::from_args(args);

    if !config.base_path.is_dir() {
        bail!(
            "Base directory {} does not exist or is not a directory",
            config.base_path.display()
        );
    }

    log::debug!("Pattern: {:?}, config: {:?}", pattern.as_str(), config);

    let mut reporter: Box<dyn Reporter> = if args.json {
        Box::new(JsonReporter)
    } else {
        Box::new(ConsoleReporter::new(config.verbose))
    };

    let outcome = controller::run(&pattern, &config, reporter.as_mut());

    if args.json {
        return Ok(());
    }

    match outcome {
        RunOutcome::Withheld => println!(
            "\n{} Collisions found during simulation, no changes applied",
            "warn:".yellow().bold()
        ),
        RunOutcome::Completed { .. } if !config.apply => {
            println!("\n{} Use --apply to rename", "hint:".cyan().bold())
        }
        _ => {}
    }

    Ok(())
}
