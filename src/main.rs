//! netgrade: grade student router configurations against a master lab
//!
//! Reads two archives (or directories) of router configs, scores each
//! router, compares the inferred topologies and prints either a text
//! report or a JSON summary.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use netgrade_core::error::{ExitCode as GradeExitCode, GradeError};
use netgrade_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();
    let json_errors = requests_json(env::args().skip(1));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Cli.format is unavailable when parsing fails, so fall back to argv.
            if !json_errors {
                err.exit();
            }
            let grade_error = match usage_failure(&err) {
                Some(error) => error,
                None => err.exit(),
            };
            eprintln!("{}", grade_error.to_json());
            return exit_with(grade_error.exit_code());
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::run(&cli, start) {
        Ok(()) => exit_with(GradeExitCode::Success),
        Err(e) => {
            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else if !cli.quiet {
                eprintln!("error: {}", e);
            }
            exit_with(e.exit_code())
        }
    }
}

fn exit_with(code: GradeExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

/// Whether the raw arguments ask for `--format json`.
fn requests_json<I>(args: I) -> bool
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format=json" => return true,
            "--format" if args.next().is_some_and(|value| value == "json") => return true,
            _ => {}
        }
    }
    false
}

/// Map a clap failure onto the grader's error envelope.
///
/// Returns `None` for `--help` and `--version`, which clap prints itself.
fn usage_failure(err: &clap::Error) -> Option<GradeError> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => Some(GradeError::UsageError(err.to_string())),
        _ => Some(GradeError::Other(err.to_string())),
    }
}
