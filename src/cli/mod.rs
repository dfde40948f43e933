//! CLI argument parsing for netgrade
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod parse;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use netgrade_core::report::OutputFormat;
use parse::{parse_output_format, parse_prefix};

/// Netgrade - grade router configuration submissions against a master solution
#[derive(Parser, Debug)]
#[command(name = "netgrade")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `debug` or `netgrade_core=trace`
    #[arg(long, global = true, env = "NETGRADE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grade a student submission against the master solution
    Grade(GradeArgs),

    /// Show the topology inferred from one submission
    Topology {
        /// Zip archive or directory of router configs
        configs: PathBuf,

        /// Address prefix configs are normalized onto, e.g. 10.0
        #[arg(long, value_parser = parse_prefix)]
        prefix: String,
    },
}

#[derive(Args, Debug)]
pub struct GradeArgs {
    /// Master solution: zip archive or directory of router configs
    pub master: PathBuf,

    /// Student submission: zip archive or directory of router configs
    pub student: PathBuf,

    /// Student's address prefix, e.g. 10.0
    #[arg(long, value_parser = parse_prefix)]
    pub prefix: String,

    /// Normalize everything onto this prefix instead of --prefix
    #[arg(long, value_parser = parse_prefix)]
    pub master_prefix: Option<String>,

    /// Master OSPF neighbor tables (defaults to the master configs)
    #[arg(long)]
    pub master_neighbors: Option<PathBuf>,

    /// Student OSPF neighbor tables (defaults to the student configs)
    #[arg(long)]
    pub student_neighbors: Option<PathBuf>,

    /// Rubric TOML file overriding the default deductions
    #[arg(long)]
    pub rubric: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grade_command() {
        let cli = Cli::try_parse_from([
            "netgrade",
            "--format",
            "json",
            "grade",
            "master.zip",
            "student.zip",
            "--prefix",
            "10.0",
            "--student-neighbors",
            "neigh.zip",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Some(Commands::Grade(args)) => {
                assert_eq!(args.master, PathBuf::from("master.zip"));
                assert_eq!(args.prefix, "10.0");
                assert_eq!(args.student_neighbors, Some(PathBuf::from("neigh.zip")));
                assert!(args.master_neighbors.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_format_after_subcommand() {
        let cli = Cli::try_parse_from([
            "netgrade", "topology", "lab.zip", "--prefix", "10.0", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let result = Cli::try_parse_from([
            "netgrade", "topology", "lab.zip", "--prefix", "10.0.0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from(["netgrade", "--format", "records", "topology", "x", "--prefix", "10.0"]);
        assert!(result.is_err());
    }
}
