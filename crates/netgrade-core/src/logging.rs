//! Grader diagnostics
//!
//! Diagnostics always go to stderr; stdout carries only the report or the
//! JSON summary. Filter precedence is `RUST_LOG`, then `NETGRADE_LOG`, then
//! the `--log-level` / `--verbose` flags.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events the default filter lets through
const GRADER_TARGETS: [&str; 2] = ["netgrade", "netgrade_core"];

/// Log elapsed time for a grading phase at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// let master = parse_set(&configs, prefix);
/// trace_time!(start, "parse_master");
/// // Or with additional fields:
/// trace_time!(start, "parse_master", routers = master.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Install the global subscriber for a netgrade run.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("NETGRADE_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(grader_directives(flag_level(verbose, log_level))));

    let stderr = fmt::layer().with_writer(std::io::stderr).with_ansi(false);
    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(stderr.json().with_span_events(FmtSpan::NEW | FmtSpan::CLOSE))
            .try_init()?;
    } else {
        registry.with(stderr.compact().with_target(false)).try_init()?;
    }

    Ok(())
}

/// An explicit `--log-level` wins over `--verbose`.
fn flag_level(verbose: bool, log_level: Option<&str>) -> &str {
    match log_level {
        Some(level) => level,
        None if verbose => "debug",
        None => "warn",
    }
}

/// Expand a bare level into directives for the grader crates.
///
/// A value that already names targets (`netgrade_core::grade=trace`) is
/// passed through untouched.
fn grader_directives(level: &str) -> String {
    if level.contains('=') {
        return level.to_string();
    }
    GRADER_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_level() {
        assert_eq!(flag_level(false, None), "warn");
        assert_eq!(flag_level(true, None), "debug");
        assert_eq!(flag_level(true, Some("trace")), "trace");
        assert_eq!(flag_level(false, Some("info")), "info");
    }

    #[test]
    fn test_grader_directives_cover_both_crates() {
        assert_eq!(grader_directives("warn"), "netgrade=warn,netgrade_core=warn");
        assert_eq!(
            grader_directives("netgrade_core::grade=trace"),
            "netgrade_core::grade=trace"
        );
    }
}
