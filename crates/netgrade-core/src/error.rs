//! Error types and exit codes for netgrade
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid rubric values)
//! - 3: Data error (no configs in a submission, unreadable archive)
//!
//! Only the extraction stage surfaces errors to callers. Malformed lines
//! inside a config are skipped by the parser and never reach this type.

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes used by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - empty or unreadable submission (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while loading and grading submissions
#[derive(Error, Debug)]
pub enum GradeError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("no .txt configuration files found in {source_name}; upload a valid configuration archive")]
    NoConfigsFound { source_name: String },

    #[error("unreadable archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("configuration source not found: {path:?}")]
    SourceNotFound { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl GradeError {
    /// Create an error for a submission without any configuration files
    pub fn no_configs(source_name: impl std::fmt::Display) -> Self {
        GradeError::NoConfigsFound {
            source_name: source_name.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        GradeError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GradeError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GradeError::UsageError(_) | GradeError::InvalidValue { .. } => ExitCode::Usage,

            GradeError::NoConfigsFound { .. }
            | GradeError::Archive(_)
            | GradeError::SourceNotFound { .. } => ExitCode::Data,

            GradeError::Io(_)
            | GradeError::Json(_)
            | GradeError::Toml(_)
            | GradeError::FailedOperationWithTarget { .. }
            | GradeError::Other(_) => ExitCode::Failure,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            GradeError::UsageError(_) => "usage_error",
            GradeError::InvalidValue { .. } => "invalid_value",
            GradeError::NoConfigsFound { .. } => "no_configs_found",
            GradeError::Archive(_) => "archive_error",
            GradeError::SourceNotFound { .. } => "source_not_found",
            GradeError::Io(_) => "io_error",
            GradeError::Json(_) => "json_error",
            GradeError::Toml(_) => "toml_error",
            GradeError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            GradeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for netgrade operations
pub type Result<T> = std::result::Result<T, GradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_configs_is_data_error() {
        let err = GradeError::no_configs("student.zip");
        assert_eq!(err.exit_code(), ExitCode::Data);
        assert!(err.to_string().contains("student.zip"));
    }

    #[test]
    fn test_invalid_value_is_usage_error() {
        let err = GradeError::invalid_value("address prefix", "10.0.0");
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert_eq!(err.to_string(), "invalid address prefix: 10.0.0");
    }

    #[test]
    fn test_to_json_envelope() {
        let err = GradeError::no_configs("master.zip");
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "no_configs_found");
    }
}
