//! Error types and exit codes for gradeshape
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, malformed input files)
//! - 2: Usage error (bad flags/args, bad configuration values)
//! - 3: Data error (invalid grade or structure, uncoverable target shape)

mod macros;

use thiserror::Error;

use crate::criterion::GradePath;

/// Exit codes for the gradeshape CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - invalid grade, structure or target shape (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while building or compressing grades
#[derive(Error, Debug)]
pub enum GradeError {
    // Grade construction
    #[error("invalid points: {points} (points must be finite)")]
    InvalidPoints { points: f64 },

    #[error("invalid weight for {criterion}: {weight} (weights must be finite and non-negative)")]
    NegativeWeight { criterion: String, weight: f64 },

    #[error("a composite grade needs at least one sub-grade")]
    EmptyComposite,

    #[error("invalid criterion name {name:?} (names must be non-empty, without '/' or surrounding whitespace)")]
    InvalidCriterion { name: String },

    // Structure and path handling
    #[error("invalid structure: {reason}")]
    InvalidStructure { reason: String },

    #[error("unknown path: {path}")]
    UnknownPath { path: GradePath },

    #[error("invalid path operation: {operation} on {path}")]
    InvalidPathOperation { operation: String, path: GradePath },

    // Compression
    #[error("cannot cover criteria [{criteria}] below {frontier}")]
    UncoverableStructure { criteria: String, frontier: String },

    // Usage errors
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Generic failures
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
    /// Create an error for a structure invariant violation
    pub fn invalid_structure(reason: impl Into<String>) -> Self {
        GradeError::InvalidStructure {
            reason: reason.into(),
        }
    }

    /// Create an error for a path that is not part of a grade or structure
    pub fn unknown_path(path: &GradePath) -> Self {
        GradeError::UnknownPath { path: path.clone() }
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
            GradeError::UnknownFormat(_)
            | GradeError::UsageError(_)
            | GradeError::InvalidValue { .. } => ExitCode::Usage,

            GradeError::InvalidPoints { .. }
            | GradeError::NegativeWeight { .. }
            | GradeError::EmptyComposite
            | GradeError::InvalidCriterion { .. }
            | GradeError::InvalidStructure { .. }
            | GradeError::UnknownPath { .. }
            | GradeError::InvalidPathOperation { .. }
            | GradeError::UncoverableStructure { .. } => ExitCode::Data,

            GradeError::Io(_)
            | GradeError::Json(_)
            | GradeError::Toml(_)
            | GradeError::FailedOperationWithTarget { .. }
            | GradeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GradeError::InvalidPoints { .. } => "invalid_points",
            GradeError::NegativeWeight { .. } => "negative_weight",
            GradeError::EmptyComposite => "empty_composite",
            GradeError::InvalidCriterion { .. } => "invalid_criterion",
            GradeError::InvalidStructure { .. } => "invalid_structure",
            GradeError::UnknownPath { .. } => "unknown_path",
            GradeError::InvalidPathOperation { .. } => "invalid_path_operation",
            GradeError::UncoverableStructure { .. } => "uncoverable_structure",
            GradeError::UnknownFormat(_) => "unknown_format",
            GradeError::UsageError(_) => "usage_error",
            GradeError::InvalidValue { .. } => "invalid_value",
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

/// Result type alias for gradeshape operations
pub type Result<T> = std::result::Result<T, GradeError>;
