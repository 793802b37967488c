//! Structured error handling and exit codes.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while configuring or running a dedup.
///
/// The dedup pass itself cannot fail; every variant comes from building the
/// deduplicator, loading configuration, or reading and writing files.
#[derive(Error, Debug)]
pub enum DedupError {
    /// The input file does not exist
    #[error("Input file '{name}' not found in '{}'", .dir.display())]
    NotFound {
        /// File name as given by the user
        name: String,
        /// Directory it was looked up in
        dir: PathBuf,
    },

    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// I/O error on a specific path
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The input is not valid UTF-8
    #[error("{} is not valid UTF-8 text (invalid byte at offset {offset})", .path.display())]
    Decode {
        /// Path of the input file
        path: PathBuf,
        /// Byte offset of the first invalid sequence
        offset: usize,
    },

    /// Group size of zero
    #[error("Group size must be at least 1, got {0}")]
    InvalidGroupSize(usize),

    /// Timestamp pattern does not compile
    #[error("Invalid timestamp pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// JSON report serialization failed
    #[error("JSON report error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV report serialization failed
    #[error("CSV report error: {0}")]
    Csv(#[from] csv::Error),
}

impl DedupError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Exit codes for the LineDupe application.
///
/// - 0: Success (duplicate groups were removed)
/// - 1: General error (unexpected failure)
/// - 2: No duplicates found (completed normally, output equals input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Duplicate groups were found and removed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: The run completed but nothing was removed.
    NoDuplicates = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "LD000",
            Self::GeneralError => "LD001",
            Self::NoDuplicates => "LD002",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "LD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
