//! Error types for suite configuration and benchmark runs.

use thiserror::Error;

/// Errors that can occur while configuring or running the benchmark suite.
#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("Failed to parse configuration file '{path}': {source}")]
    ConfigParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration validation error for field '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid benchmark filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("No benchmark matches the filter '{filter}'")]
    NoMatchingCases { filter: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize the benchmark report: {0}")]
    ReportSerialization(#[from] serde_json::Error),
}
