//! Error types for benchmark report comparison.

use thiserror::Error;

/// Errors that can occur while loading or comparing benchmark reports.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}' as JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Input JSON '{path}' doesn't contain a 'benchmarks' list. Provide the JSON produced by a benchmark run"
    )]
    MissingBenchmarks { path: String },

    #[error("Could not find a known metric in benchmark {name}")]
    MetricNotFound { name: String },

    #[error("Metric '{metric}' of benchmark {name} is not a number")]
    InvalidMetricValue { name: String, metric: String },

    #[error("Invalid benchmark filter regex: {0}")]
    InvalidFilter(#[from] regex::Error),

    #[error("Failed to write the comparison report: {0}")]
    Output(#[source] std::io::Error),

    #[error("Invalid thresholds JSON: {0}")]
    InvalidThresholds(#[source] serde_json::Error),
}
