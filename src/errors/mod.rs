//! Error types for the array benchmark library.
//!
//! Each concern gets its own error enum, avoiding generic error wrappers like
//! `anyhow` or `Box<dyn Error>`.

mod benchmark_error;
mod compare_error;

pub use benchmark_error::BenchmarkError;
pub use compare_error::CompareError;

/// Result type alias for suite configuration and benchmark runs.
pub type BenchmarkResult<T> = std::result::Result<T, BenchmarkError>;

/// Result type alias for report comparison.
pub type CompareResult<T> = std::result::Result<T, CompareError>;
