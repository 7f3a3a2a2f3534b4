//! Benchmark type definitions and configuration structures.

use crate::element::ElementType;
use crate::errors::{BenchmarkError, BenchmarkResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A multiplicative range of size parameters.
///
/// Expands like a Google Benchmark `Range`: the lower bound, every power of
/// `multiplier` strictly between the bounds, then the upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSweep {
    pub start: usize,
    pub end: usize,
    pub multiplier: usize,
}

impl SizeSweep {
    pub fn new(start: usize, end: usize, multiplier: usize) -> Self {
        Self {
            start,
            end,
            multiplier,
        }
    }

    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![self.start];
        if self.start >= self.end || self.multiplier < 2 {
            return sizes;
        }

        let mut power = 1usize;
        while power < self.end {
            if power > self.start {
                sizes.push(power);
            }
            match power.checked_mul(self.multiplier) {
                Some(next) => power = next,
                None => break,
            }
        }

        sizes.push(self.end);
        sizes
    }

    fn validate(&self, field: &str) -> BenchmarkResult<()> {
        if self.start == 0 {
            return Err(BenchmarkError::ConfigValidationError {
                field: format!("{}.start", field),
                message: "Sweep start must be greater than 0".to_string(),
            });
        }

        if self.start > self.end {
            return Err(BenchmarkError::ConfigValidationError {
                field: field.to_string(),
                message: format!(
                    "Sweep start {} must not exceed end {}",
                    self.start, self.end
                ),
            });
        }

        if self.multiplier < 2 {
            return Err(BenchmarkError::ConfigValidationError {
                field: format!("{}.multiplier", field),
                message: "Sweep multiplier must be at least 2".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration of the benchmark suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Minimum measured time per case, in milliseconds.
    pub min_time_ms: u64,
    /// Upper bound on measured repetitions per case.
    pub max_iterations: u64,
    /// Unmeasured repetitions before timing starts.
    pub warmup_iterations: u32,
    /// Element types the runtime-sized cases are instantiated for.
    pub element_types: Vec<ElementType>,
    /// Element counts of the runtime-sized add cases.
    pub add_sweep: SizeSweep,
    /// Byte sizes of the copy cases.
    pub copy_sweep: SizeSweep,
    /// Element count of the fixed-size multiply and dot product cases.
    pub fixed_length: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            min_time_ms: 100,
            max_iterations: 1_000_000_000,
            warmup_iterations: 5,
            element_types: ElementType::ALL.to_vec(),
            add_sweep: SizeSweep::new(8, 1 << 20, 2),
            copy_sweep: SizeSweep::new(1 << 10, 1 << 24, 2),
            fixed_length: 1 << 16,
        }
    }
}

impl SuiteConfig {
    /// Validates the configuration
    pub fn validate(&self) -> BenchmarkResult<()> {
        if self.max_iterations == 0 {
            return Err(BenchmarkError::ConfigValidationError {
                field: "max_iterations".to_string(),
                message: "Maximum iterations must be greater than 0".to_string(),
            });
        }

        if self.element_types.is_empty() {
            return Err(BenchmarkError::ConfigValidationError {
                field: "element_types".to_string(),
                message: "At least one element type is required".to_string(),
            });
        }

        if self.fixed_length == 0 {
            return Err(BenchmarkError::ConfigValidationError {
                field: "fixed_length".to_string(),
                message: "Fixed length must be greater than 0".to_string(),
            });
        }

        self.add_sweep.validate("add_sweep")?;
        self.copy_sweep.validate("copy_sweep")?;

        Ok(())
    }

    pub fn measurement(&self) -> MeasurementSettings {
        MeasurementSettings {
            warmup_iterations: self.warmup_iterations,
            min_time: Duration::from_millis(self.min_time_ms),
            max_iterations: self.max_iterations,
        }
    }
}

/// How long and how often each case is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementSettings {
    pub warmup_iterations: u32,
    pub min_time: Duration,
    pub max_iterations: u64,
}

/// Performance measurement of a single benchmark case.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceResults {
    pub name: String,
    pub iterations: u64,
    pub total_time_ns: u128,
    pub average_time_ns: f64,
    pub bytes_processed: Option<u64>,
    pub bytes_per_second: Option<f64>,
}

impl PerformanceResults {
    pub fn new(
        name: String,
        total_time_ns: u128,
        iterations: u64,
        bytes_processed: Option<u64>,
    ) -> Self {
        let average_time_ns = if iterations == 0 {
            0.0
        } else {
            total_time_ns as f64 / iterations as f64
        };

        let bytes_per_second = match bytes_processed {
            Some(bytes) if total_time_ns > 0 => {
                Some(bytes as f64 / (total_time_ns as f64 / 1_000_000_000.0))
            }
            _ => None,
        };

        Self {
            name,
            iterations,
            total_time_ns,
            average_time_ns,
            bytes_processed,
            bytes_per_second,
        }
    }
}
