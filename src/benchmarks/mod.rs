//! Benchmark suite for typed array arithmetic and copy throughput.
//!
//! Cases are registered by name in a [`Registry`], measured through a
//! [`State`] that owns the repetition budget, and written out as a JSON
//! [`BenchmarkReport`].

pub mod benchmark_runner;
pub mod benchmark_types;
pub mod performance_metrics;
pub mod registry;
pub mod report;

pub use benchmark_runner::{BenchmarkRunner, ConfigLoader, DEFAULT_CONFIG_PATH};
pub use benchmark_types::{MeasurementSettings, PerformanceResults, SizeSweep, SuiteConfig};
pub use performance_metrics::{State, print_performance_analysis};
pub use registry::{BenchmarkCase, Registry, Routine};
pub use report::{BenchmarkRecord, BenchmarkReport, ReportContext};
