//! Comparison of two benchmark reports.
//!
//! Reports in the Google Benchmark JSON layout (the one written by
//! `arraybench --out`) are matched by name, classified against percentage
//! thresholds, aggregated per kernel and optionally gated for CI.

pub mod aggregate;
pub mod diff;
pub mod gate;
pub mod render;
pub mod style;
pub mod thresholds;

pub use aggregate::{KernelAggregate, aggregate_series, split_kernel_and_size};
pub use diff::{
    BenchmarkMap, Comparison, MetricSample, choose_metric, compare_maps, extract_benchmarks,
    filter_benchmarks, is_throughput_metric, load_benchmarks, load_json,
};
pub use gate::{GateOutcome, evaluate_ci_gate};
pub use render::{RenderOptions, render_report};
pub use style::should_enable_color;
pub use thresholds::{Direction, Severity, Thresholds};
