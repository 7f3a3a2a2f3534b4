//! Typed array arithmetic microbenchmarks.
//!
//! The library registers element-wise add, multiply, copy and dot product
//! kernels over `f32`, `f64` and `i32` buffers across size sweeps, measures
//! them with an adaptive repetition harness, and compares two JSON reports of
//! such runs to flag regressions.

pub mod benchmarks;
pub mod buffer;
pub mod compare;
pub mod element;
pub mod errors;
pub mod operations;

pub use benchmarks::{BenchmarkRunner, PerformanceResults, Registry, SuiteConfig};
pub use buffer::{ArrayWorkspace, InitPattern, Storage, VecWorkspace, Workspace};
pub use element::{Element, ElementType};
pub use errors::{BenchmarkError, BenchmarkResult, CompareError, CompareResult};
pub use operations::{Operation, SizeParameter, SizeUnit};
