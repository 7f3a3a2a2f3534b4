//! JSON report of a benchmark run.
//!
//! The layout follows the Google Benchmark JSON output (a `context` object and
//! a `benchmarks` array) so reports can be fed to `benchdiff` or to any tool
//! that understands that format.

use super::benchmark_types::PerformanceResults;
use crate::errors::BenchmarkResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
    pub executable: String,
    pub num_cpus: usize,
    pub library_build_type: String,
    /// Seconds since the Unix epoch at which the report was produced.
    pub timestamp: u64,
}

impl ReportContext {
    pub fn current() -> Self {
        let executable = std::env::args().next().unwrap_or_default();
        let num_cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let library_build_type = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        };
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            executable,
            num_cpus,
            library_build_type: library_build_type.to_string(),
            timestamp,
        }
    }
}

/// One measured case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub run_name: String,
    pub run_type: String,
    pub iterations: u64,
    /// Average wall time per iteration, in `time_unit`.
    pub real_time: f64,
    pub time_unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_per_second: Option<f64>,
}

impl From<&PerformanceResults> for BenchmarkRecord {
    fn from(results: &PerformanceResults) -> Self {
        Self {
            name: results.name.clone(),
            run_name: results.name.clone(),
            run_type: "iteration".to_string(),
            iterations: results.iterations,
            real_time: results.average_time_ns,
            time_unit: "ns".to_string(),
            bytes_per_second: results.bytes_per_second,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub context: ReportContext,
    pub benchmarks: Vec<BenchmarkRecord>,
}

impl BenchmarkReport {
    pub fn new(context: ReportContext, results: &[PerformanceResults]) -> Self {
        Self {
            context,
            benchmarks: results.iter().map(BenchmarkRecord::from).collect(),
        }
    }

    pub fn to_json(&self) -> BenchmarkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> BenchmarkResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ReportContext {
        ReportContext {
            executable: "arraybench".to_string(),
            num_cpus: 4,
            library_build_type: "release".to_string(),
            timestamp: 0,
        }
    }

    #[test]
    fn test_bytes_per_second_is_omitted_when_absent() {
        let results = vec![PerformanceResults::new("add/f32/8".to_string(), 1_000, 10, None)];
        let json = BenchmarkReport::new(context(), &results).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let record = &value["benchmarks"][0];
        assert_eq!(record["name"], "add/f32/8");
        assert_eq!(record["real_time"], 100.0);
        assert_eq!(record["time_unit"], "ns");
        assert!(record.get("bytes_per_second").is_none());
    }

    #[test]
    fn test_bytes_per_second_is_written_for_copy() {
        let results = vec![PerformanceResults::new(
            "copy/f64/1024".to_string(),
            1_000_000_000,
            2,
            Some(2048),
        )];
        let report = BenchmarkReport::new(context(), &results);
        assert_eq!(report.benchmarks[0].bytes_per_second, Some(2048.0));
    }
}
