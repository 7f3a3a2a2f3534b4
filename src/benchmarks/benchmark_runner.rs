//! Core benchmark execution logic.

use super::benchmark_types::{PerformanceResults, SuiteConfig};
use super::performance_metrics::print_performance_analysis;
use super::registry::Registry;
use crate::errors::{BenchmarkError, BenchmarkResult};
use log::{info, warn};
use regex::Regex;
use std::fs;

/// Default location of the suite configuration.
pub const DEFAULT_CONFIG_PATH: &str = "configs/suite.json";

/// Configuration loader that handles JSON files with fallbacks
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration file with fallback to defaults
    pub fn load_config<T>(path: &str, config_name: &str) -> BenchmarkResult<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| BenchmarkError::ConfigParseError {
                    path: path.to_string(),
                    source: e,
                })
            }
            Err(_) => {
                warn!(
                    "Config file '{}' not found, using default configuration for {}",
                    path, config_name
                );
                Ok(T::default())
            }
        }
    }

    /// Load the suite configuration
    pub fn load_suite_config(path: Option<&str>) -> BenchmarkResult<SuiteConfig> {
        Self::load_config(path.unwrap_or(DEFAULT_CONFIG_PATH), "suite")
    }
}

/// Main benchmark runner
pub struct BenchmarkRunner {
    config: SuiteConfig,
    registry: Registry,
}

impl BenchmarkRunner {
    /// Validates `config` and registers the suite it describes.
    pub fn new(config: SuiteConfig) -> BenchmarkResult<Self> {
        config.validate()?;
        let registry = Registry::default_suite(&config);
        Ok(Self { config, registry })
    }

    /// Runner over an explicitly built registry.
    pub fn with_registry(config: SuiteConfig, registry: Registry) -> BenchmarkResult<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Names of the registered cases, optionally restricted by `filter`.
    pub fn list_benchmarks(&self, filter: Option<&str>) -> BenchmarkResult<Vec<String>> {
        let pattern = compile_filter(filter)?;
        Ok(self
            .registry
            .names()
            .filter(|name| matches_filter(pattern.as_ref(), name))
            .map(str::to_string)
            .collect())
    }

    /// Runs every case whose name matches `filter` (all cases without one).
    pub fn run(&mut self, filter: Option<&str>) -> BenchmarkResult<Vec<PerformanceResults>> {
        let pattern = compile_filter(filter)?;
        let settings = self.config.measurement();

        info!(
            "Starting benchmark suite ({} registered cases, min time {} ms)",
            self.registry.len(),
            self.config.min_time_ms
        );

        let mut results = Vec::new();
        for case in self.registry.cases_mut() {
            if !matches_filter(pattern.as_ref(), case.name()) {
                continue;
            }

            info!("Benchmarking {}...", case.name());
            let case_results = case.run(settings);
            info!(
                "  {} iterations, {:.1} ns/iteration",
                case_results.iterations, case_results.average_time_ns
            );
            results.push(case_results);
        }

        if results.is_empty() {
            return Err(BenchmarkError::NoMatchingCases {
                filter: filter.unwrap_or_default().to_string(),
            });
        }

        info!("Benchmark suite completed: {} cases", results.len());
        Ok(results)
    }

    /// Runs the matching cases and prints the result table.
    pub fn run_and_print(&mut self, filter: Option<&str>) -> BenchmarkResult<Vec<PerformanceResults>> {
        let results = self.run(filter)?;
        print_performance_analysis(&results);
        Ok(results)
    }
}

fn compile_filter(filter: Option<&str>) -> BenchmarkResult<Option<Regex>> {
    filter
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| BenchmarkError::InvalidFilter {
                pattern: pattern.to_string(),
                source,
            })
        })
        .transpose()
}

fn matches_filter(pattern: Option<&Regex>, name: &str) -> bool {
    pattern.is_none_or(|re| re.is_match(name))
}
