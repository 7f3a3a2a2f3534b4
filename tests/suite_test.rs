//! Tests for case registration, configuration loading and report output.

use arraybench::benchmarks::{
    BenchmarkReport, BenchmarkRunner, ConfigLoader, Registry, ReportContext, SizeSweep,
    SuiteConfig,
};
use arraybench::compare::load_benchmarks;
use arraybench::element::ElementType;
use arraybench::errors::BenchmarkError;
use arraybench::operations::Operation;
use std::fs;

fn quick_config() -> SuiteConfig {
    SuiteConfig {
        min_time_ms: 0,
        max_iterations: 8,
        warmup_iterations: 0,
        element_types: vec![ElementType::F32],
        add_sweep: SizeSweep::new(8, 16, 2),
        copy_sweep: SizeSweep::new(1024, 1024, 2),
        fixed_length: 64,
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn test_default_suite_names() {
        let registry = Registry::default_suite(&SuiteConfig::default());
        let names: Vec<&str> = registry.names().collect();

        assert_eq!(names[0], "add/f32/8");
        assert!(names.contains(&"add/f64/1048576"));
        assert!(names.contains(&"add/i32/512"));
        assert!(names.contains(&"copy/f64/16777216"));
        assert!(names.contains(&"multiply_static/256"));
        assert!(names.contains(&"multiply_static/8192"));
        assert!(names.contains(&"multiply_fixed"));
        assert!(names.contains(&"dot_product_fixed"));
    }

    #[test]
    fn test_default_suite_case_count() {
        let registry = Registry::default_suite(&SuiteConfig::default());
        // 18 add sizes and 15 copy sizes per type, 4 static, 2 fixed
        assert_eq!(registry.len(), 3 * 18 + 3 * 15 + 4 + 2);
    }

    #[test]
    fn test_names_are_unique() {
        let registry = Registry::default_suite(&SuiteConfig::default());
        let mut names: Vec<&str> = registry.names().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_copy_sizes_are_bytes() {
        let registry = Registry::default_suite(&SuiteConfig::default());
        let case = registry.get("copy/f64/1024").unwrap();
        assert_eq!(case.operation(), Operation::Copy);
        assert_eq!(case.size().element_count(8), 128);
    }

    #[test]
    fn test_tiny_copy_reports_one_element_per_iteration() {
        let mut registry = Registry::new();
        registry.register_typed::<f64>(Operation::Copy, &SizeSweep::new(4, 4, 2));

        let results: Vec<_> = registry
            .cases_mut()
            .map(|case| case.run(quick_config().measurement()))
            .collect();

        assert_eq!(results[0].name, "copy/f64/4");
        assert_eq!(results[0].bytes_processed, Some(8 * results[0].iterations));
    }
}

#[cfg(test)]
mod runner_tests {
    use super::*;

    #[test]
    fn test_filter_searches_anywhere_in_name() {
        let runner = BenchmarkRunner::new(quick_config()).unwrap();
        let names = runner.list_benchmarks(Some("f32/1")).unwrap();
        assert_eq!(names, vec!["add/f32/16", "copy/f32/1024"]);
    }

    #[test]
    fn test_run_filtered_cases() {
        let mut runner = BenchmarkRunner::new(quick_config()).unwrap();
        let results = runner.run(Some("^add/")).unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["add/f32/8", "add/f32/16"]);
        assert!(results.iter().all(|r| r.iterations >= 1));
        assert!(results.iter().all(|r| r.bytes_per_second.is_none()));
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let mut config = quick_config();
        config.min_time_ms = 60_000;
        let mut runner = BenchmarkRunner::new(config).unwrap();

        let results = runner.run(Some("multiply_fixed")).unwrap();
        assert_eq!(results[0].iterations, 8);
    }

    #[test]
    fn test_no_matching_cases() {
        let mut runner = BenchmarkRunner::new(quick_config()).unwrap();
        assert!(matches!(
            runner.run(Some("^nothing$")),
            Err(BenchmarkError::NoMatchingCases { .. })
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = quick_config();
        config.add_sweep = SizeSweep::new(16, 8, 2);
        assert!(matches!(
            BenchmarkRunner::new(config),
            Err(BenchmarkError::ConfigValidationError { .. })
        ));
    }
}

#[cfg(test)]
mod config_file_tests {
    use super::*;

    #[test]
    fn test_partial_config_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.json");
        fs::write(&path, r#"{"min_time_ms": 5, "element_types": ["i32"]}"#).unwrap();

        let config = ConfigLoader::load_suite_config(path.to_str()).unwrap();
        assert_eq!(config.min_time_ms, 5);
        assert_eq!(config.element_types, vec![ElementType::I32]);
        assert_eq!(config.fixed_length, SuiteConfig::default().fixed_length);
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ConfigLoader::load_suite_config(path.to_str()),
            Err(BenchmarkError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/suite.json");
        let config = ConfigLoader::load_suite_config(Some(path)).unwrap();
        assert_eq!(config, SuiteConfig::default());
    }

    #[test]
    fn test_report_can_be_compared() {
        let mut config = quick_config();
        config.min_time_ms = 1;
        config.max_iterations = 1_000_000_000;
        let mut runner = BenchmarkRunner::new(config).unwrap();
        let results = runner.run(Some("^copy/")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        BenchmarkReport::new(ReportContext::current(), &results)
            .write_to(&path)
            .unwrap();

        let benchmarks = load_benchmarks(&path).unwrap();
        let entry = &benchmarks["copy/f32/1024"];
        assert_eq!(entry["time_unit"], "ns");
        assert!(entry["bytes_per_second"].as_f64().is_some());
    }
}
