//! Tests for comparing two benchmark reports.

use arraybench::compare::{
    BenchmarkMap, Direction, RenderOptions, Severity, Thresholds, aggregate_series,
    compare_maps, evaluate_ci_gate, extract_benchmarks, filter_benchmarks, load_benchmarks,
    render_report,
};
use arraybench::errors::CompareError;
use regex::Regex;
use serde_json::{Value, json};
use std::fs;

fn report(entries: &[(&str, &str, f64)]) -> BenchmarkMap {
    let benchmarks: Vec<Value> = entries
        .iter()
        .map(|(name, metric, value)| json!({"name": name, metric.to_string(): value, "time_unit": "ns"}))
        .collect();
    extract_benchmarks(&json!({ "benchmarks": benchmarks }), "test.json").unwrap()
}

#[cfg(test)]
mod comparison_tests {
    use super::*;

    #[test]
    fn test_only_common_names_are_compared() {
        let reference = report(&[("add/f32/8", "real_time", 10.0), ("old", "real_time", 1.0)]);
        let current = report(&[("add/f32/8", "real_time", 10.0), ("new", "real_time", 1.0)]);

        let comparisons = compare_maps(&reference, &current, None, &Thresholds::default());
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].name, "add/f32/8");
    }

    #[test]
    fn test_time_increase_is_major_regression() {
        let reference = report(&[("add/f32/8", "real_time", 100.0)]);
        let current = report(&[("add/f32/8", "real_time", 120.0)]);

        let c = &compare_maps(&reference, &current, None, &Thresholds::default())[0];
        assert_eq!(c.direction, Direction::Regression);
        assert_eq!(c.severity, Severity::Major);
        assert_eq!(c.pct_change, Some(20.0));
        assert_eq!(c.relative_change, Some(0.2));
        assert_eq!(c.time_unit.as_deref(), Some("ns"));
    }

    #[test]
    fn test_throughput_increase_is_improvement() {
        let reference = report(&[("copy/f32/1024", "bytes_per_second", 1.0e9)]);
        let current = report(&[("copy/f32/1024", "bytes_per_second", 1.2e9)]);

        let c = &compare_maps(&reference, &current, None, &Thresholds::default())[0];
        assert_eq!(c.metric, "bytes_per_second");
        assert_eq!(c.direction, Direction::Improvement);
        assert_eq!(c.severity, Severity::None);
    }

    #[test]
    fn test_changes_within_minor_are_unchanged() {
        let reference = report(&[("a", "real_time", 100.0), ("b", "real_time", 100.0)]);
        let current = report(&[("a", "real_time", 101.5), ("b", "real_time", 98.5)]);

        let comparisons = compare_maps(&reference, &current, None, &Thresholds::default());
        assert!(comparisons.iter().all(|c| c.direction == Direction::Unchanged));
    }

    #[test]
    fn test_zero_reference_is_unknown() {
        let reference = report(&[("a", "real_time", 0.0)]);
        let current = report(&[("a", "real_time", 5.0)]);

        let c = &compare_maps(&reference, &current, None, &Thresholds::default())[0];
        assert_eq!(c.direction, Direction::Unknown);
        assert_eq!(c.pct_change, None);
        assert_eq!(
            c.notes.as_deref(),
            Some("ref value is zero (cannot compute pct change)")
        );
    }

    #[test]
    fn test_missing_metric_becomes_unknown_entry() {
        let reference = report(&[("a", "iterations", 10.0)]);
        let current = report(&[("a", "real_time", 5.0)]);

        let c = &compare_maps(&reference, &current, None, &Thresholds::default())[0];
        assert_eq!(c.direction, Direction::Unknown);
        assert!(c.ref_value.is_nan());
        assert!(c.notes.as_deref().unwrap().starts_with("metric error:"));
    }

    #[test]
    fn test_regressions_are_listed_first() {
        let reference = report(&[
            ("a", "real_time", 100.0),
            ("b", "real_time", 100.0),
            ("c", "real_time", 100.0),
        ]);
        let current = report(&[
            ("a", "real_time", 50.0),
            ("b", "real_time", 106.0),
            ("c", "real_time", 130.0),
        ]);

        let comparisons = compare_maps(&reference, &current, None, &Thresholds::default());
        let names: Vec<&str> = comparisons.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds::with_overrides(r#"{"major_pct": 50}"#).unwrap();
        let reference = report(&[("a", "real_time", 100.0)]);
        let current = report(&[("a", "real_time", 120.0)]);

        let c = &compare_maps(&reference, &current, None, &thresholds)[0];
        assert_eq!(c.severity, Severity::Moderate);
    }

    #[test]
    fn test_filter_applies_to_both_sides() {
        let pattern = Regex::new("^copy/").unwrap();
        let reference = filter_benchmarks(
            report(&[("copy/f32/1024", "real_time", 1.0), ("add/f32/8", "real_time", 1.0)]),
            &pattern,
        );
        assert_eq!(reference.len(), 1);
        assert!(reference.contains_key("copy/f32/1024"));
    }
}

#[cfg(test)]
mod aggregation_tests {
    use super::*;

    #[test]
    fn test_sizes_aggregate_under_one_kernel() {
        let reference = report(&[
            ("add/f32/8", "real_time", 100.0),
            ("add/f32/16", "real_time", 100.0),
            ("copy/f32/1024", "bytes_per_second", 100.0),
        ]);
        let current = report(&[
            ("add/f32/8", "real_time", 110.0),
            ("add/f32/16", "real_time", 130.0),
            ("copy/f32/1024", "bytes_per_second", 150.0),
        ]);

        let thresholds = Thresholds::default();
        let comparisons = compare_maps(&reference, &current, None, &thresholds);
        let aggregates = aggregate_series(&comparisons, &thresholds);

        assert_eq!(aggregates.len(), 2);
        let add = &aggregates[0];
        assert_eq!(add.kernel, "add/f32");
        assert_eq!(add.count, 2);
        assert_eq!(add.mean_relative_change, 0.2);
        assert_eq!(add.min_relative_change, 0.1);
        assert_eq!(add.max_relative_change, 0.3);
        assert_eq!(add.aggregated_direction, Direction::Regression);
        assert_eq!(add.aggregated_severity, Severity::Major);

        // higher throughput counts as an improvement
        let copy = &aggregates[1];
        assert_eq!(copy.kernel, "copy/f32");
        assert_eq!(copy.mean_relative_change, -0.5);
        assert_eq!(copy.aggregated_direction, Direction::Improvement);
    }
}

#[cfg(test)]
mod gate_tests {
    use super::*;

    fn comparisons(current_time: f64) -> Vec<arraybench::compare::Comparison> {
        let reference = report(&[("a", "real_time", 100.0), ("b", "real_time", 100.0)]);
        let current = report(&[("a", "real_time", current_time), ("b", "real_time", 100.0)]);
        compare_maps(&reference, &current, None, &Thresholds::default())
    }

    #[test]
    fn test_major_regression_fails_default_gate() {
        let outcome = evaluate_ci_gate(&comparisons(125.0), Severity::Major, None);
        assert!(outcome.failed);
        assert_eq!(outcome.reasons, vec!["severity>=major: a (real_time) +25.00%"]);
        assert_eq!(outcome.worst_regression.unwrap().name, "a");
    }

    #[test]
    fn test_minor_regression_passes_default_gate() {
        let outcome = evaluate_ci_gate(&comparisons(103.0), Severity::Major, None);
        assert!(!outcome.failed);
        assert!(outcome.reasons.is_empty());
        assert_eq!(outcome.worst_regression.unwrap().name, "a");
    }

    #[test]
    fn test_minor_regression_fails_minor_gate() {
        let outcome = evaluate_ci_gate(&comparisons(103.0), Severity::Minor, None);
        assert!(outcome.failed);
    }

    #[test]
    fn test_top_regression_limit() {
        let outcome = evaluate_ci_gate(&comparisons(103.0), Severity::Major, Some(3.0));
        assert!(outcome.failed);
        assert_eq!(
            outcome.reasons,
            vec!["top_regression a (real_time) magnitude 3.00% >= 3.00%"]
        );

        let outcome = evaluate_ci_gate(&comparisons(103.0), Severity::Major, Some(3.5));
        assert!(!outcome.failed);
    }

    #[test]
    fn test_no_regression_has_no_worst_entry() {
        let outcome = evaluate_ci_gate(&comparisons(90.0), Severity::Minor, Some(1.0));
        assert!(!outcome.failed);
        assert!(outcome.worst_regression.is_none());
    }
}

#[cfg(test)]
mod input_tests {
    use super::*;

    #[test]
    fn test_bare_array_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, r#"[{"bench": "x", "cpu_time": 3}]"#).unwrap();

        let benchmarks = load_benchmarks(&path).unwrap();
        assert!(benchmarks.contains_key("x"));
    }

    #[test]
    fn test_missing_file_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_benchmarks(&missing),
            Err(CompareError::Io { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").unwrap();
        assert!(matches!(
            load_benchmarks(&broken),
            Err(CompareError::Parse { .. })
        ));
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;

    #[test]
    fn test_uncolored_output_has_no_escapes() {
        let reference = report(&[("add/f32/8", "real_time", 100.0), ("add/f32/16", "real_time", 100.0)]);
        let current = report(&[("add/f32/8", "real_time", 130.0), ("add/f32/16", "real_time", 80.0)]);
        let comparisons = compare_maps(&reference, &current, None, &Thresholds::default());
        let gate = evaluate_ci_gate(&comparisons, Severity::Major, None);

        let options = RenderOptions {
            aggregate_top: true,
            ..RenderOptions::default()
        };
        let mut buffer = Vec::new();
        render_report(&mut buffer, &comparisons, &options, Some(&gate)).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("Quick Summary"));
        assert!(text.contains("Aggregated per-kernel (top by mean rel change)"));
        assert!(text.contains("Top entries"));
        assert!(text.contains("+30.00%"));
        assert!(text.contains("-20.00%"));
        assert!(text.contains("CI Gate"));
        assert!(text.contains("\"failed\": true"));
    }
}
