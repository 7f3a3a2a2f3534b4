//! Per-kernel aggregation of a size sweep.

use super::diff::Comparison;
use super::thresholds::{Direction, Severity, Thresholds};
use serde::Serialize;
use std::collections::HashMap;

/// Summary of every comparison sharing one kernel name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KernelAggregate {
    pub kernel: String,
    pub count: usize,
    pub mean_relative_change: f64,
    pub min_relative_change: f64,
    pub max_relative_change: f64,
    pub aggregated_direction: Direction,
    pub aggregated_severity: Severity,
}

/// Splits `add/f32/1024` into `("add/f32", Some(1024))`.
///
/// Names without a trailing numeric segment are their own kernel.
pub fn split_kernel_and_size(name: &str) -> (&str, Option<u64>) {
    match name.rsplit_once('/') {
        Some((base, size)) if !size.is_empty() && size.bytes().all(|b| b.is_ascii_digit()) => {
            (base, size.parse().ok())
        }
        _ => (name, None),
    }
}

/// Groups comparisons by kernel and summarizes their relative changes.
///
/// Changes are oriented so that a positive mean is a slowdown whatever the
/// metric. Kernels without any computable change are left out. The result is
/// sorted by descending mean.
pub fn aggregate_series(comparisons: &[Comparison], thresholds: &Thresholds) -> Vec<KernelAggregate> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Comparison>> = HashMap::new();
    for comparison in comparisons {
        let (kernel, _) = split_kernel_and_size(&comparison.name);
        groups
            .entry(kernel)
            .or_insert_with(|| {
                order.push(kernel);
                Vec::new()
            })
            .push(comparison);
    }

    let mut aggregates: Vec<KernelAggregate> = order
        .into_iter()
        .filter_map(|kernel| {
            let entries = &groups[kernel];
            let changes: Vec<f64> = entries.iter().filter_map(|c| c.oriented_change()).collect();
            if changes.is_empty() {
                return None;
            }

            let mean = changes.iter().sum::<f64>() / changes.len() as f64;
            let min = changes.iter().copied().fold(f64::INFINITY, f64::min);
            let max = changes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            let magnitude_pct = mean.abs() * 100.0;
            let direction = if magnitude_pct < thresholds.minor_pct {
                Direction::Unchanged
            } else if mean > 0.0 {
                Direction::Regression
            } else {
                Direction::Improvement
            };
            let severity = if direction == Direction::Regression {
                thresholds.classify(magnitude_pct)
            } else {
                Severity::None
            };

            Some(KernelAggregate {
                kernel: kernel.to_string(),
                count: entries.len(),
                mean_relative_change: round6(mean),
                min_relative_change: round6(min),
                max_relative_change: round6(max),
                aggregated_direction: direction,
                aggregated_severity: severity,
            })
        })
        .collect();

    aggregates.sort_by(|a, b| b.mean_relative_change.total_cmp(&a.mean_relative_change));
    aggregates
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_kernel_and_size() {
        assert_eq!(split_kernel_and_size("add/f32/1024"), ("add/f32", Some(1024)));
        assert_eq!(split_kernel_and_size("multiply_fixed"), ("multiply_fixed", None));
        assert_eq!(split_kernel_and_size("copy/f64/big"), ("copy/f64/big", None));
        assert_eq!(split_kernel_and_size("trailing/"), ("trailing/", None));
    }
}
