//! Loading benchmark reports and comparing them entry by entry.

use super::thresholds::{Direction, Severity, Thresholds};
use crate::errors::{CompareError, CompareResult};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Metrics where larger is better, so a decrease is a regression.
pub const THROUGHPUT_METRICS: [&str; 2] = ["bytes_per_second", "items_per_second"];

/// Metric keys tried, in order, after the preferred metric.
pub const METRIC_CANDIDATES: [&str; 4] = [
    "real_time",
    "cpu_time",
    "bytes_per_second",
    "items_per_second",
];

const PRIMARY_METRIC_KEYS: [&str; 3] = ["value", "real_time", "cpu_time"];

pub fn is_throughput_metric(metric: &str) -> bool {
    THROUGHPUT_METRICS.contains(&metric)
}

/// Benchmark entries keyed by name.
pub type BenchmarkMap = BTreeMap<String, Value>;

/// One benchmark present in both reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub name: String,
    pub metric: String,
    pub ref_value: f64,
    pub cur_value: f64,
    pub pct_change: Option<f64>,
    pub direction: Direction,
    pub severity: Severity,
    pub time_unit: Option<String>,
    pub notes: Option<String>,
    pub relative_change: Option<f64>,
}

impl Comparison {
    /// Relative change oriented so that a positive value is always a slowdown.
    pub fn oriented_change(&self) -> Option<f64> {
        self.relative_change.map(|change| {
            if is_throughput_metric(&self.metric) {
                -change
            } else {
                change
            }
        })
    }

    /// Size of a regression in percent, zero for anything else.
    pub fn regression_magnitude_pct(&self) -> f64 {
        match (self.direction, self.pct_change) {
            (Direction::Regression, Some(pct)) if is_throughput_metric(&self.metric) => {
                (-pct).max(0.0)
            }
            (Direction::Regression, Some(pct)) => pct.max(0.0),
            _ => 0.0,
        }
    }

    /// Size of an improvement in percent, zero for anything else.
    pub fn improvement_magnitude_pct(&self) -> f64 {
        match (self.direction, self.pct_change) {
            (Direction::Improvement, Some(pct)) if is_throughput_metric(&self.metric) => {
                pct.max(0.0)
            }
            (Direction::Improvement, Some(pct)) => (-pct).max(0.0),
            _ => 0.0,
        }
    }
}

/// A metric picked from one benchmark entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub metric: String,
    pub time_unit: Option<String>,
    pub value: f64,
}

pub fn load_json(path: &Path) -> CompareResult<Value> {
    let content = fs::read_to_string(path).map_err(|source| CompareError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CompareError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Indexes the entries of a report by name.
///
/// Accepts either an object with a `benchmarks` array or a bare array. An
/// entry is named by `name`, `benchmark` or `bench`; unnamed entries are
/// skipped and later duplicates replace earlier ones.
pub fn extract_benchmarks(document: &Value, source: &str) -> CompareResult<BenchmarkMap> {
    let entries = match document {
        Value::Object(object) => object.get("benchmarks").and_then(Value::as_array),
        Value::Array(entries) => Some(entries),
        _ => None,
    }
    .ok_or_else(|| CompareError::MissingBenchmarks {
        path: source.to_string(),
    })?;

    let mut benchmarks = BenchmarkMap::new();
    for entry in entries {
        if let Some(name) = entry_name(entry) {
            benchmarks.insert(name.to_string(), entry.clone());
        }
    }
    Ok(benchmarks)
}

fn entry_name(entry: &Value) -> Option<&str> {
    ["name", "benchmark", "bench"]
        .into_iter()
        .filter_map(|key| entry.get(key).and_then(Value::as_str))
        .find(|name| !name.is_empty())
}

/// Reads a report from disk and indexes its entries.
pub fn load_benchmarks(path: &Path) -> CompareResult<BenchmarkMap> {
    let document = load_json(path)?;
    extract_benchmarks(&document, &path.display().to_string())
}

/// Keeps the entries whose name matches `pattern` anywhere.
pub fn filter_benchmarks(benchmarks: BenchmarkMap, pattern: &Regex) -> BenchmarkMap {
    benchmarks
        .into_iter()
        .filter(|(name, _)| pattern.is_match(name))
        .collect()
}

/// Picks the metric to compare for one entry.
pub fn choose_metric(entry: &Value, prefer: Option<&str>) -> CompareResult<MetricSample> {
    let name = entry_name(entry).unwrap_or_default();
    let time_unit = entry
        .get("time_unit")
        .and_then(Value::as_str)
        .map(str::to_string);

    let candidates = prefer.into_iter().chain(METRIC_CANDIDATES);
    for key in candidates {
        if let Some(raw) = entry.get(key) {
            return Ok(MetricSample {
                metric: key.to_string(),
                time_unit,
                value: metric_value(raw, name, key)?,
            });
        }
    }

    let primary = entry
        .get("primary_metric")
        .filter(|v| is_truthy(v))
        .or_else(|| entry.get("primary"));
    if let Some(Value::Object(primary)) = primary {
        for key in PRIMARY_METRIC_KEYS {
            if let Some(raw) = primary.get(key) {
                return Ok(MetricSample {
                    metric: key.to_string(),
                    time_unit,
                    value: metric_value(raw, name, key)?,
                });
            }
        }
    }

    Err(CompareError::MetricNotFound {
        name: name.to_string(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Object(o) => !o.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
    }
}

fn metric_value(raw: &Value, name: &str, metric: &str) -> CompareResult<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| CompareError::InvalidMetricValue {
        name: name.to_string(),
        metric: metric.to_string(),
    })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn direction_and_severity(
    metric: &str,
    pct: Option<f64>,
    thresholds: &Thresholds,
) -> (Direction, Severity) {
    let Some(pct) = pct else {
        return (Direction::Unknown, Severity::None);
    };

    let signed_pct = if is_throughput_metric(metric) { -pct } else { pct };
    if signed_pct > thresholds.minor_pct {
        (Direction::Regression, thresholds.classify(signed_pct))
    } else if signed_pct < -thresholds.minor_pct {
        (Direction::Improvement, Severity::None)
    } else {
        (Direction::Unchanged, Severity::None)
    }
}

/// Compares every benchmark present in both maps.
///
/// Regressions come first, then entries by descending percentage change.
pub fn compare_maps(
    reference: &BenchmarkMap,
    current: &BenchmarkMap,
    prefer: Option<&str>,
    thresholds: &Thresholds,
) -> Vec<Comparison> {
    let mut comparisons: Vec<Comparison> = reference
        .iter()
        .filter_map(|(name, ref_entry)| {
            current
                .get(name)
                .map(|cur_entry| compare_entry(name, ref_entry, cur_entry, prefer, thresholds))
        })
        .collect();

    comparisons.sort_by(|a, b| {
        let a_key = (a.direction != Direction::Regression, ordering_pct(a));
        let b_key = (b.direction != Direction::Regression, ordering_pct(b));
        a_key.0.cmp(&b_key.0).then(a_key.1.total_cmp(&b_key.1))
    });
    comparisons
}

fn ordering_pct(comparison: &Comparison) -> f64 {
    match comparison.pct_change {
        Some(pct) if pct != 0.0 => -pct,
        _ => 0.0,
    }
}

fn compare_entry(
    name: &str,
    ref_entry: &Value,
    cur_entry: &Value,
    prefer: Option<&str>,
    thresholds: &Thresholds,
) -> Comparison {
    let samples = choose_metric(ref_entry, prefer)
        .and_then(|r| choose_metric(cur_entry, prefer).map(|c| (r, c)));

    let (reference, current) = match samples {
        Ok(samples) => samples,
        Err(e) => {
            return Comparison {
                name: name.to_string(),
                metric: prefer.unwrap_or("unknown").to_string(),
                ref_value: f64::NAN,
                cur_value: f64::NAN,
                pct_change: None,
                direction: Direction::Unknown,
                severity: Severity::None,
                time_unit: None,
                notes: Some(format!("metric error: {}", e)),
                relative_change: None,
            };
        }
    };

    let (pct, notes) = if reference.value == 0.0 {
        (
            None,
            Some("ref value is zero (cannot compute pct change)".to_string()),
        )
    } else {
        let pct = (current.value - reference.value) / reference.value.abs() * 100.0;
        (Some(pct), None)
    };

    let (direction, severity) = direction_and_severity(&reference.metric, pct, thresholds);

    Comparison {
        name: name.to_string(),
        metric: reference.metric,
        ref_value: reference.value,
        cur_value: current.value,
        pct_change: pct.map(|p| round_to(p, 4)),
        direction,
        severity,
        time_unit: reference.time_unit.or(current.time_unit),
        notes,
        relative_change: pct.map(|p| round_to(p / 100.0, 6)),
    }
}
