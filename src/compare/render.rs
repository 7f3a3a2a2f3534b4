//! Terminal report of a comparison.

use super::aggregate::{KernelAggregate, aggregate_series};
use super::diff::Comparison;
use super::gate::GateOutcome;
use super::style::{
    Align, Styled, Tone, direction_label, fit_text, paint, relative_change, severity_label,
};
use super::thresholds::{Direction, Severity, Thresholds};
use std::io::{self, Write};

pub const NAME_COL_WIDTH: usize = 48;
pub const METRIC_COL_WIDTH: usize = 16;
pub const KERNEL_COL_WIDTH: usize = 48;
pub const DIR_COL_WIDTH: usize = 12;

pub const TOP_REG_COUNT: usize = 6;
pub const TOP_IMP_COUNT: usize = 6;

const AGGREGATED_TOP_COUNT: usize = 10;
const AGGREGATED_FULL_COUNT: usize = 30;
const CELL_WIDTH: usize = 8;

/// What to print and how.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub thresholds: Thresholds,
    pub color_enabled: bool,
    /// Print the aggregated top kernels before anything else.
    pub aggregate_top: bool,
    /// Skip the per-entry tables.
    pub aggregate_only: bool,
    /// Number of improvements in the top entries, `TOP_IMP_COUNT` when unset.
    pub top_imp: Option<usize>,
    /// Lift every row limit of the top entries.
    pub show_all: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            color_enabled: false,
            aggregate_top: false,
            aggregate_only: false,
            top_imp: None,
            show_all: false,
        }
    }
}

/// Writes every section selected by `options`, followed by the gate when given.
pub fn render_report<W: Write>(
    out: &mut W,
    comparisons: &[Comparison],
    options: &RenderOptions,
    gate: Option<&GateOutcome>,
) -> io::Result<()> {
    write_quick_summary(out, comparisons, options.color_enabled)?;

    if options.aggregate_top {
        write_aggregated_top(out, comparisons, &options.thresholds, options.color_enabled)?;
    }

    if !options.aggregate_only {
        write_top_entries(out, comparisons, options)?;
    }
    write_aggregated_full(out, comparisons, &options.thresholds, options.color_enabled)?;

    if let Some(gate) = gate {
        write_gate(out, gate)?;
    }
    Ok(())
}

pub fn write_section<W: Write>(out: &mut W, title: &str, color_enabled: bool) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", paint(title, Tone::Heading, color_enabled))?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

pub fn write_quick_summary<W: Write>(
    out: &mut W,
    comparisons: &[Comparison],
    color_enabled: bool,
) -> io::Result<()> {
    let regressions = count_direction(comparisons, Direction::Regression);
    let improvements = count_direction(comparisons, Direction::Improvement);

    write_section(out, "Quick Summary", color_enabled)?;

    let label_width = "Total compared".len();
    let value_width = CELL_WIDTH;
    let rule = "-".repeat(label_width + 3 + value_width);

    let counted = |count: usize, tone: Tone| {
        if count > 0 {
            Styled::new(count.to_string(), tone)
        } else {
            Styled::new("0", Tone::Bold)
        }
    };
    let rows = [
        ("Total compared", Styled::new(comparisons.len().to_string(), Tone::Bold)),
        ("Regressions", counted(regressions, Tone::BoldRed)),
        ("Improvements", counted(improvements, Tone::BoldGreen)),
    ];

    writeln!(out, "{}", rule)?;
    for (label, value) in rows {
        writeln!(
            out,
            "{:<label_width$} | {}",
            label,
            value.pad(value_width, Align::Right, color_enabled)
        )?;
    }
    writeln!(out, "{}", rule)
}

fn count_direction(comparisons: &[Comparison], direction: Direction) -> usize {
    comparisons.iter().filter(|c| c.direction == direction).count()
}

fn aggregated_header() -> String {
    format!(
        "{:<KERNEL_COL_WIDTH$} | {:>3} | {:>8} | {:>8} | {:>8} | {:>DIR_COL_WIDTH$} | {:>8}",
        "kernel", "n", "mean", "min", "max", "direction", "severity"
    )
}

pub fn write_aggregated_top<W: Write>(
    out: &mut W,
    comparisons: &[Comparison],
    thresholds: &Thresholds,
    color_enabled: bool,
) -> io::Result<()> {
    write_section(out, "Aggregated per-kernel (top by mean rel change)", color_enabled)?;
    write_aggregates(out, comparisons, thresholds, color_enabled, AGGREGATED_TOP_COUNT)
}

pub fn write_aggregated_full<W: Write>(
    out: &mut W,
    comparisons: &[Comparison],
    thresholds: &Thresholds,
    color_enabled: bool,
) -> io::Result<()> {
    write_section(
        out,
        "Aggregated per-kernel view (mean/min/max relative change)",
        color_enabled,
    )?;
    write_aggregates(out, comparisons, thresholds, color_enabled, AGGREGATED_FULL_COUNT)
}

fn write_aggregates<W: Write>(
    out: &mut W,
    comparisons: &[Comparison],
    thresholds: &Thresholds,
    color_enabled: bool,
    limit: usize,
) -> io::Result<()> {
    let header = aggregated_header();
    writeln!(out, "{}", header)?;
    writeln!(out, "{}", "-".repeat(header.len()))?;

    for aggregate in aggregate_series(comparisons, thresholds).iter().take(limit) {
        writeln!(out, "{}", aggregate_row(aggregate, thresholds, color_enabled))?;
    }
    Ok(())
}

fn aggregate_row(aggregate: &KernelAggregate, thresholds: &Thresholds, color_enabled: bool) -> String {
    // aggregated changes are already oriented
    let change = |value: f64| relative_change(Some(value), Some(value), thresholds);

    let label_severity = match aggregate.aggregated_direction {
        Direction::Regression => aggregate.aggregated_severity,
        Direction::Improvement => {
            severity_above_minor(aggregate.mean_relative_change, thresholds).unwrap_or(Severity::None)
        }
        _ => Severity::None,
    };

    let (min, max) = if aggregate.count > 1 {
        (
            change(aggregate.min_relative_change),
            change(aggregate.max_relative_change),
        )
    } else {
        (Styled::new("NA", Tone::Neutral), Styled::new("NA", Tone::Neutral))
    };

    format!(
        "{:<KERNEL_COL_WIDTH$} | {:>3} | {} | {} | {} | {} | {}",
        aggregate.kernel,
        aggregate.count,
        change(aggregate.mean_relative_change).pad(CELL_WIDTH, Align::Right, color_enabled),
        min.pad(CELL_WIDTH, Align::Right, color_enabled),
        max.pad(CELL_WIDTH, Align::Right, color_enabled),
        direction_label(aggregate.aggregated_direction, label_severity).pad(
            DIR_COL_WIDTH,
            Align::Right,
            color_enabled
        ),
        severity_label(aggregate.aggregated_severity, aggregate.aggregated_direction).pad(
            CELL_WIDTH,
            Align::Right,
            color_enabled
        ),
    )
}

/// Severity of a relative change, `None` below the minor threshold.
fn severity_above_minor(change: f64, thresholds: &Thresholds) -> Option<Severity> {
    let magnitude_pct = change.abs() * 100.0;
    (magnitude_pct >= thresholds.minor_pct).then(|| thresholds.classify(magnitude_pct))
}

/// Writes the worst regressions, a rule, then the best improvements.
pub fn write_top_entries<W: Write>(
    out: &mut W,
    comparisons: &[Comparison],
    options: &RenderOptions,
) -> io::Result<()> {
    write_section(out, "Top entries", options.color_enabled)?;
    let header = format!(
        "{:<NAME_COL_WIDTH$} | {:<METRIC_COL_WIDTH$} | {:>8} | {:>DIR_COL_WIDTH$} | {:>8}",
        "name", "metric", "rel_chg", "direction", "severity"
    );
    writeln!(out, "{}", header)?;
    writeln!(out, "{}", "-".repeat(header.len()))?;

    let mut regressions: Vec<&Comparison> = comparisons
        .iter()
        .filter(|c| c.direction == Direction::Regression)
        .collect();
    regressions.sort_by(|a, b| {
        b.regression_magnitude_pct()
            .total_cmp(&a.regression_magnitude_pct())
    });
    if !options.show_all {
        regressions.truncate(TOP_REG_COUNT);
    }
    for comparison in regressions {
        writeln!(out, "{}", entry_row(comparison, options))?;
    }

    writeln!(out, "{}", "-".repeat(header.len()))?;

    let mut improvements: Vec<&Comparison> = comparisons
        .iter()
        .filter(|c| c.direction == Direction::Improvement)
        .collect();
    improvements.sort_by(|a, b| {
        b.improvement_magnitude_pct()
            .total_cmp(&a.improvement_magnitude_pct())
    });
    if !options.show_all {
        improvements.truncate(options.top_imp.unwrap_or(TOP_IMP_COUNT));
    }
    improvements.sort_by(|a, b| {
        a.relative_change
            .unwrap_or_default()
            .total_cmp(&b.relative_change.unwrap_or_default())
    });
    for comparison in improvements {
        writeln!(out, "{}", entry_row(comparison, options))?;
    }
    Ok(())
}

fn entry_row(comparison: &Comparison, options: &RenderOptions) -> String {
    let thresholds = &options.thresholds;
    let color_enabled = options.color_enabled;

    let rel = relative_change(
        comparison.relative_change,
        comparison.oriented_change(),
        thresholds,
    );
    let label_severity = severity_above_minor(comparison.relative_change.unwrap_or_default(), thresholds)
        .unwrap_or(Severity::Minor);

    format!(
        "{:<NAME_COL_WIDTH$} | {:<METRIC_COL_WIDTH$} | {} | {} | {}",
        fit_text(&comparison.name, NAME_COL_WIDTH),
        fit_text(&comparison.metric, METRIC_COL_WIDTH),
        rel.pad(CELL_WIDTH, Align::Right, color_enabled),
        direction_label(comparison.direction, label_severity).pad(
            DIR_COL_WIDTH,
            Align::Right,
            color_enabled
        ),
        severity_label(comparison.severity, comparison.direction).pad(
            CELL_WIDTH,
            Align::Right,
            color_enabled
        ),
    )
}

/// Writes the gate verdict as pretty JSON.
pub fn write_gate<W: Write>(out: &mut W, gate: &GateOutcome) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "CI Gate")?;
    writeln!(out, "-------")?;
    let json = serde_json::to_string_pretty(gate).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}
