//! Compares two Google Benchmark style JSON reports.
//!
//! Exit codes: 0 on success, 1 when an input cannot be read or interpreted,
//! 2 for invalid arguments, 4 when the CI gate fails.

use arraybench::compare::{
    RenderOptions, Severity, Thresholds, compare_maps, evaluate_ci_gate, filter_benchmarks,
    load_benchmarks, render_report, should_enable_color,
};
use arraybench::errors::{CompareError, CompareResult};
use clap::Parser;
use log::{debug, error};
use regex::Regex;
use std::io::{self, Write};
use std::path::PathBuf;

const EXIT_INPUT_ERROR: i32 = 1;
const EXIT_INVALID_ARGS: i32 = 2;
const EXIT_GATE_FAILED: i32 = 4;

#[derive(Parser, Debug)]
#[command(name = "benchdiff")]
#[command(about = "Compare Google Benchmark JSON outputs (local summary only)")]
struct Args {
    /// Reference JSON (baseline)
    #[arg(long = "ref")]
    reference: PathBuf,

    /// Current JSON (to compare)
    #[arg(long = "cur")]
    current: PathBuf,

    /// Preferred metric (real_time, cpu_time, bytes_per_second, items_per_second)
    #[arg(long)]
    metric: Option<String>,

    /// Regex selecting benchmark names (matches anywhere in the name)
    #[arg(long)]
    benchmark_filter: Option<String>,

    /// JSON object overriding thresholds (minor_pct, moderate_pct, major_pct)
    #[arg(long)]
    thresholds: Option<String>,

    /// Exit with a non-zero code when the gate fails
    #[arg(long)]
    ci: bool,

    /// Severity that fails the gate (minor, moderate or major)
    #[arg(long, default_value = "major", value_parser = parse_fail_on)]
    ci_fail_on: Severity,

    /// Fail when the worst regression magnitude reaches this percentage
    #[arg(long)]
    ci_max_top_reg_pct: Option<f64>,

    /// Show only the aggregated per-kernel view
    #[arg(long)]
    aggregate_only: bool,

    /// Show the aggregated top kernels before the other sections
    #[arg(long)]
    aggregate_top: bool,

    /// Disable ANSI colors (NO_COLOR has the same effect)
    #[arg(long)]
    no_color: bool,

    /// Number of improvements listed in the top entries
    #[arg(long)]
    top_imp: Option<usize>,

    /// List every entry without truncation
    #[arg(long)]
    show_all: bool,
}

fn parse_fail_on(level: &str) -> Result<Severity, String> {
    match level.parse::<Severity>()? {
        Severity::None => Err("the gate level must be minor, moderate or major".to_string()),
        severity => Ok(severity),
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

fn exit_code(error: &CompareError) -> i32 {
    match error {
        CompareError::InvalidFilter(_) | CompareError::InvalidThresholds(_) => EXIT_INVALID_ARGS,
        _ => EXIT_INPUT_ERROR,
    }
}

fn run(args: &Args) -> CompareResult<i32> {
    let thresholds = match &args.thresholds {
        Some(json) => Thresholds::with_overrides(json)?,
        None => Thresholds::default(),
    };
    let filter = args
        .benchmark_filter
        .as_deref()
        .map(Regex::new)
        .transpose()?;

    let color_enabled = should_enable_color(args.no_color);
    colored::control::set_override(color_enabled);

    let mut reference = load_benchmarks(&args.reference)?;
    let mut current = load_benchmarks(&args.current)?;
    if let Some(pattern) = &filter {
        reference = filter_benchmarks(reference, pattern);
        current = filter_benchmarks(current, pattern);
    }
    debug!(
        "Comparing {} reference and {} current benchmarks",
        reference.len(),
        current.len()
    );

    let comparisons = compare_maps(&reference, &current, args.metric.as_deref(), &thresholds);

    let gate = args.ci.then(|| {
        evaluate_ci_gate(
            &comparisons,
            args.ci_fail_on,
            args.ci_max_top_reg_pct,
        )
    });

    let options = RenderOptions {
        thresholds,
        color_enabled,
        aggregate_top: args.aggregate_top,
        aggregate_only: args.aggregate_only,
        top_imp: args.top_imp,
        show_all: args.show_all,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_report(&mut out, &comparisons, &options, gate.as_ref())
        .and_then(|()| out.flush())
        .map_err(CompareError::Output)?;

    if gate.is_some_and(|g| g.failed) {
        eprintln!("CI gating: regression rules failed.");
        return Ok(EXIT_GATE_FAILED);
    }
    Ok(0)
}
