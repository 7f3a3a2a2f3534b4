//! Array arithmetic benchmark CLI.
//!
//! Runs the registered cases (all of them, or those matching `--filter`),
//! prints a result table and optionally writes a JSON report for `benchdiff`.

use arraybench::benchmarks::{BenchmarkReport, BenchmarkRunner, ConfigLoader, ReportContext};
use arraybench::element::ElementType;
use arraybench::errors::BenchmarkResult;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arraybench")]
#[command(about = "Typed array arithmetic microbenchmarks")]
struct Args {
    /// List the registered cases instead of running them
    #[arg(long)]
    list: bool,

    /// Regex selecting cases by name (matches anywhere in the name)
    #[arg(long)]
    filter: Option<String>,

    /// Suite configuration file (defaults to configs/suite.json)
    #[arg(long)]
    config: Option<String>,

    /// Write a JSON report to this path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Comma-separated element types for the swept cases (f32, f64, i32)
    #[arg(long, value_delimiter = ',')]
    types: Vec<ElementType>,

    /// Override the minimum measured time per case
    #[arg(long)]
    min_time_ms: Option<u64>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("Benchmark execution failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> BenchmarkResult<()> {
    let mut config = ConfigLoader::load_suite_config(args.config.as_deref())?;
    if let Some(min_time_ms) = args.min_time_ms {
        config.min_time_ms = min_time_ms;
    }
    if !args.types.is_empty() {
        config.element_types = args.types.clone();
    }

    let mut runner = BenchmarkRunner::new(config)?;

    if args.list {
        for name in runner.list_benchmarks(args.filter.as_deref())? {
            println!("{}", name);
        }
        return Ok(());
    }

    let results = runner.run_and_print(args.filter.as_deref())?;

    if let Some(path) = &args.out {
        BenchmarkReport::new(ReportContext::current(), &results).write_to(path)?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
