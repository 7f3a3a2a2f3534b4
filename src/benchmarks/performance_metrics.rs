//! Performance measurement utilities for benchmarks.

use super::benchmark_types::{MeasurementSettings, PerformanceResults};
use log::debug;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Measurement state handed to a benchmark routine.
///
/// The harness decides the size and the repetition budget; the routine sets up
/// its buffers for [`State::size`], hands its hot loop to [`State::iter`] and
/// optionally reports how many bytes it moved.
#[derive(Debug)]
pub struct State {
    size: usize,
    settings: MeasurementSettings,
    iterations: u64,
    elapsed: Duration,
    bytes_processed: Option<u64>,
}

impl State {
    pub fn new(size: usize, settings: MeasurementSettings) -> Self {
        Self {
            size,
            settings,
            iterations: 0,
            elapsed: Duration::ZERO,
            bytes_processed: None,
        }
    }

    /// The size parameter chosen for this run.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Measured repetitions so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn bytes_processed(&self) -> Option<u64> {
        self.bytes_processed
    }

    pub fn set_bytes_processed(&mut self, bytes: u64) {
        self.bytes_processed = Some(bytes);
    }

    /// Repeats `routine` until the time budget or the iteration cap is reached.
    ///
    /// Repetitions run in batches that double in size so the clock is read
    /// rarely for fast routines. Every result goes through `black_box`.
    pub fn iter<R, F>(&mut self, mut routine: F)
    where
        F: FnMut() -> R,
    {
        for _ in 0..self.settings.warmup_iterations {
            black_box(routine());
        }

        let mut batch = 1u64;
        loop {
            let start = Instant::now();
            for _ in 0..batch {
                black_box(routine());
            }
            let batch_time = start.elapsed();

            self.elapsed += batch_time;
            self.iterations += batch;
            debug!(
                "  batch of {} took {:?} ({} iterations total)",
                batch, batch_time, self.iterations
            );

            if self.elapsed >= self.settings.min_time
                || self.iterations >= self.settings.max_iterations
            {
                break;
            }

            batch = batch
                .saturating_mul(2)
                .min(self.settings.max_iterations - self.iterations);
        }
    }

    /// Converts the finished state into a result named `name`.
    pub fn into_results(self, name: &str) -> PerformanceResults {
        PerformanceResults::new(
            name.to_string(),
            self.elapsed.as_nanos(),
            self.iterations,
            self.bytes_processed,
        )
    }
}

/// Formats nanoseconds with the largest unit that keeps the value above one.
pub fn format_duration_ns(ns: f64) -> String {
    if ns >= 1_000_000_000.0 {
        format!("{:.3} s", ns / 1_000_000_000.0)
    } else if ns >= 1_000_000.0 {
        format!("{:.3} ms", ns / 1_000_000.0)
    } else if ns >= 1_000.0 {
        format!("{:.3} us", ns / 1_000.0)
    } else {
        format!("{:.1} ns", ns)
    }
}

/// Formats a byte rate in binary units.
pub fn format_throughput(bytes_per_second: f64) -> String {
    const UNITS: [&str; 5] = ["B/s", "KiB/s", "MiB/s", "GiB/s", "TiB/s"];
    let mut value = bytes_per_second;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Prints a result table
pub fn print_performance_analysis(results: &[PerformanceResults]) {
    if results.is_empty() {
        return;
    }

    let name_width = results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("Benchmark".len());

    let header = format!(
        "{:<name_width$} {:>14} {:>14} {:>16}",
        "Benchmark", "Time", "Iterations", "Throughput"
    );
    println!("\n{}", header);
    println!("{}", "-".repeat(header.len()));

    for result in results {
        let throughput = result
            .bytes_per_second
            .map(format_throughput)
            .unwrap_or_default();
        println!(
            "{:<name_width$} {:>14} {:>14} {:>16}",
            result.name,
            format_duration_ns(result.average_time_ns),
            result.iterations,
            throughput
        );
    }
}
