//! Exports snapshots via `tracing`.
//!
//! The exporter renders every bound instrument to a line of text and emits it as a `tracing`
//! event at the configured level.
//!
//! # Run Modes
//! - `run` can be used to block the current thread, taking snapshots and exporting them on an
//!   interval
//! - `turn` can be used to take a single snapshot and log it
use std::{fmt::Write, thread, time::Duration};

use tracing::{debug, error, info, trace, warn, Level};

use crate::{
    control::Controller,
    data::{MetricEntry, MetricValue, OpStatsSnapshot, Snapshot},
};

/// Exports metrics by rendering them to text and logging them.
pub struct LogExporter {
    controller: Controller,
    level: Level,
    interval: Duration,
}

impl LogExporter {
    /// Creates a new [`LogExporter`] that logs at the given level, every `interval` when run.
    pub fn new(controller: Controller, level: Level, interval: Duration) -> Self {
        LogExporter { controller, level, interval }
    }

    /// Runs this exporter on the current thread, logging output on the configured interval.
    pub fn run(&self) -> ! {
        loop {
            thread::sleep(self.interval);
            self.turn();
        }
    }

    /// Run this exporter, logging output only once.
    ///
    /// Returns the number of metrics that were logged.
    pub fn turn(&self) -> usize {
        let snapshot = self.controller.snapshot();
        for entry in snapshot.iter() {
            let line = render_entry(entry);
            if self.level == Level::ERROR {
                error!(target: "bookkeeper_stats", "{}", line);
            } else if self.level == Level::WARN {
                warn!(target: "bookkeeper_stats", "{}", line);
            } else if self.level == Level::INFO {
                info!(target: "bookkeeper_stats", "{}", line);
            } else if self.level == Level::DEBUG {
                debug!(target: "bookkeeper_stats", "{}", line);
            } else {
                trace!(target: "bookkeeper_stats", "{}", line);
            }
        }
        snapshot.len()
    }
}

/// Renders a snapshot as text, one metric per line.
///
/// Counters and gauges render as `name{kind} value`.  Gauges without a usable sampler render
/// `-`.  Operation stats render counts and the p50/p99 of each outcome in microseconds.
///
/// Names are flattened with `.`, so entries whose leaf names contain `.` may render alike; lines
/// follow the snapshot order of scope and then leaf name.
pub fn render(snapshot: &Snapshot) -> String {
    let mut output = String::new();
    for entry in snapshot.iter() {
        output.push_str(&render_entry(entry));
        output.push('\n');
    }
    output
}

fn render_entry(entry: &MetricEntry) -> String {
    let mut line = format!("{}{{{}}}", entry.scoped_name(), entry.kind());
    // Writing into a `String` cannot fail.
    let _ = match entry.value() {
        MetricValue::Counter(value) => write!(line, " {}", value),
        MetricValue::Gauge(Some(value)) => write!(line, " {}", value),
        MetricValue::Gauge(None) => write!(line, " -"),
        MetricValue::OpStats(stats) => render_op_stats(&mut line, stats),
    };
    line
}

fn render_op_stats(line: &mut String, stats: &OpStatsSnapshot) -> std::fmt::Result {
    write!(
        line,
        " success={} failure={} success_p50_us={} success_p99_us={} failure_p50_us={} failure_p99_us={}",
        stats.success_count(),
        stats.failure_count(),
        micros(stats.success_quantile(0.5)),
        micros(stats.success_quantile(0.99)),
        micros(stats.failure_quantile(0.5)),
        micros(stats.failure_quantile(0.99)),
    )
}

fn micros(nanos: Option<u64>) -> String {
    match nanos {
        Some(ns) => (ns / 1_000).to_string(),
        None => "-".to_string(),
    }
}
