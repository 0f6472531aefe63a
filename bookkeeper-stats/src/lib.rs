//! In-process metric registry with scoped stats loggers.
//!
//! `bookkeeper-stats` provides the registry, instruments and scoping used to instrument a storage
//! client: monotonic or delta counters, pull-based gauges, and operation stats loggers that track
//! success/failure counts alongside a latency distribution.
//!
//! # Design
//!
//! Callers build a [`StatsProvider`], which owns the [`MetricRegistry`].  From it, callers get
//! [`StatsLogger`]s for resolving instruments and [`Controller`]s for getting values back out.
//! There is no global registry: the provider or its loggers are handed explicitly to whatever
//! needs them.
//!
//! Instruments are resolved once, typically when a client is constructed, and the returned
//! handles are then updated directly.  Updating a handle never allocates, never blocks on
//! anything but the instrument's own atomics, and never fails.
//!
//! ```rust
//! use bookkeeper_stats::StatsProvider;
//! use std::time::Duration;
//!
//! let provider = StatsProvider::builder().build().expect("failed to build provider");
//! let client = provider.stats_logger("bookkeeper_client");
//!
//! let add_entry = client.op_stats_logger("ADD_ENTRY").expect("ADD_ENTRY is an op stats logger");
//! add_entry.register_successful_event(Duration::from_millis(5));
//!
//! let ensemble_changes = client.counter("NUM_ENSEMBLE_CHANGE").expect("counter");
//! ensemble_changes.increment();
//! ```
//!
//! # Scopes
//!
//! Loggers are scoped, not unlike loggers in a logging framework.  Two loggers with the same scope
//! resolve to the same instruments, and the same leaf name under two different scopes refers to
//! two different instruments:
//!
//! ```rust
//! # use bookkeeper_stats::StatsProvider;
//! let provider = StatsProvider::builder().build().expect("failed to build provider");
//! let client = provider.stats_logger("bookkeeper_client").counter("ADD_ENTRY").unwrap();
//! let channel = provider.stats_logger("per_channel_bookie_client").counter("ADD_ENTRY").unwrap();
//!
//! client.increment();
//! assert_eq!(channel.get(), 0);
//! ```
//!
//! A name is only ever bound to one kind of instrument within a scope; asking for a different kind
//! fails with [`StatsError::KindMismatch`].
//!
//! # Snapshots
//!
//! A [`Controller`] takes snapshots of every bound instrument, polling gauges as it goes.  A gauge
//! whose sampling function panics is reported as having no value and does not affect anything
//! else.  [`exporters::LogExporter`] renders snapshots through `tracing` on a schedule owned by
//! the caller.
#![deny(missing_docs)]
mod builder;
mod common;
mod config;
mod control;
pub mod data;
mod errors;
pub mod exporters;
mod logger;
mod provider;
mod registry;

pub use self::{
    builder::{Builder, DEFAULT_RESERVOIR_SIZE, MAX_SHARDS},
    common::{Identifier, Kind, Scope},
    control::Controller,
    data::{Counter, Gauge, OpStatsLogger, OpStatsSnapshot},
    errors::{BuilderError, StatsError},
    logger::{AsScoped, StatsLogger},
    provider::StatsProvider,
    registry::MetricRegistry,
};
