//! Instrument types.
use crate::common::Kind;

mod counter;
pub use counter::Counter;

mod gauge;
pub use gauge::Gauge;

mod op_stats;
pub use op_stats::{OpStatsLogger, OpStatsSnapshot};

mod reservoir;

mod snapshot;
pub use snapshot::{MetricEntry, MetricValue, Snapshot};

/// A registered instrument.
#[derive(Clone, Debug)]
pub enum Instrument {
    /// A counter.
    Counter(Counter),
    /// A pull-based gauge.
    Gauge(Gauge),
    /// An operation stats logger.
    OpStats(OpStatsLogger),
}

impl Instrument {
    /// Gets the kind of this instrument.
    pub fn kind(&self) -> Kind {
        match self {
            Instrument::Counter(_) => Kind::Counter,
            Instrument::Gauge(_) => Kind::Gauge,
            Instrument::OpStats(_) => Kind::OpStats,
        }
    }

    /// Reads the current value of this instrument, polling it if it is a gauge.
    pub fn value(&self) -> MetricValue {
        match self {
            Instrument::Counter(counter) => MetricValue::Counter(counter.get()),
            Instrument::Gauge(gauge) => MetricValue::Gauge(gauge.sample()),
            Instrument::OpStats(logger) => MetricValue::OpStats(logger.snapshot()),
        }
    }
}
