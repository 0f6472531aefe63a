use std::{fmt, hash::BuildHasher};

use hashbrown::{DefaultHashBuilder, HashMap};
use parking_lot::RwLock;
use tracing::debug;

use crate::common::{Identifier, Kind, Scope};
use crate::config::Configuration;
use crate::data::{Counter, Gauge, Instrument, MetricEntry, OpStatsLogger, Snapshot};
use crate::errors::StatsError;

/// Central listing of instruments, mapped by scope and name.
///
/// Instruments are created lazily and idempotently: every request for the same scope and name
/// hands back the same instrument, including when several threads race to create it.  A name is
/// bound to exactly one kind of instrument per scope.
///
/// ## Performance
///
/// `MetricRegistry` is optimized for reads.  Entries are spread over a power-of-two number of
/// shards, each behind its own reader-writer lock, and the write lock of a shard is only taken
/// the first time a name is seen.
pub struct MetricRegistry {
    shards: Vec<RwLock<HashMap<Identifier, Instrument>>>,
    shard_mask: usize,
    hasher: DefaultHashBuilder,
    config: Configuration,
}

impl MetricRegistry {
    pub(crate) fn new(config: Configuration) -> Self {
        let shard_count = config.shards.next_power_of_two();
        let shards = (0..shard_count).map(|_| RwLock::new(HashMap::new())).collect();

        Self { shards, shard_mask: shard_count - 1, hasher: DefaultHashBuilder::default(), config }
    }

    /// Gets or creates the counter under the given scope and name.
    pub fn get_or_create_counter(&self, scope: &Scope, name: &str) -> Result<Counter, StatsError> {
        self.get_or_create(
            Identifier::new(scope.clone(), name),
            Kind::Counter,
            |_| Instrument::Counter(Counter::new()),
            |instrument| match instrument {
                Instrument::Counter(counter) => Some(counter.clone()),
                _ => None,
            },
        )
    }

    /// Gets or creates the gauge under the given scope and name.
    ///
    /// A newly created gauge has no sampling function until one is registered.
    pub fn get_or_create_gauge(&self, scope: &Scope, name: &str) -> Result<Gauge, StatsError> {
        self.get_or_create(
            Identifier::new(scope.clone(), name),
            Kind::Gauge,
            |id| Instrument::Gauge(Gauge::new(id.scoped_name())),
            |instrument| match instrument {
                Instrument::Gauge(gauge) => Some(gauge.clone()),
                _ => None,
            },
        )
    }

    /// Gets or creates the operation stats logger under the given scope and name.
    pub fn get_or_create_op_stats_logger(
        &self,
        scope: &Scope,
        name: &str,
    ) -> Result<OpStatsLogger, StatsError> {
        let reservoir_size = self.config.reservoir_size;
        self.get_or_create(
            Identifier::new(scope.clone(), name),
            Kind::OpStats,
            |_| Instrument::OpStats(OpStatsLogger::new(reservoir_size)),
            |instrument| match instrument {
                Instrument::OpStats(logger) => Some(logger.clone()),
                _ => None,
            },
        )
    }

    /// Registers the sampling function of the gauge under the given scope and name.
    ///
    /// The gauge is created if needed.  A sampling function that was already registered for the
    /// gauge is replaced.
    pub fn register_gauge<F>(
        &self,
        scope: &Scope,
        name: &str,
        sampler: F,
    ) -> Result<Gauge, StatsError>
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        let gauge = self.get_or_create_gauge(scope, name)?;
        gauge.register(sampler);
        Ok(gauge)
    }

    /// Visits every instrument stored in this registry.
    ///
    /// Shards are visited one at a time, so an instrument created while visiting may or may not
    /// be observed.
    pub fn visit<F>(&self, mut collect: F)
    where
        F: FnMut(&Identifier, &Instrument),
    {
        for shard in &self.shards {
            let shard_read = shard.read();
            for (id, instrument) in shard_read.iter() {
                collect(id, instrument);
            }
        }
    }

    /// Number of instruments in the registry.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Whether or not the registry holds no instruments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes a snapshot of every instrument in the registry.
    ///
    /// Gauges are polled while taking the snapshot, after the shard lock has been released.
    pub fn snapshot(&self) -> Snapshot {
        let mut handles = Vec::new();
        self.visit(|id, instrument| handles.push((id.clone(), instrument.clone())));

        let entries = handles
            .into_iter()
            .map(|(id, instrument)| MetricEntry::new(id, instrument.value()))
            .collect();
        Snapshot::new(entries)
    }

    fn shard_for(&self, id: &Identifier) -> &RwLock<HashMap<Identifier, Instrument>> {
        let hash = self.hasher.hash_one(id);
        &self.shards[hash as usize & self.shard_mask]
    }

    fn get_or_create<T, C, E>(
        &self,
        id: Identifier,
        requested: Kind,
        create: C,
        extract: E,
    ) -> Result<T, StatsError>
    where
        C: FnOnce(&Identifier) -> Instrument,
        E: Fn(&Instrument) -> Option<T>,
    {
        let shard = self.shard_for(&id);

        // Try and get the instrument if it exists.
        if let Some(existing) = shard.read().get(&id) {
            return extract(existing).ok_or_else(|| mismatch(&id, existing.kind(), requested));
        }

        // Switch to the write guard, checking again since somebody else may have beaten us to it.
        let mut shard_write = shard.write();
        if let Some(existing) = shard_write.get(&id) {
            return extract(existing).ok_or_else(|| mismatch(&id, existing.kind(), requested));
        }

        let instrument = create(&id);
        debug!(metric = %id, kind = %requested, "registered instrument");
        let value = extract(&instrument);
        shard_write.insert(id.clone(), instrument);
        value.ok_or_else(|| mismatch(&id, requested, requested))
    }
}

impl fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("shards", &self.shards.len())
            .field("instruments", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

fn mismatch(id: &Identifier, existing: Kind, requested: Kind) -> StatsError {
    StatsError::KindMismatch { name: id.scoped_name(), existing, requested }
}
