use std::fmt;

use bookkeeper_stats::{Counter, Gauge, OpStatsLogger, StatsError, StatsLogger};
use tracing::error;

use crate::names::*;

/// Client-level stats, resolved once per client instance.
///
/// Every fixed metric of the client is looked up when the `ClientStats` is built, and the
/// accessors hand back the resolved handle directly: recording an add or a read on the hot path
/// costs nothing beyond the instrument's own atomic update.
///
/// The one exception is [`ensemble_bookie_distribution`](ClientStats::ensemble_bookie_distribution),
/// which is keyed by bookie address and therefore created on first use.  Those counters are
/// cached for the lifetime of the client and never evicted, so the cache grows with the number of
/// distinct bookies ever seen in an ensemble.
pub struct ClientStats {
    logger: StatsLogger,

    create_op: OpStatsLogger,
    open_op: OpStatsLogger,
    delete_op: OpStatsLogger,
    recover_op: OpStatsLogger,
    recover_read_entries: OpStatsLogger,
    recover_add_entries: OpStatsLogger,
    get_bookie_info_op: OpStatsLogger,
    read_lac_and_entry_op: OpStatsLogger,
    read_lac_and_entry_response: OpStatsLogger,

    add_op: OpStatsLogger,
    read_op: OpStatsLogger,
    write_lac_op: OpStatsLogger,
    read_lac_op: OpStatsLogger,
    force_op: OpStatsLogger,
    client_channel_write_wait: OpStatsLogger,

    read_op_dm: Counter,
    add_op_ur: Counter,
    ensemble_changes: Counter,
    lac_update_hits: Counter,
    lac_update_misses: Counter,
    speculative_reads: Counter,
    read_requests_reordered: Counter,

    bookie_distribution: scc::HashIndex<String, Counter>,
}

/// Deferred registration of the pending adds gauge.
///
/// Handed out alongside [`ClientStats`], and consumed when the sampling function is bound.  The
/// component that owns the queue of in-flight adds is expected to take ownership of this and bind
/// it once that queue exists.
#[must_use = "the pending adds gauge reports nothing until a sampler is bound"]
pub struct PendingAddsGauge {
    gauge: Gauge,
}

impl PendingAddsGauge {
    /// Binds the sampling function reporting the number of adds in flight.
    pub fn bind<F>(self, sampler: F) -> Gauge
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        self.gauge.register(sampler);
        self.gauge
    }
}

impl fmt::Debug for PendingAddsGauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAddsGauge").finish_non_exhaustive()
    }
}

impl ClientStats {
    /// Resolves the client metrics within the scope of `logger`.
    ///
    /// The logger is used as-is; see [`from_root`](ClientStats::from_root) to resolve them under
    /// the standard client scope.
    ///
    /// # Errors
    ///
    /// If any of the names is already bound to a different kind of instrument within the scope,
    /// an error is returned and the client should not be started.
    pub fn new(logger: &StatsLogger) -> Result<(ClientStats, PendingAddsGauge), StatsError> {
        let stats = ClientStats {
            logger: logger.clone(),

            create_op: logger.op_stats_logger(CREATE_OP)?,
            open_op: logger.op_stats_logger(OPEN_OP)?,
            delete_op: logger.op_stats_logger(DELETE_OP)?,
            recover_op: logger.op_stats_logger(RECOVER_OP)?,
            recover_read_entries: logger.op_stats_logger(LEDGER_RECOVER_READ_ENTRIES)?,
            recover_add_entries: logger.op_stats_logger(LEDGER_RECOVER_ADD_ENTRIES)?,
            get_bookie_info_op: logger.op_stats_logger(GET_BOOKIE_INFO_OP)?,
            read_lac_and_entry_op: logger.op_stats_logger(READ_LAST_CONFIRMED_AND_ENTRY)?,
            read_lac_and_entry_response: logger
                .op_stats_logger(READ_LAST_CONFIRMED_AND_ENTRY_RESPONSE)?,

            add_op: logger.op_stats_logger(ADD_OP)?,
            read_op: logger.op_stats_logger(READ_OP)?,
            write_lac_op: logger.op_stats_logger(WRITE_LAC_OP)?,
            read_lac_op: logger.op_stats_logger(READ_LAC_OP)?,
            force_op: logger.op_stats_logger(FORCE_OP)?,
            client_channel_write_wait: logger.op_stats_logger(CLIENT_CHANNEL_WRITE_WAIT)?,

            read_op_dm: logger.counter(READ_OP_DM)?,
            add_op_ur: logger.counter(ADD_OP_UR)?,
            ensemble_changes: logger.counter(ENSEMBLE_CHANGES)?,
            lac_update_hits: logger.counter(LAC_UPDATE_HITS)?,
            lac_update_misses: logger.counter(LAC_UPDATE_MISSES)?,
            speculative_reads: logger.counter(SPECULATIVE_READ_COUNT)?,
            read_requests_reordered: logger.counter(READ_REQUESTS_REORDERED)?,

            bookie_distribution: scc::HashIndex::new(),
        };
        let pending_adds = PendingAddsGauge { gauge: logger.gauge(PENDING_ADDS)? };

        Ok((stats, pending_adds))
    }

    /// Resolves the client metrics under the `bookkeeper_client` scope of `root`.
    pub fn from_root(root: &StatsLogger) -> Result<(ClientStats, PendingAddsGauge), StatsError> {
        Self::new(&root.scoped(CLIENT_SCOPE))
    }

    /// Ledger creation.
    pub fn create_op(&self) -> &OpStatsLogger {
        &self.create_op
    }

    /// Ledger open.
    pub fn open_op(&self) -> &OpStatsLogger {
        &self.open_op
    }

    /// Ledger deletion.
    pub fn delete_op(&self) -> &OpStatsLogger {
        &self.delete_op
    }

    /// Ledger recovery.
    pub fn recover_op(&self) -> &OpStatsLogger {
        &self.recover_op
    }

    /// Number of entries read per ledger recovery, recorded as values.
    pub fn recover_read_entries(&self) -> &OpStatsLogger {
        &self.recover_read_entries
    }

    /// Number of entries re-added per ledger recovery, recorded as values.
    pub fn recover_add_entries(&self) -> &OpStatsLogger {
        &self.recover_add_entries
    }

    /// Bookie info requests.
    pub fn get_bookie_info_op(&self) -> &OpStatsLogger {
        &self.get_bookie_info_op
    }

    /// Combined last add confirmed and entry reads.
    pub fn read_lac_and_entry_op(&self) -> &OpStatsLogger {
        &self.read_lac_and_entry_op
    }

    /// Individual responses to combined last add confirmed and entry reads.
    pub fn read_lac_and_entry_response(&self) -> &OpStatsLogger {
        &self.read_lac_and_entry_response
    }

    /// Entry adds.
    pub fn add_op(&self) -> &OpStatsLogger {
        &self.add_op
    }

    /// Entry reads.
    pub fn read_op(&self) -> &OpStatsLogger {
        &self.read_op
    }

    /// Last add confirmed writes.
    pub fn write_lac_op(&self) -> &OpStatsLogger {
        &self.write_lac_op
    }

    /// Last add confirmed reads.
    pub fn read_lac_op(&self) -> &OpStatsLogger {
        &self.read_lac_op
    }

    /// Force ledger requests.
    pub fn force_op(&self) -> &OpStatsLogger {
        &self.force_op
    }

    /// Time spent waiting for a channel to become writable.
    pub fn client_channel_write_wait(&self) -> &OpStatsLogger {
        &self.client_channel_write_wait
    }

    /// Digest mismatches detected while reading entries.
    pub fn read_op_dm(&self) -> &Counter {
        &self.read_op_dm
    }

    /// Adds that completed while under-replicated.
    pub fn add_op_ur(&self) -> &Counter {
        &self.add_op_ur
    }

    /// Ensemble changes.
    pub fn ensemble_changes(&self) -> &Counter {
        &self.ensemble_changes
    }

    /// Last add confirmed updates that advanced the known value.
    pub fn lac_update_hits(&self) -> &Counter {
        &self.lac_update_hits
    }

    /// Last add confirmed updates that did not advance the known value.
    pub fn lac_update_misses(&self) -> &Counter {
        &self.lac_update_misses
    }

    /// Speculative reads issued.
    pub fn speculative_reads(&self) -> &Counter {
        &self.speculative_reads
    }

    /// Read requests whose bookie order was changed.
    pub fn read_requests_reordered(&self) -> &Counter {
        &self.read_requests_reordered
    }

    /// Gets the ensemble membership counter for the given bookie.
    ///
    /// The counter is named `LEDGER_ENSEMBLE_BOOKIE_DISTRIBUTION-<bookie>` and is created the first
    /// time the bookie is seen.  Concurrent first lookups of the same bookie all get the same
    /// counter, and lookups of bookies already seen are lock-free.
    ///
    /// This never fails: if the registry refuses the name, the error is logged and a counter that
    /// is not exported is handed back instead.
    pub fn ensemble_bookie_distribution(&self, bookie: &str) -> Counter {
        if let Some(counter) = self.bookie_distribution.peek_with(bookie, |_, c| c.clone()) {
            return counter;
        }

        let name = format!("{}-{}", LEDGER_ENSEMBLE_BOOKIE_DISTRIBUTION, bookie);
        let counter = match self.logger.counter(&name) {
            Ok(counter) => counter,
            Err(e) => {
                error!(error = %e, bookie, "failed to register ensemble distribution counter");
                Counter::detached()
            }
        };

        // Entries are never removed, so losing the race means the winner's handle is there.
        match self.bookie_distribution.insert(bookie.to_string(), counter.clone()) {
            Ok(()) => counter,
            Err(_) => {
                self.bookie_distribution.peek_with(bookie, |_, c| c.clone()).unwrap_or(counter)
            }
        }
    }

    /// Counts one ensemble placement for every bookie in `ensemble`.
    pub fn record_ensemble<B>(&self, ensemble: &[B])
    where
        B: AsRef<str>,
    {
        for bookie in ensemble {
            self.ensemble_bookie_distribution(bookie.as_ref()).increment();
        }
    }

    /// Number of distinct bookies with an ensemble distribution counter.
    pub fn known_bookies(&self) -> usize {
        self.bookie_distribution.len()
    }
}

impl fmt::Debug for ClientStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientStats")
            .field("scope", self.logger.scope())
            .field("known_bookies", &self.known_bookies())
            .finish_non_exhaustive()
    }
}
