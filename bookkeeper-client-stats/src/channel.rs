use bookkeeper_stats::{Counter, OpStatsLogger, StatsError, StatsLogger};

use crate::names::*;

/// Transport stats for a connection to a single bookie.
///
/// Resolved once per channel.  The op stats track request latency as seen by the channel, with
/// separate timers for the requests that timed out.
#[derive(Clone, Debug)]
pub struct PerChannelStats {
    /// Entry reads.
    pub read_entry: OpStatsLogger,
    /// Entry reads that timed out.
    pub read_timeout: OpStatsLogger,
    /// Entry adds.
    pub add_entry: OpStatsLogger,
    /// Entry adds that timed out.
    pub add_timeout: OpStatsLogger,
    /// Last add confirmed writes.
    pub write_lac: OpStatsLogger,
    /// Last add confirmed writes that timed out.
    pub write_lac_timeout: OpStatsLogger,
    /// Force ledger requests.
    pub force: OpStatsLogger,
    /// Force ledger requests that timed out.
    pub force_timeout: OpStatsLogger,
    /// Last add confirmed reads.
    pub read_lac: OpStatsLogger,
    /// Last add confirmed reads that timed out.
    pub read_lac_timeout: OpStatsLogger,
    /// Bookie info requests that timed out.
    pub get_bookie_info_timeout: OpStatsLogger,
    /// TLS negotiation.
    pub start_tls: OpStatsLogger,
    /// TLS negotiations that timed out.
    pub start_tls_timeout: OpStatsLogger,
    /// Connection attempts.
    pub connect: OpStatsLogger,
    /// Transport-level writes.
    pub netty_ops: OpStatsLogger,

    /// Exceptions raised by the transport.
    pub exceptions: Counter,
    /// Entry adds in flight on this channel.
    pub add_outstanding: Counter,
    /// Entry reads in flight on this channel.
    pub read_outstanding: Counter,
    /// Open plaintext channels.
    pub active_non_tls_channels: Counter,
    /// Open TLS channels.
    pub active_tls_channels: Counter,
    /// Failed connection attempts.
    pub failed_connections: Counter,
    /// Failed TLS handshakes.
    pub failed_tls_handshakes: Counter,
}

impl PerChannelStats {
    /// Resolves the channel metrics within the scope of `logger`.
    ///
    /// # Errors
    ///
    /// Fails if any of the names is already bound to a different kind of instrument.
    pub fn new(logger: &StatsLogger) -> Result<PerChannelStats, StatsError> {
        Ok(PerChannelStats {
            read_entry: logger.op_stats_logger(CHANNEL_READ_OP)?,
            read_timeout: logger.op_stats_logger(CHANNEL_TIMEOUT_READ)?,
            add_entry: logger.op_stats_logger(CHANNEL_ADD_OP)?,
            add_timeout: logger.op_stats_logger(CHANNEL_TIMEOUT_ADD)?,
            write_lac: logger.op_stats_logger(CHANNEL_WRITE_LAC_OP)?,
            write_lac_timeout: logger.op_stats_logger(CHANNEL_TIMEOUT_WRITE_LAC)?,
            force: logger.op_stats_logger(CHANNEL_FORCE_OP)?,
            force_timeout: logger.op_stats_logger(CHANNEL_TIMEOUT_FORCE)?,
            read_lac: logger.op_stats_logger(CHANNEL_READ_LAC_OP)?,
            read_lac_timeout: logger.op_stats_logger(CHANNEL_TIMEOUT_READ_LAC)?,
            get_bookie_info_timeout: logger.op_stats_logger(TIMEOUT_GET_BOOKIE_INFO)?,
            start_tls: logger.op_stats_logger(CHANNEL_START_TLS_OP)?,
            start_tls_timeout: logger.op_stats_logger(CHANNEL_TIMEOUT_START_TLS_OP)?,
            connect: logger.op_stats_logger(CLIENT_CONNECT_TIMER)?,
            netty_ops: logger.op_stats_logger(NETTY_OPS)?,

            exceptions: logger.counter(NETTY_EXCEPTION_CNT)?,
            add_outstanding: logger.counter(ADD_OP_OUTSTANDING)?,
            read_outstanding: logger.counter(READ_OP_OUTSTANDING)?,
            active_non_tls_channels: logger.counter(ACTIVE_NON_TLS_CHANNEL_COUNTER)?,
            active_tls_channels: logger.counter(ACTIVE_TLS_CHANNEL_COUNTER)?,
            failed_connections: logger.counter(FAILED_CONNECTION_COUNTER)?,
            failed_tls_handshakes: logger.counter(FAILED_TLS_HANDSHAKE_COUNTER)?,
        })
    }

    /// Resolves the channel metrics for the bookie at `address`, under the
    /// `per_channel_bookie_client` scope of `root`.
    pub fn for_bookie(root: &StatsLogger, address: &str) -> Result<PerChannelStats, StatsError> {
        let bookie = scope_for_address(address);
        Self::new(&root.scoped(&[CHANNEL_SCOPE, bookie.as_str()]))
    }
}

/// Turns a bookie address into a single scope part.
///
/// Scope parts are joined with `.`, so the separators found in host names and addresses are
/// replaced with `_`.
pub fn scope_for_address(address: &str) -> String {
    address.replace(['.', ':', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::{scope_for_address, PerChannelStats};
    use bookkeeper_stats::{Kind, StatsProvider};
    use std::time::Duration;

    #[test]
    fn test_scope_for_address() {
        assert_eq!(scope_for_address("10.0.0.1:3181"), "10_0_0_1_3181");
        assert_eq!(scope_for_address("bookie-1.example.com:3181"), "bookie_1_example_com_3181");
        assert_eq!(scope_for_address("bookie"), "bookie");
    }

    #[test]
    fn test_per_bookie_scoping() {
        let provider = StatsProvider::builder().build().unwrap();
        let root = provider.root_logger();
        let first = PerChannelStats::for_bookie(&root, "10.0.0.1:3181").unwrap();
        let second = PerChannelStats::for_bookie(&root, "10.0.0.2:3181").unwrap();

        first.add_entry.register_successful_event(Duration::from_millis(2));
        first.add_outstanding.increment();
        first.add_outstanding.increment();
        first.add_outstanding.decrement();

        assert_eq!(second.add_entry.snapshot().success_count(), 0);
        assert_eq!(second.add_outstanding.get(), 0);

        let snapshot = provider.controller().snapshot();
        assert_eq!(snapshot.len(), 44);
        let entry =
            snapshot.get("per_channel_bookie_client.10_0_0_1_3181.ADD_OP_OUTSTANDING").unwrap();
        assert_eq!(entry.kind(), Kind::Counter);
        assert_eq!(first.add_outstanding.get(), 1);
    }

    #[test]
    fn test_reconnect_reuses_instruments() {
        let provider = StatsProvider::builder().build().unwrap();
        let root = provider.root_logger();
        let before = PerChannelStats::for_bookie(&root, "10.0.0.1:3181").unwrap();
        before.failed_connections.increment();

        let after = PerChannelStats::for_bookie(&root, "10.0.0.1:3181").unwrap();
        assert!(after.failed_connections.ptr_eq(&before.failed_connections));
        assert_eq!(after.failed_connections.get(), 1);
    }
}
