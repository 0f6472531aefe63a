//! Metric scope and name constants.
//!
//! These names are what dashboards key on, and must not change.

/// Scope of the client-level metrics.
pub const CLIENT_SCOPE: &str = "bookkeeper_client";

// Metadata operations.

/// Ledger creation.
pub const CREATE_OP: &str = "LEDGER_CREATE";
/// Ledger deletion.
pub const DELETE_OP: &str = "LEDGER_DELETE";
/// Ledger open.
pub const OPEN_OP: &str = "LEDGER_OPEN";
/// Ledger recovery.
pub const RECOVER_OP: &str = "LEDGER_RECOVER";
/// Entries read while recovering a ledger.
pub const LEDGER_RECOVER_READ_ENTRIES: &str = "LEDGER_RECOVER_READ_ENTRIES";
/// Entries re-added while recovering a ledger.
pub const LEDGER_RECOVER_ADD_ENTRIES: &str = "LEDGER_RECOVER_ADD_ENTRIES";
/// Prefix of the per-bookie ensemble membership counters.
pub const LEDGER_ENSEMBLE_BOOKIE_DISTRIBUTION: &str = "LEDGER_ENSEMBLE_BOOKIE_DISTRIBUTION";

// Data operations.

/// Entry add.
pub const ADD_OP: &str = "ADD_ENTRY";
/// Entry adds that completed under-replicated.
pub const ADD_OP_UR: &str = "ADD_ENTRY_UR";
/// Force ledger.
pub const FORCE_OP: &str = "FORCE";
/// Entry read.
pub const READ_OP: &str = "READ_ENTRY";
/// Corrupted entries (digest mismatch) detected while reading.
pub const READ_OP_DM: &str = "READ_ENTRY_DM";
/// Write of the last add confirmed.
pub const WRITE_LAC_OP: &str = "WRITE_LAC";
/// Read of the last add confirmed.
pub const READ_LAC_OP: &str = "READ_LAC";
/// Combined read of the last add confirmed and an entry.
pub const READ_LAST_CONFIRMED_AND_ENTRY: &str = "READ_LAST_CONFIRMED_AND_ENTRY";
/// Responses to combined last add confirmed and entry reads.
pub const READ_LAST_CONFIRMED_AND_ENTRY_RESPONSE: &str = "READ_LAST_CONFIRMED_AND_ENTRY_RESPONSE";
/// Adds in flight.
pub const PENDING_ADDS: &str = "NUM_PENDING_ADD";
/// Ensemble changes.
pub const ENSEMBLE_CHANGES: &str = "NUM_ENSEMBLE_CHANGE";
/// Last add confirmed updates that advanced the known value.
pub const LAC_UPDATE_HITS: &str = "LAC_UPDATE_HITS";
/// Last add confirmed updates that did not advance the known value.
pub const LAC_UPDATE_MISSES: &str = "LAC_UPDATE_MISSES";
/// Bookie info requests.
pub const GET_BOOKIE_INFO_OP: &str = "GET_BOOKIE_INFO";
/// Speculative reads issued.
pub const SPECULATIVE_READ_COUNT: &str = "SPECULATIVE_READ_COUNT";
/// Read requests whose bookie order was changed.
pub const READ_REQUESTS_REORDERED: &str = "READ_REQUESTS_REORDERED";

/// Scope of the per-channel transport metrics.
pub const CHANNEL_SCOPE: &str = "per_channel_bookie_client";

/// Entry read over a channel.
pub const CHANNEL_READ_OP: &str = "READ_ENTRY";
/// Entry reads that timed out.
pub const CHANNEL_TIMEOUT_READ: &str = "TIMEOUT_READ_ENTRY";
/// Entry add over a channel.
pub const CHANNEL_ADD_OP: &str = "ADD_ENTRY";
/// Entry adds that timed out.
pub const CHANNEL_TIMEOUT_ADD: &str = "TIMEOUT_ADD_ENTRY";
/// Last add confirmed write over a channel.
pub const CHANNEL_WRITE_LAC_OP: &str = "WRITE_LAC";
/// Force ledger over a channel.
pub const CHANNEL_FORCE_OP: &str = "FORCE";
/// Last add confirmed writes that timed out.
pub const CHANNEL_TIMEOUT_WRITE_LAC: &str = "TIMEOUT_WRITE_LAC";
/// Force ledger requests that timed out.
pub const CHANNEL_TIMEOUT_FORCE: &str = "TIMEOUT_FORCE";
/// Last add confirmed read over a channel.
pub const CHANNEL_READ_LAC_OP: &str = "READ_LAC";
/// Last add confirmed reads that timed out.
pub const CHANNEL_TIMEOUT_READ_LAC: &str = "TIMEOUT_READ_LAC";
/// Bookie info requests that timed out.
pub const TIMEOUT_GET_BOOKIE_INFO: &str = "TIMEOUT_GET_BOOKIE_INFO";
/// TLS negotiation on a channel.
pub const CHANNEL_START_TLS_OP: &str = "START_TLS";
/// TLS negotiations that timed out.
pub const CHANNEL_TIMEOUT_START_TLS_OP: &str = "TIMEOUT_START_TLS";

/// Exceptions raised by the transport.
pub const NETTY_EXCEPTION_CNT: &str = "NETTY_EXCEPTION_CNT";
/// Time spent waiting for a channel to become writable.
pub const CLIENT_CHANNEL_WRITE_WAIT: &str = "CLIENT_CHANNEL_WRITE_WAIT";
/// Time spent connecting.
pub const CLIENT_CONNECT_TIMER: &str = "CLIENT_CONNECT_TIMER";
/// Entry adds outstanding on a channel.
pub const ADD_OP_OUTSTANDING: &str = "ADD_OP_OUTSTANDING";
/// Entry reads outstanding on a channel.
pub const READ_OP_OUTSTANDING: &str = "READ_OP_OUTSTANDING";
/// Transport-level write operations.
pub const NETTY_OPS: &str = "NETTY_OPS";
/// Active plaintext channels.
pub const ACTIVE_NON_TLS_CHANNEL_COUNTER: &str = "ACTIVE_NON_TLS_CHANNEL_COUNTER";
/// Active TLS channels.
pub const ACTIVE_TLS_CHANNEL_COUNTER: &str = "ACTIVE_TLS_CHANNEL_COUNTER";
/// Failed connection attempts.
pub const FAILED_CONNECTION_COUNTER: &str = "FAILED_CONNECTION_COUNTER";
/// Failed TLS handshakes.
pub const FAILED_TLS_HANDSHAKE_COUNTER: &str = "FAILED_TLS_HANDSHAKE_COUNTER";
