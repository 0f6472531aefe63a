//! Metric bindings for the BookKeeper client.
//!
//! The client records everything through handles resolved up front from a
//! [`StatsLogger`](bookkeeper_stats::StatsLogger): [`ClientStats`] for the ledger-level
//! operations, and one [`PerChannelStats`] per bookie connection for the transport.
//!
//! ```rust
//! use bookkeeper_client_stats::{ClientStats, PerChannelStats};
//! use bookkeeper_stats::StatsProvider;
//! use std::time::Duration;
//!
//! let provider = StatsProvider::builder().build().expect("failed to build provider");
//! let root = provider.root_logger();
//!
//! let (client, pending_adds) = ClientStats::from_root(&root).expect("client stats");
//! let _gauge = pending_adds.bind(|| 0);
//!
//! client.add_op().register_successful_event(Duration::from_millis(5));
//! client.record_ensemble(&["10.0.0.1:3181", "10.0.0.2:3181", "10.0.0.3:3181"]);
//!
//! let channel = PerChannelStats::for_bookie(&root, "10.0.0.1:3181").expect("channel stats");
//! channel.add_outstanding.increment();
//!
//! let snapshot = provider.controller().snapshot();
//! assert!(snapshot.get("bookkeeper_client.ADD_ENTRY").is_some());
//! assert!(snapshot.get("per_channel_bookie_client.10_0_0_1_3181.ADD_OP_OUTSTANDING").is_some());
//! ```
#![deny(missing_docs)]
mod channel;
mod client;
pub mod names;

pub use self::{
    channel::{scope_for_address, PerChannelStats},
    client::{ClientStats, PendingAddsGauge},
};
