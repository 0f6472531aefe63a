use thiserror::Error;

use crate::common::Kind;

/// Errors while resolving instruments from the registry.
///
/// These only surface while instruments are being resolved, which is expected to happen when a
/// client is constructed. Recording into an already-resolved instrument never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The name is already bound to a different kind of instrument within the same scope.
    #[error("metric `{name}` is already registered as a {existing}, cannot register it as a {requested}")]
    KindMismatch {
        /// Fully-scoped name of the metric.
        name: String,
        /// Kind of the instrument already bound to the name.
        existing: Kind,
        /// Kind that was requested.
        requested: Kind,
    },
}

/// Errors during provider creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// The operation stats reservoir must hold at least one sample.
    #[error("reservoir size must be greater than zero")]
    InvalidReservoirSize,

    /// The registry needs at least one shard, and at most `MAX_SHARDS`.
    #[error("registry shard count must be between 1 and {}", crate::MAX_SHARDS)]
    InvalidShardCount,
}
