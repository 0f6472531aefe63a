use crate::{config::Configuration, errors::BuilderError, StatsProvider};

/// Default number of samples held per outcome of an operation stats logger.
pub const DEFAULT_RESERVOIR_SIZE: usize = 1028;

/// Largest accepted number of registry shards.
pub const MAX_SHARDS: usize = 1 << 16;

/// Builder for [`StatsProvider`].
#[derive(Clone, Debug)]
pub struct Builder {
    pub(crate) reservoir_size: usize,
    pub(crate) shards: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            reservoir_size: DEFAULT_RESERVOIR_SIZE,
            shards: std::cmp::max(1, num_cpus::get()).next_power_of_two().min(MAX_SHARDS),
        }
    }
}

impl Builder {
    /// Creates a new [`Builder`] with default values.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the size of the sampling reservoir kept by each operation stats logger.
    ///
    /// Defaults to 1028 samples per outcome.  Event counts are always exact; only the latency
    /// distribution is sampled once more than this many events have been recorded.
    #[must_use]
    pub fn reservoir_size(mut self, size: usize) -> Self {
        self.reservoir_size = size;
        self
    }

    /// Sets the number of registry shards.
    ///
    /// Defaults to the number of CPUs.  The value is rounded up to the next power of two, and may
    /// not exceed [`MAX_SHARDS`].
    #[must_use]
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Create a [`StatsProvider`] based on this configuration.
    ///
    /// # Errors
    ///
    /// If the reservoir size is zero, or the shard count is zero or above [`MAX_SHARDS`], an error
    /// variant will be returned describing the invalid setting.
    pub fn build(self) -> Result<StatsProvider, BuilderError> {
        if self.reservoir_size == 0 {
            return Err(BuilderError::InvalidReservoirSize);
        }
        if self.shards == 0 || self.shards > MAX_SHARDS {
            return Err(BuilderError::InvalidShardCount);
        }

        let config = Configuration::from_builder(&self);
        Ok(StatsProvider::from_config(config))
    }
}
