use crate::Builder;

/// Holds the configuration for the registry and its instruments.
#[derive(Clone, Debug)]
pub(crate) struct Configuration {
    pub reservoir_size: usize,
    pub shards: usize,
}

impl Configuration {
    pub fn from_builder(builder: &Builder) -> Self {
        Self { reservoir_size: builder.reservoir_size, shards: builder.shards }
    }

    #[allow(dead_code)]
    pub(crate) fn mock() -> Self {
        Self { reservoir_size: 64, shards: 4 }
    }
}
