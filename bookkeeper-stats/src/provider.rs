use std::sync::Arc;

use crate::{
    builder::Builder, common::Scope, config::Configuration, control::Controller,
    logger::AsScoped, registry::MetricRegistry, StatsLogger,
};

/// Root of the stats system for a single client instance.
///
/// A `StatsProvider` owns the [`MetricRegistry`] and hands out scoped [`StatsLogger`]s for
/// recording, and [`Controller`]s for exporting.  There is no global instance: the provider, or
/// loggers derived from it, are passed explicitly to whatever needs to record metrics.  Dropping
/// the provider and every logger derived from it tears the registry down.
#[derive(Clone, Debug)]
pub struct StatsProvider {
    registry: Arc<MetricRegistry>,
}

impl StatsProvider {
    pub(crate) fn from_config(config: Configuration) -> Self {
        Self { registry: Arc::new(MetricRegistry::new(config)) }
    }

    /// Creates a [`Builder`] for configuring a provider.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Gets a logger for the root scope.
    pub fn root_logger(&self) -> StatsLogger {
        StatsLogger::new(self.registry.clone(), Scope::Root)
    }

    /// Gets a logger for the given scope, relative to the root scope.
    pub fn stats_logger<'a, S: AsScoped<'a> + ?Sized>(&self, scope: &'a S) -> StatsLogger {
        self.root_logger().scoped(scope)
    }

    /// Gets a [`Controller`] for taking snapshots of every bound instrument.
    pub fn controller(&self) -> Controller {
        Controller::new(self.registry.clone())
    }

    /// Gets the underlying registry.
    pub fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }
}
