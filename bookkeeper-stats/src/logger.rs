use std::sync::Arc;

use crate::{
    common::Scope,
    data::{Counter, Gauge, OpStatsLogger},
    errors::StatsError,
    registry::MetricRegistry,
};

/// A value that can be used as a metric scope.
///
/// This helper trait allows us to accept either a single string or a slice of strings to use as a
/// scope, to avoid needing to allocate in the case where we want to be able to specify multiple
/// scope levels in a single go.
pub trait AsScoped<'a> {
    /// Creates a new [`Scope`] by adding `self` to the `base` scope.
    fn as_scoped(&'a self, base: Scope) -> Scope;
}

/// Scoped view over a [`MetricRegistry`].
///
/// Every lookup made through a `StatsLogger` is prefixed with its scope, which lets unrelated
/// subsystems use identical short metric names without colliding.  Loggers are cheap to clone and
/// can be handed to as many components as needed.
///
/// Lookups format and hash the metric name, so they belong at construction time: resolve the
/// instruments once, hold on to the returned handles, and record through those.
#[derive(Clone, Debug)]
pub struct StatsLogger {
    registry: Arc<MetricRegistry>,
    scope: Scope,
}

impl StatsLogger {
    pub(crate) fn new(registry: Arc<MetricRegistry>, scope: Scope) -> StatsLogger {
        StatsLogger { registry, scope }
    }

    /// Creates a scoped child of this logger.
    ///
    /// Scopes are inherited: scoping an already-scoped logger nests the new scope under the
    /// existing one.  For example, scoping a `per_channel_bookie_client` logger with
    /// `10_0_0_1_3181` yields metrics named `per_channel_bookie_client.10_0_0_1_3181.<name>`.
    pub fn scoped<'a, S: AsScoped<'a> + ?Sized>(&self, scope: &'a S) -> StatsLogger {
        let new_scope = scope.as_scoped(self.scope.clone());
        StatsLogger::new(self.registry.clone(), new_scope)
    }

    /// Gets the scope of this logger.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Gets or creates the counter with the given name in this scope.
    pub fn counter(&self, name: &str) -> Result<Counter, StatsError> {
        self.registry.get_or_create_counter(&self.scope, name)
    }

    /// Gets or creates the gauge with the given name in this scope.
    pub fn gauge(&self, name: &str) -> Result<Gauge, StatsError> {
        self.registry.get_or_create_gauge(&self.scope, name)
    }

    /// Gets or creates the operation stats logger with the given name in this scope.
    pub fn op_stats_logger(&self, name: &str) -> Result<OpStatsLogger, StatsError> {
        self.registry.get_or_create_op_stats_logger(&self.scope, name)
    }

    /// Registers the sampling function for the gauge with the given name in this scope.
    ///
    /// Replaces any sampling function previously registered for the same gauge.
    pub fn register_gauge<F>(&self, name: &str, sampler: F) -> Result<Gauge, StatsError>
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        self.registry.register_gauge(&self.scope, name, sampler)
    }
}

impl<'a> AsScoped<'a> for str {
    fn as_scoped(&'a self, base: Scope) -> Scope {
        base.add_part(self)
    }
}

impl<'a, 'b, T> AsScoped<'a> for T
where
    &'a T: AsRef<[&'b str]>,
    T: 'a,
{
    fn as_scoped(&'a self, base: Scope) -> Scope {
        self.as_ref().iter().fold(base, |s, ss| s.add_part(*ss))
    }
}

#[cfg(test)]
mod tests {
    use super::{Scope, StatsLogger};
    use crate::{config::Configuration, registry::MetricRegistry};
    use std::sync::Arc;

    fn root() -> StatsLogger {
        StatsLogger::new(Arc::new(MetricRegistry::new(Configuration::mock())), Scope::Root)
    }

    #[test]
    fn test_scoping() {
        let root = root();
        assert_eq!(root.scope(), &Scope::Root);

        let client = root.scoped("bookkeeper_client");
        assert_eq!(client.scope(), &Scope::Nested(vec!["bookkeeper_client".to_string()]));

        let nested = root.scoped(&["per_channel_bookie_client", "10_0_0_1_3181"]);
        assert_eq!(
            nested.scope().scoped_name("ADD_ENTRY"),
            "per_channel_bookie_client.10_0_0_1_3181.ADD_ENTRY"
        );

        let inherited = root.scoped("per_channel_bookie_client").scoped("10_0_0_1_3181");
        assert_eq!(inherited.scope(), nested.scope());
    }

    #[test]
    fn test_equal_scopes_share_instruments() {
        let root = root();
        let a = root.scoped("bookkeeper_client").counter("ADD_ENTRY_UR").unwrap();
        let b = root.scoped("bookkeeper_client").counter("ADD_ENTRY_UR").unwrap();
        a.increment();
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn test_different_scopes_do_not_share_instruments() {
        let root = root();
        let a = root.scoped("bookkeeper_client").counter("ADD_ENTRY").unwrap();
        let b = root.scoped("per_channel_bookie_client").counter("ADD_ENTRY").unwrap();
        a.increment();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 0);
    }

    #[test]
    fn test_register_gauge_through_logger() {
        let logger = root().scoped("bookkeeper_client");
        logger.register_gauge("NUM_PENDING_ADD", || 4).unwrap();
        assert_eq!(logger.gauge("NUM_PENDING_ADD").unwrap().sample(), Some(4));
        assert!(logger.counter("NUM_PENDING_ADD").is_err());
    }
}
