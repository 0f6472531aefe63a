use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use parking_lot::RwLock;
use tracing::{debug, error};

type Sampler = Arc<dyn Fn() -> i64 + Send + Sync + 'static>;

struct Inner {
    name: String,
    sampler: RwLock<Option<Sampler>>,
}

/// A reference to a pull-based gauge.
///
/// A [`Gauge`] holds no value of its own: it is backed by a sampling function that is called
/// whenever the gauge is polled.  At most one sampling function is held at a time.
#[derive(Clone)]
pub struct Gauge {
    inner: Arc<Inner>,
}

impl Gauge {
    pub(crate) fn new(name: String) -> Self {
        Self { inner: Arc::new(Inner { name, sampler: RwLock::new(None) }) }
    }

    /// Registers the sampling function for this gauge.
    ///
    /// Any previously registered sampling function is replaced.
    pub fn register<F>(&self, sampler: F)
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        let previous = self.inner.sampler.write().replace(Arc::new(sampler));
        if previous.is_some() {
            debug!(gauge = %self.inner.name, "replaced gauge sampler");
        }
    }

    /// Whether or not a sampling function is registered.
    pub fn is_registered(&self) -> bool {
        self.inner.sampler.read().is_some()
    }

    /// Polls the sampling function.
    ///
    /// Returns `None` if no sampling function is registered, or if the sampling function panicked.
    /// A panicking sampling function is logged and otherwise ignored.
    pub fn sample(&self) -> Option<i64> {
        // Don't hold the lock while calling out, the sampler is free to touch other metrics.
        let sampler = self.inner.sampler.read().clone()?;
        match panic::catch_unwind(AssertUnwindSafe(|| sampler())) {
            Ok(value) => Some(value),
            Err(_) => {
                error!(gauge = %self.inner.name, "gauge sampler panicked while being polled");
                None
            }
        }
    }

    /// Whether or not both handles point at the same underlying gauge.
    pub fn ptr_eq(&self, other: &Gauge) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gauge")
            .field("name", &self.inner.name)
            .field("registered", &self.is_registered())
            .finish()
    }
}
