use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

/// A reference to a counter.
///
/// A [`Counter`] is used for directly updating a counter, without any lookup overhead.  Clones
/// share the same underlying value.
#[derive(Clone, Debug, Default)]
pub struct Counter {
    inner: Arc<AtomicI64>,
}

impl Counter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Creates a counter that is not bound to any registry.
    ///
    /// Updates to a detached counter are never exported.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Increments the counter by one.
    pub fn increment(&self) {
        self.add(1);
    }

    /// Decrements the counter by one.
    pub fn decrement(&self) {
        self.add(-1);
    }

    /// Adds `delta`, which may be negative, to the counter.
    pub fn add(&self, delta: i64) {
        self.inner.fetch_add(delta, Ordering::Relaxed);
    }

    /// Gets the current value of the counter.
    pub fn get(&self) -> i64 {
        self.inner.load(Ordering::Relaxed)
    }

    /// Resets the counter to zero.
    pub fn clear(&self) {
        self.inner.store(0, Ordering::Relaxed);
    }

    /// Whether or not both handles point at the same underlying counter.
    pub fn ptr_eq(&self, other: &Counter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
