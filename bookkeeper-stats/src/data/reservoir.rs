//! An atomic sampling reservoir.

use std::{
    cell::RefCell,
    sync::atomic::{
        AtomicBool, AtomicU64, AtomicUsize,
        Ordering::{Acquire, Relaxed, Release},
    },
};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

thread_local! {
    static FAST_RNG: RefCell<Xoshiro256StarStar> =
        RefCell::new(Xoshiro256StarStar::from_rng(&mut rand::rng()));
}

/// Picks a value in `0..=upper`.
fn fastrand(upper: usize) -> usize {
    FAST_RNG.with(|rng| rng.borrow_mut().random_range(0..=upper))
}

/// A fixed-capacity sampling reservoir.
///
/// Based on Vitter's "Algorithm R": every value is kept until the reservoir fills, after which the
/// `n`-th value replaces a random slot with probability `capacity / n`.  Writers never block each
/// other, and reading the samples does not consume them.
///
/// A slot is only reported once a value has been stored in it, so readers running alongside
/// writers never see a slot that was claimed but not yet written.
#[derive(Debug)]
pub(crate) struct AtomicSamplingReservoir {
    values: Box<[AtomicU64]>,
    written: Box<[AtomicBool]>,
    count: AtomicUsize,
}

impl AtomicSamplingReservoir {
    /// Creates a new `AtomicSamplingReservoir` that stores up to `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        let values = (0..capacity).map(|_| AtomicU64::new(0)).collect::<Vec<_>>();
        let written = (0..capacity).map(|_| AtomicBool::new(false)).collect::<Vec<_>>();
        Self {
            values: values.into_boxed_slice(),
            written: written.into_boxed_slice(),
            count: AtomicUsize::new(0),
        }
    }

    /// Pushes a sample into the reservoir.
    pub fn push(&self, value: u64) {
        let idx = self.count.fetch_add(1, Relaxed);
        let slot = if idx < self.values.len() {
            idx
        } else {
            match fastrand(idx) {
                maybe_idx if maybe_idx < self.values.len() => maybe_idx,
                _ => return,
            }
        };

        self.values[slot].store(value, Relaxed);
        self.written[slot].store(true, Release);
    }

    /// Number of values pushed since the reservoir was created.
    pub fn unsampled_len(&self) -> usize {
        self.count.load(Acquire)
    }

    /// Copies out the samples currently held.
    pub fn samples(&self) -> Vec<u64> {
        let len = self.unsampled_len().min(self.values.len());
        (0..len)
            .filter(|idx| self.written[*idx].load(Acquire))
            .map(|idx| self.values[idx].load(Relaxed))
            .collect()
    }
}
