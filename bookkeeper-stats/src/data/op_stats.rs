use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use arc_swap::ArcSwap;

use crate::data::reservoir::AtomicSamplingReservoir;

#[derive(Debug)]
struct Outcome {
    count: AtomicU64,
    sum: AtomicU64,
    reservoir: AtomicSamplingReservoir,
}

impl Outcome {
    fn new(reservoir_size: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum: AtomicU64::new(0),
            reservoir: AtomicSamplingReservoir::with_capacity(reservoir_size),
        }
    }

    fn record(&self, value: u64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(value, Ordering::Relaxed);
        self.reservoir.push(value);
    }
}

#[derive(Debug)]
struct Outcomes {
    success: Outcome,
    failure: Outcome,
}

impl Outcomes {
    fn new(reservoir_size: usize) -> Self {
        Self { success: Outcome::new(reservoir_size), failure: Outcome::new(reservoir_size) }
    }
}

// Clearing swaps in a fresh generation rather than resetting fields one by one, so a snapshot only
// ever reads from a single generation.
#[derive(Debug)]
struct Inner {
    reservoir_size: usize,
    current: ArcSwap<Outcomes>,
}

/// A reference to an operation stats logger.
///
/// Records discrete events, each tagged as a success or a failure, along with a latency (or, for
/// loggers that track sizes rather than time, a plain value).  Counts and sums are exact, while
/// the distribution is kept in a fixed-size sampling reservoir per outcome.
///
/// Latencies are recorded with nanosecond resolution.
#[derive(Clone, Debug)]
pub struct OpStatsLogger {
    inner: Arc<Inner>,
}

impl OpStatsLogger {
    pub(crate) fn new(reservoir_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                reservoir_size,
                current: ArcSwap::from_pointee(Outcomes::new(reservoir_size)),
            }),
        }
    }

    /// Records a successful event that took `latency`.
    pub fn register_successful_event(&self, latency: Duration) {
        self.inner.current.load().success.record(duration_as_nanos(latency));
    }

    /// Records a failed event that took `latency`.
    pub fn register_failed_event(&self, latency: Duration) {
        self.inner.current.load().failure.record(duration_as_nanos(latency));
    }

    /// Records a successful event carrying an arbitrary value.
    pub fn register_successful_value(&self, value: u64) {
        self.inner.current.load().success.record(value);
    }

    /// Records a failed event carrying an arbitrary value.
    pub fn register_failed_value(&self, value: u64) {
        self.inner.current.load().failure.record(value);
    }

    /// Takes a point-in-time snapshot of this logger.
    ///
    /// Snapshots do not consume anything: two snapshots with no events in between are equal.
    pub fn snapshot(&self) -> OpStatsSnapshot {
        let outcomes = self.inner.current.load();
        let success = &outcomes.success;
        let failure = &outcomes.failure;

        let mut success_samples = success.reservoir.samples();
        success_samples.sort_unstable();
        let mut failure_samples = failure.reservoir.samples();
        failure_samples.sort_unstable();

        OpStatsSnapshot {
            success_count: success.count.load(Ordering::Relaxed),
            failure_count: failure.count.load(Ordering::Relaxed),
            success_sum: success.sum.load(Ordering::Relaxed),
            failure_sum: failure.sum.load(Ordering::Relaxed),
            success_samples,
            failure_samples,
        }
    }

    /// Resets all counts and samples.
    ///
    /// Events recorded concurrently with the reset may be dropped.
    pub fn clear(&self) {
        self.inner.current.store(Arc::new(Outcomes::new(self.inner.reservoir_size)));
    }

    /// Whether or not both handles point at the same underlying logger.
    pub fn ptr_eq(&self, other: &OpStatsLogger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// A point-in-time view of an [`OpStatsLogger`].
///
/// Samples are sorted in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpStatsSnapshot {
    success_count: u64,
    failure_count: u64,
    success_sum: u64,
    failure_sum: u64,
    success_samples: Vec<u64>,
    failure_samples: Vec<u64>,
}

impl OpStatsSnapshot {
    /// Number of successful events.
    pub fn success_count(&self) -> u64 {
        self.success_count
    }

    /// Number of failed events.
    pub fn failure_count(&self) -> u64 {
        self.failure_count
    }

    /// Sum of all successful event values, in nanoseconds for latencies.
    pub fn success_sum(&self) -> u64 {
        self.success_sum
    }

    /// Sum of all failed event values, in nanoseconds for latencies.
    pub fn failure_sum(&self) -> u64 {
        self.failure_sum
    }

    /// Sampled values of successful events.
    pub fn success_samples(&self) -> &[u64] {
        &self.success_samples
    }

    /// Sampled values of failed events.
    pub fn failure_samples(&self) -> &[u64] {
        &self.failure_samples
    }

    /// Sampled latencies of successful events.
    pub fn success_latencies(&self) -> Vec<Duration> {
        self.success_samples.iter().map(|ns| Duration::from_nanos(*ns)).collect()
    }

    /// Sampled latencies of failed events.
    pub fn failure_latencies(&self) -> Vec<Duration> {
        self.failure_samples.iter().map(|ns| Duration::from_nanos(*ns)).collect()
    }

    /// Estimated value of successful events at quantile `q`.
    ///
    /// `None` if there are no samples, or if `q` is not within `[0.0, 1.0]`.
    pub fn success_quantile(&self, q: f64) -> Option<u64> {
        nearest_rank(&self.success_samples, q)
    }

    /// Estimated value of failed events at quantile `q`.
    ///
    /// `None` if there are no samples, or if `q` is not within `[0.0, 1.0]`.
    pub fn failure_quantile(&self, q: f64) -> Option<u64> {
        nearest_rank(&self.failure_samples, q)
    }

    /// Fraction of events that succeeded, or `None` if no events were recorded.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.success_count + self.failure_count;
        if total == 0 {
            None
        } else {
            Some(self.success_count as f64 / total as f64)
        }
    }
}

fn nearest_rank(sorted: &[u64], q: f64) -> Option<u64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let rank = (q * sorted.len() as f64).ceil() as usize;
    let idx = rank.saturating_sub(1).min(sorted.len() - 1);
    Some(sorted[idx])
}

/// Converts a duration to nanoseconds, saturating at `u64::MAX`.
pub(crate) fn duration_as_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{duration_as_nanos, nearest_rank, OpStatsLogger};
    use proptest::prelude::*;
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        thread,
        time::Duration,
    };

    #[test]
    fn test_success_and_failure_are_tracked_separately() {
        let logger = OpStatsLogger::new(16);
        logger.register_successful_event(Duration::from_millis(5));
        logger.register_failed_event(Duration::from_millis(12));

        let snapshot = logger.snapshot();
        assert_eq!(snapshot.success_count(), 1);
        assert_eq!(snapshot.failure_count(), 1);
        assert_eq!(snapshot.success_latencies(), vec![Duration::from_millis(5)]);
        assert_eq!(snapshot.failure_latencies(), vec![Duration::from_millis(12)]);
        assert_eq!(snapshot.success_rate(), Some(0.5));
    }

    #[test]
    fn test_values_and_clear() {
        let logger = OpStatsLogger::new(16);
        logger.register_successful_value(3);
        logger.register_successful_value(9);
        logger.register_failed_value(1);

        let snapshot = logger.snapshot();
        assert_eq!(snapshot.success_samples(), &[3, 9]);
        assert_eq!(snapshot.success_sum(), 12);
        assert_eq!(snapshot.failure_sum(), 1);

        // Snapshots are not destructive.
        assert_eq!(logger.snapshot(), snapshot);

        logger.clear();
        let snapshot = logger.snapshot();
        assert_eq!(snapshot.success_count(), 0);
        assert!(snapshot.success_samples().is_empty());
        assert_eq!(snapshot.success_rate(), None);
    }

    #[test]
    fn test_clear_starts_a_fresh_generation() {
        let logger = OpStatsLogger::new(4);
        for _ in 0..4 {
            logger.register_successful_value(5);
        }
        logger.clear();
        logger.register_successful_value(7);

        let snapshot = logger.snapshot();
        assert_eq!(snapshot.success_count(), 1);
        assert_eq!(snapshot.success_sum(), 7);
        assert_eq!(snapshot.success_samples(), &[7]);
    }

    #[test]
    fn test_snapshots_during_recording_and_clearing() {
        let logger = OpStatsLogger::new(32);
        let done = AtomicBool::new(false);

        let unexpected = thread::scope(|s| {
            let writers = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        for _ in 0..5_000 {
                            logger.register_successful_value(7);
                        }
                    })
                })
                .collect::<Vec<_>>();

            let reader = s.spawn(|| {
                let mut unexpected = 0;
                while !done.load(Ordering::Relaxed) {
                    let snapshot = logger.snapshot();
                    unexpected += snapshot.success_samples().iter().filter(|v| **v != 7).count();
                    if snapshot.success_count() > 1_000 {
                        logger.clear();
                    }
                }
                unexpected
            });

            for writer in writers {
                writer.join().unwrap();
            }
            done.store(true, Ordering::Relaxed);
            reader.join().unwrap()
        });

        assert_eq!(unexpected, 0);
    }

    #[test]
    fn test_counts_are_exact_past_reservoir_capacity() {
        let logger = OpStatsLogger::new(4);
        for i in 0..100 {
            logger.register_successful_value(i);
        }

        let snapshot = logger.snapshot();
        assert_eq!(snapshot.success_count(), 100);
        assert_eq!(snapshot.success_sum(), (0..100).sum::<u64>());
        assert_eq!(snapshot.success_samples().len(), 4);
    }

    #[test]
    fn test_quantiles() {
        let samples = (1..=100).collect::<Vec<u64>>();
        assert_eq!(nearest_rank(&samples, 0.0), Some(1));
        assert_eq!(nearest_rank(&samples, 0.5), Some(50));
        assert_eq!(nearest_rank(&samples, 0.99), Some(99));
        assert_eq!(nearest_rank(&samples, 1.0), Some(100));
        assert_eq!(nearest_rank(&samples, 1.5), None);
        assert_eq!(nearest_rank(&[], 0.5), None);
    }

    #[test]
    fn test_duration_as_nanos() {
        assert_eq!(duration_as_nanos(Duration::from_secs(3)), 3_000_000_000);
        assert_eq!(duration_as_nanos(Duration::from_millis(500)), 500_000_000);
        assert_eq!(duration_as_nanos(Duration::MAX), u64::MAX);
    }

    proptest! {
        #[test]
        fn quantile_is_a_recorded_value(
            values in proptest::collection::vec(0u64..1_000_000, 1..128),
            q in 0.0f64..=1.0,
        ) {
            let logger = OpStatsLogger::new(256);
            for value in &values {
                logger.register_failed_value(*value);
            }

            let snapshot = logger.snapshot();
            let estimate = snapshot.failure_quantile(q).unwrap();
            prop_assert!(values.contains(&estimate));
            prop_assert!(estimate >= *values.iter().min().unwrap());
            prop_assert!(estimate <= *values.iter().max().unwrap());
        }
    }
}
