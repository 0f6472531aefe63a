use std::{
    sync::{Arc, Barrier},
    thread,
    time::Duration,
};

use bookkeeper_stats::{data::MetricValue, Counter, Kind, StatsError, StatsProvider};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn concurrent_increments_are_not_lost() {
    const THREADS: usize = 8;
    const INCREMENTS: usize = 10_000;

    let provider = StatsProvider::builder().build().unwrap();
    let counter =
        provider.stats_logger("bookkeeper_client").counter("SPECULATIVE_READ_COUNT").unwrap();

    thread::scope(|s| {
        for _ in 0..THREADS {
            let counter = counter.clone();
            s.spawn(move || {
                for _ in 0..INCREMENTS {
                    counter.increment();
                }
            });
        }
    });

    assert_eq!(counter.get(), (THREADS * INCREMENTS) as i64);
}

#[test]
fn concurrent_first_creation_converges() {
    const THREADS: usize = 16;

    let provider = StatsProvider::builder().shards(2).build().unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let counters = thread::scope(|s| {
        let handles = (0..THREADS)
            .map(|_| {
                let logger = provider.stats_logger("bookkeeper_client");
                let barrier = barrier.clone();
                s.spawn(move || {
                    barrier.wait();
                    let counter = logger.counter("NUM_ENSEMBLE_CHANGE").unwrap();
                    counter.increment();
                    counter
                })
            })
            .collect::<Vec<_>>();

        handles.into_iter().map(|h| h.join().unwrap()).collect::<Vec<Counter>>()
    });

    assert_eq!(provider.registry().len(), 1);
    assert!(counters.iter().all(|c| c.ptr_eq(&counters[0])));
    assert_eq!(counters[0].get(), THREADS as i64);
}

#[test]
fn concurrent_op_stats_recording() {
    const THREADS: u64 = 4;
    const EVENTS: u64 = 1_000;

    let provider = StatsProvider::builder().reservoir_size(16).build().unwrap();
    let logger =
        provider.stats_logger("bookkeeper_client").op_stats_logger("READ_ENTRY").unwrap();

    thread::scope(|s| {
        for t in 0..THREADS {
            let logger = logger.clone();
            s.spawn(move || {
                for i in 0..EVENTS {
                    if (t + i) % 2 == 0 {
                        logger.register_successful_event(Duration::from_micros(i));
                    } else {
                        logger.register_failed_event(Duration::from_micros(i));
                    }
                }
            });
        }
    });

    let snapshot = logger.snapshot();
    assert_eq!(snapshot.success_count() + snapshot.failure_count(), THREADS * EVENTS);
    assert_eq!(snapshot.success_samples().len(), 16);
    assert_eq!(snapshot.failure_samples().len(), 16);
}

#[test]
fn kind_mismatch_fails_without_creating() {
    let provider = StatsProvider::builder().build().unwrap();
    let logger = provider.stats_logger("bookkeeper_client");
    logger.counter("READ_ENTRY_DM").unwrap();

    match logger.register_gauge("READ_ENTRY_DM", || 0) {
        Err(StatsError::KindMismatch { name, existing, requested }) => {
            assert_eq!(name, "bookkeeper_client.READ_ENTRY_DM");
            assert_eq!(existing, Kind::Counter);
            assert_eq!(requested, Kind::Gauge);
        }
        other => panic!("expected a kind mismatch, got {:?}", other),
    }

    let snapshot = provider.controller().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.iter().next().unwrap().kind(), Kind::Counter);
}

#[test]
fn panicking_gauge_is_isolated_from_other_metrics() {
    init_tracing();

    let provider = StatsProvider::builder().build().unwrap();
    let logger = provider.stats_logger("bookkeeper_client");
    logger.register_gauge("NUM_PENDING_ADD", || panic!("pending add queue is gone")).unwrap();
    logger.register_gauge("OTHER_GAUGE", || 9).unwrap();
    logger.counter("NUM_ENSEMBLE_CHANGE").unwrap().add(4);

    let snapshot = provider.controller().snapshot();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(
        snapshot.get("bookkeeper_client.NUM_PENDING_ADD").unwrap().value(),
        &MetricValue::Gauge(None)
    );
    assert_eq!(
        snapshot.get("bookkeeper_client.OTHER_GAUGE").unwrap().value(),
        &MetricValue::Gauge(Some(9))
    );
    assert_eq!(
        snapshot.get("bookkeeper_client.NUM_ENSEMBLE_CHANGE").unwrap().value(),
        &MetricValue::Counter(4)
    );
}

#[test]
fn gauge_reports_the_last_registered_sampler() {
    let provider = StatsProvider::builder().build().unwrap();
    let logger = provider.stats_logger("bookkeeper_client");
    logger.register_gauge("NUM_PENDING_ADD", || 1).unwrap();
    logger.register_gauge("NUM_PENDING_ADD", || 2).unwrap();

    let snapshot = provider.controller().snapshot();
    assert_eq!(
        snapshot.get("bookkeeper_client.NUM_PENDING_ADD").unwrap().value(),
        &MetricValue::Gauge(Some(2))
    );
}

#[test]
fn snapshots_during_recording_only_report_recorded_latencies() {
    const WRITERS: usize = 4;
    const EVENTS: usize = 5_000;

    let provider = StatsProvider::builder().reservoir_size(64).build().unwrap();
    let logger = provider.stats_logger("bookkeeper_client").op_stats_logger("ADD_ENTRY").unwrap();
    let controller = provider.controller();
    let done = std::sync::atomic::AtomicBool::new(false);

    let unexpected = thread::scope(|s| {
        let writers = (0..WRITERS)
            .map(|_| {
                let logger = logger.clone();
                s.spawn(move || {
                    for _ in 0..EVENTS {
                        logger.register_successful_event(Duration::from_millis(7));
                    }
                })
            })
            .collect::<Vec<_>>();

        let reader = s.spawn(|| {
            let mut unexpected = 0;
            while !done.load(std::sync::atomic::Ordering::Relaxed) {
                let snapshot = controller.snapshot();
                if let Some(MetricValue::OpStats(op)) =
                    snapshot.get("bookkeeper_client.ADD_ENTRY").map(|e| e.value())
                {
                    unexpected += op
                        .success_latencies()
                        .iter()
                        .filter(|l| **l != Duration::from_millis(7))
                        .count();
                }
            }
            unexpected
        });

        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, std::sync::atomic::Ordering::Relaxed);
        reader.join().unwrap()
    });

    assert_eq!(unexpected, 0);
    assert_eq!(logger.snapshot().success_count(), (WRITERS * EVENTS) as u64);
}
