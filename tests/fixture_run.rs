//! 端到端运行测试
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use lock_fixture::coordinator::plan_tasks;
use lock_fixture::{
    Delay, DelayPoint, FixtureConfig, FixtureError, LockName, NoDelay, RecordingSink, SharedState,
    SleepDelay, StatusLine, run,
};

fn fast_config(num_threads: usize, iterations: usize) -> FixtureConfig {
    FixtureConfig {
        num_threads,
        iterations,
        ..FixtureConfig::default()
    }
}

#[test]
fn default_scenario_totals() {
    let sink = RecordingSink::new();
    let report = run(&FixtureConfig::default(), &NoDelay, &sink).unwrap();

    assert_eq!(report.initial_sum, 55);
    assert_eq!(report.final_counter, 15);
    assert_eq!(report.final_sum, 70);
    assert_eq!(report.final_array, vec![2, 4, 6, 8, 10, 6, 7, 8, 9, 10]);
    assert_eq!(report.to_string(), "Final counter: 15\nFinal sum: 70\n");
}

#[test]
fn no_lost_updates_across_worker_counts() {
    for (threads, iterations) in [(2, 1), (5, 40), (9, 200), (17, 100)] {
        let sink = RecordingSink::new();
        let report = run(&fast_config(threads, iterations), &NoDelay, &sink).unwrap();
        assert_eq!(report.final_counter, ((threads - 1) * iterations) as u64);
        assert_eq!(report.final_counter, report.expected_counter());
        assert_eq!(report.max_lock_a_holders, 1);
    }
}

#[test]
fn counter_lines_are_strictly_increasing() {
    let sink = RecordingSink::new();
    run(&fast_config(6, 25), &NoDelay, &sink).unwrap();

    let counters: Vec<u64> = sink
        .lines()
        .into_iter()
        .filter_map(|line| match line {
            StatusLine::Counter { counter, local, .. } => {
                assert_eq!(counter, local);
                Some(counter)
            }
            _ => None,
        })
        .collect();
    assert_eq!(counters, (1..=125).collect::<Vec<u64>>());
}

#[test]
fn array_worker_acquires_mutex1_before_mutex2() {
    let sink = RecordingSink::new();
    run(&FixtureConfig::default(), &NoDelay, &sink).unwrap();

    let acquisitions: Vec<StatusLine> = sink
        .lines()
        .into_iter()
        .filter(|line| matches!(line, StatusLine::Acquired { .. }))
        .collect();
    assert_eq!(
        acquisitions,
        vec![
            StatusLine::Acquired {
                id: 4,
                lock: LockName::Mutex1
            },
            StatusLine::Acquired {
                id: 4,
                lock: LockName::Mutex2
            },
        ]
    );
}

#[test]
fn real_sleeps_still_terminate() {
    let delay = SleepDelay {
        hold: Duration::from_micros(50),
        post_release: Duration::from_micros(200),
        between_locks: Duration::from_millis(2),
    };
    let sink = RecordingSink::new();
    let report = run(&fast_config(4, 5), &delay, &sink).unwrap();
    assert_eq!(report.final_counter, 15);
    assert_eq!(report.final_sum, 70);
    assert_eq!(report.max_lock_a_holders, 1);
}

/// Yields at every pause point to shake up the interleaving.
struct YieldDelay {
    pauses: AtomicUsize,
}

impl Delay for YieldDelay {
    fn pause(&self, _point: DelayPoint) {
        self.pauses.fetch_add(1, Ordering::Relaxed);
        thread::yield_now();
    }
}

/// Panics while a counter worker holds mutex1, poisoning it for everyone else.
struct PanicWhileHolding;

impl Delay for PanicWhileHolding {
    fn pause(&self, point: DelayPoint) {
        if point == DelayPoint::Hold {
            panic!("worker gave up while holding mutex1");
        }
    }
}

#[test]
fn failing_worker_surfaces_as_error_after_all_joins() {
    let sink = RecordingSink::new();
    let result = run(&FixtureConfig::default(), &PanicWhileHolding, &sink);

    assert!(matches!(
        result,
        Err(FixtureError::WorkerPanicked { .. }) | Err(FixtureError::Poisoned(LockName::Mutex1))
    ));
    // No counter line is ever printed: every increment dies at the hold point.
    assert!(
        !sink
            .lines()
            .iter()
            .any(|line| matches!(line, StatusLine::Counter { .. }))
    );
}

#[test]
fn delay_is_consulted_at_every_point() {
    let delay = YieldDelay {
        pauses: AtomicUsize::new(0),
    };
    let sink = RecordingSink::new();
    run(&fast_config(4, 5), &delay, &sink).unwrap();
    // Two pauses per counter iteration plus one between the array locks.
    assert_eq!(delay.pauses.load(Ordering::Relaxed), 3 * 5 * 2 + 1);
}

#[test]
fn mutex1_is_never_shared() {
    let state = SharedState::new((1..=10).collect());
    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..500 {
                    let mut counter = state.lock_counter().unwrap();
                    counter.increment();
                    assert_eq!(state.probe().current_holders(), 1);
                }
            });
        }
    });
    assert_eq!(state.counter().unwrap(), 4000);
    assert_eq!(state.probe().max_holders(), 1);
}

#[test]
fn sum_is_unchanged_when_doubling_nothing() {
    let config = FixtureConfig {
        doubled_prefix: 0,
        ..FixtureConfig::default()
    };
    let sink = RecordingSink::new();
    let report = run(&config, &NoDelay, &sink).unwrap();
    assert_eq!(report.initial_sum, report.final_sum);
}

#[test]
fn array_worker_takes_the_last_id() {
    let tasks = plan_tasks(&fast_config(7, 3));
    assert_eq!(tasks.last().map(|t| t.id), Some(7));
    assert_eq!(tasks.len(), 7);
}
