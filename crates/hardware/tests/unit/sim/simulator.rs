//! # Simulator Tests
//!
//! The run loop and watchdog, driven by a mocked engine.

use mockall::Sequence;
use tracesim_core::config::WatchdogConfig;
use tracesim_core::{SimError, Simulator};

use crate::common::mocks::MockPipeline;

fn watchdog(window: u64) -> WatchdogConfig {
    WatchdogConfig {
        window,
        ..WatchdogConfig::default()
    }
}

/// An engine that counts cycles and never retires anything.
fn stuck_engine() -> MockPipeline {
    let mut engine = MockPipeline::new();
    let mut cycles = 0u64;
    let _ = engine.expect_cycle().returning(move || {
        cycles += 1;
        Ok(())
    });
    engine
}

#[test]
fn halted_engine_is_not_cycled() {
    let mut engine = MockPipeline::new();
    let _ = engine.expect_is_halted().return_const(true);
    let _ = engine.expect_cycle().never();
    let _ = engine.expect_cycles().return_const(0u64);

    let mut sim = Simulator::new(engine, &watchdog(10));
    assert_eq!(sim.run().unwrap(), 0);
}

/// No retirement for a whole window stops the run at the window boundary.
#[test]
fn stalled_engine_deadlocks_at_window() {
    let mut engine = stuck_engine();
    let mut clock = 0u64;
    let _ = engine.expect_cycles().returning(move || {
        clock += 1;
        clock
    });
    let _ = engine.expect_retired().return_const(0u64);
    let _ = engine.expect_is_halted().return_const(false);

    let mut sim = Simulator::new(engine, &watchdog(50));
    match sim.run() {
        Err(SimError::Deadlock {
            window,
            cycle,
            retired,
        }) => assert_eq!((window, cycle, retired), (50, 50, 0)),
        other => panic!("expected deadlock, got {other:?}"),
    }
}

/// An engine that halts on the window boundary is not a deadlock.
#[test]
fn halt_on_window_boundary_is_clean() {
    let mut engine = stuck_engine();
    let _ = engine.expect_cycles().return_const(20u64);
    let _ = engine.expect_retired().return_const(0u64);
    let _ = engine.expect_is_halted().return_const(true);

    let mut sim = Simulator::new(engine, &watchdog(20));
    assert!(sim.tick().is_ok());
}

/// Engine failures pass through untouched.
#[test]
fn engine_errors_propagate() {
    let mut engine = MockPipeline::new();
    let mut seq = Sequence::new();
    let _ = engine
        .expect_is_halted()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(false);
    let _ = engine
        .expect_cycle()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(SimError::ExeqFull { capacity: 16 }));

    let mut sim = Simulator::new(engine, &watchdog(10));
    assert!(matches!(sim.run(), Err(SimError::ExeqFull { capacity: 16 })));
}

/// Retiring anything within each window keeps the run alive.
#[test]
fn steady_progress_runs_to_halt() {
    let mut engine = stuck_engine();
    let mut clock = 0u64;
    let _ = engine.expect_cycles().returning(move || {
        clock += 1;
        clock
    });
    let mut retired_calls = 0u64;
    let _ = engine.expect_retired().returning(move || {
        retired_calls += 1;
        retired_calls / 5
    });
    let mut polls = 0u64;
    let _ = engine.expect_is_halted().returning(move || {
        polls += 1;
        polls > 40
    });

    let mut sim = Simulator::new(engine, &watchdog(8));
    assert!(sim.run().is_ok());
}
