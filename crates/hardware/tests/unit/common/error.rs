//! Error Classification Tests.
//!
//! Verifies the messages and startup classification of `SimError`.

use std::path::PathBuf;

use tracesim_core::SimError;

#[test]
fn config_and_io_errors_are_startup_failures() {
    assert!(SimError::Config("bad width".into()).is_startup());
    let io = SimError::Io {
        path: PathBuf::from("trace.bin"),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };
    assert!(io.is_startup());
}

#[test]
fn runtime_errors_are_not_startup_failures() {
    assert!(!SimError::ExeqFull { capacity: 16 }.is_startup());
    assert!(
        !SimError::Deadlock {
            window: 10_000,
            cycle: 20_000,
            retired: 5
        }
        .is_startup()
    );
}

#[test]
fn deadlock_message_carries_context() {
    let err = SimError::Deadlock {
        window: 100,
        cycle: 300,
        retired: 7,
    };
    assert_eq!(
        err.to_string(),
        "deadlock: no instruction retired in 100 cycles (cycle 300, retired 7)"
    );
}

#[test]
fn exeq_overflow_message_names_capacity() {
    let err = SimError::ExeqFull { capacity: 16 };
    assert_eq!(err.to_string(), "execution queue overflow (capacity 16)");
}
