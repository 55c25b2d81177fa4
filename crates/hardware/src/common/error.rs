//! Simulation error definitions.
//!
//! This module defines the single error type shared by every simulator in the crate.
//! It covers:
//! 1. **Trace Errors:** Truncated records and out-of-range operation codes.
//! 2. **Resource Exhaustion:** Execution queue overflow inside the out-of-order core.
//! 3. **Watchdog Aborts:** Lack of retirement progress within the configured window.
//! 4. **Startup Failures:** Invalid configuration values and unreadable trace files.
//!
//! None of these conditions is retried. Every error stops the run and is reported.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Fatal conditions raised while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A trace record could not be decoded.
    ///
    /// `offset` is the byte offset of the start of the offending record.
    #[error("invalid trace record at byte {offset}: {reason}")]
    TraceFormat {
        /// Byte offset of the record within the trace stream.
        offset: u64,
        /// Human readable description of the defect.
        reason: String,
    },

    /// An instruction was sent to a full execution queue.
    #[error("execution queue overflow (capacity {capacity})")]
    ExeqFull {
        /// Number of slots in the queue.
        capacity: usize,
    },

    /// No instruction retired within the watchdog window.
    #[error("deadlock: no instruction retired in {window} cycles (cycle {cycle}, retired {retired})")]
    Deadlock {
        /// Watchdog window in cycles.
        window: u64,
        /// Cycle at which the stall was detected.
        cycle: u64,
        /// Instructions retired so far.
        retired: u64,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A trace or configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl SimError {
    /// Builds a [`SimError::TraceFormat`] for the record starting at `offset`.
    pub fn trace_format(offset: u64, reason: impl Into<String>) -> Self {
        Self::TraceFormat {
            offset,
            reason: reason.into(),
        }
    }

    /// Returns true for errors that are raised before any cycle is simulated.
    pub const fn is_startup(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Io { .. })
    }
}
