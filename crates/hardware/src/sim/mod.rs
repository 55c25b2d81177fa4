//! Simulation driving and trace loading.
//!
//! Provides the watchdog-guarded run loop for the pipeline engines and the
//! helpers that open trace files from disk.

/// Trace file loading.
pub mod loader;

/// Run loop with deadlock detection and progress logging.
pub mod simulator;

pub use loader::{open_mem_trace, open_trace};
pub use simulator::Simulator;
