//! Trace-driven microarchitecture simulator library.
//!
//! This crate replays instruction and memory traces through cycle-level models:
//! 1. **Core:** An out-of-order pipeline (ROB, RAT, execution queue) and an
//!    in-order superscalar pipeline with forwarding and branch prediction.
//! 2. **Memory:** Set-associative caches with LRU, random and way-partitioned
//!    replacement, a DRAM row-buffer model and a dual-core memory hierarchy.
//! 3. **Trace:** Decoders for the fixed-size binary trace records.
//! 4. **Simulation:** Cycle drivers with a deadlock watchdog, configuration and
//!    statistics reports.

/// Common types and constants (errors, registers, access types, latencies).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU cores (pipelines, branch predictors, caches).
pub mod core;
/// Trace loading and the cycle drivers.
pub mod sim;
/// Memory hierarchy and the multi-core driver.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Binary trace records and readers.
pub mod trace;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate error type and result alias.
pub use crate::common::error::{Result, SimError};
/// A pipeline that can be stepped one cycle at a time.
pub use crate::core::pipeline::engine::Engine;
/// The in-order superscalar pipeline.
pub use crate::core::pipeline::inorder::InOrderPipeline;
/// The out-of-order pipeline.
pub use crate::core::pipeline::o3::OooPipeline;
/// Engine driver with the deadlock watchdog.
pub use crate::sim::Simulator;
/// Multi-core memory-system driver and the hierarchy it drives.
pub use crate::soc::{CmpSimulator, MemorySystem};
