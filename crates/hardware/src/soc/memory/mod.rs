//! Memory hierarchy below the cores.
//!
//! This module implements everything a memory-system access passes through. It provides:
//! 1. **Controller:** Latency modeling (fixed or banked row-buffer DRAM timing).
//! 2. **DRAM:** The controller plus read and write statistics.
//! 3. **Memory System:** Cache hierarchy wiring for each simulation mode.

/// Memory controller implementations for access latency modeling.
pub mod controller;

/// DRAM module with access statistics.
pub mod dram;

/// Cache hierarchy and access paths.
pub mod memsys;

pub use self::dram::Dram;
pub use self::memsys::MemorySystem;
