//! System-on-Chip (SoC) Components.
//!
//! This module organizes the memory-system simulator: the DRAM and cache
//! hierarchy shared by the cores, and the chip multiprocessor driver that
//! replays one memory trace per core.

/// Trace-driven cores and the multi-core driver.
pub mod cmp;

/// DRAM, memory controllers and the cache hierarchy.
pub mod memory;

pub use cmp::{CmpSimulator, MemCore};
pub use memory::MemorySystem;
