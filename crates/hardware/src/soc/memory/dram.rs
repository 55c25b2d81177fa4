//! DRAM module.
//!
//! Wraps a [`MemoryController`] with the read and write counters the memory
//! system reports. The controller decides the latency; this layer only counts.

use tracing::trace;

use super::controller::{DramController, MemoryController, SimpleController};
use crate::common::constants::DRAM_FIXED_LATENCY;
use crate::config::{MemSysConfig, MemSysMode};
use crate::stats::DramStats;

/// Main memory behind the last-level cache.
#[derive(Debug)]
pub struct Dram {
    controller: Box<dyn MemoryController>,
    stats: DramStats,
}

impl Dram {
    /// Wraps `controller` with zeroed counters.
    pub fn new(controller: Box<dyn MemoryController>) -> Self {
        Self {
            controller,
            stats: DramStats::default(),
        }
    }

    /// Builds the DRAM the memory-system mode calls for: a fixed latency in the
    /// two-level mode, the banked timing model otherwise.
    pub fn for_config(config: &MemSysConfig) -> Self {
        let controller: Box<dyn MemoryController> = match config.mode {
            MemSysMode::TwoLevel => Box::new(SimpleController::new(DRAM_FIXED_LATENCY)),
            _ => Box::new(DramController::new(config.dram_policy, config.line_size)),
        };
        Self::new(controller)
    }

    /// Accesses one line and returns the latency in cycles.
    pub fn access(&mut self, line_addr: u64, is_write: bool) -> u64 {
        let delay = self.controller.access_latency(line_addr);
        trace!(line_addr, is_write, delay, "dram access");
        if is_write {
            self.stats.write_access += 1;
            self.stats.write_delay += delay;
        } else {
            self.stats.read_access += 1;
            self.stats.read_delay += delay;
        }
        delay
    }

    /// Access counters.
    pub const fn stats(&self) -> &DramStats {
        &self.stats
    }
}
