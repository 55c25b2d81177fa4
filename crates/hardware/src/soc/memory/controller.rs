//! Memory controller implementations for latency modeling.
//!
//! This module provides:
//! 1. **SimpleController:** Fixed latency per access (no row-buffer modeling).
//! 2. **DramController:** Banked row-buffer timing (ACT, CAS, PRE, bus) under an open- or close-page policy.
//!
//! Addresses are cache line numbers; the controller converts them to bytes
//! with the configured line size.

use std::fmt::Debug;

use crate::common::constants::{
    DRAM_ACT_LATENCY, DRAM_BUS_LATENCY, DRAM_CAS_LATENCY, DRAM_NUM_BANKS, DRAM_PRE_LATENCY,
    DRAM_ROW_BUFFER_SIZE,
};
use crate::config::DramPolicy;

/// Trait for memory controller implementations that report access latency in cycles.
pub trait MemoryController: Send + Sync + Debug {
    /// Returns the number of cycles required for an access to the given line.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - Physical line address being accessed (may be used for row-buffer modeling).
    ///
    /// # Returns
    ///
    /// Latency in simulation cycles.
    fn access_latency(&mut self, line_addr: u64) -> u64;
}

/// Fixed-latency memory controller; every access takes the same number of cycles.
#[derive(Clone, Copy, Debug)]
pub struct SimpleController {
    latency: u64,
}

impl SimpleController {
    /// Creates a simple controller with the given fixed latency in cycles.
    pub const fn new(latency: u64) -> Self {
        Self { latency }
    }
}

impl MemoryController for SimpleController {
    fn access_latency(&mut self, _line_addr: u64) -> u64 {
        self.latency
    }
}

/// Bank and row an access maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowAddress {
    /// Bank index.
    pub bank: usize,
    /// Row within the bank.
    pub row: u64,
}

/// DRAM-style controller with one row buffer per bank.
///
/// Consecutive row-buffer-sized chunks of the address space are interleaved
/// across the banks.
#[derive(Clone, Debug)]
pub struct DramController {
    open_rows: [Option<u64>; DRAM_NUM_BANKS as usize],
    policy: DramPolicy,
    line_size: u64,
}

impl DramController {
    /// Creates a DRAM controller with every bank precharged.
    ///
    /// # Arguments
    ///
    /// * `policy` - Whether rows stay open after an access.
    /// * `line_size` - Cache line size in bytes.
    pub const fn new(policy: DramPolicy, line_size: u64) -> Self {
        Self {
            open_rows: [None; DRAM_NUM_BANKS as usize],
            policy,
            line_size,
        }
    }

    /// Maps a line address onto its bank and row.
    pub const fn locate(&self, line_addr: u64) -> RowAddress {
        let chunk = line_addr * self.line_size / DRAM_ROW_BUFFER_SIZE;
        RowAddress {
            bank: (chunk % DRAM_NUM_BANKS) as usize,
            row: chunk / DRAM_NUM_BANKS,
        }
    }

    /// Row currently latched in `bank`, if any.
    pub fn open_row(&self, bank: usize) -> Option<u64> {
        self.open_rows.get(bank).copied().flatten()
    }
}

impl MemoryController for DramController {
    fn access_latency(&mut self, line_addr: u64) -> u64 {
        let RowAddress { bank, row } = self.locate(line_addr);
        let open = self.open_rows[bank].replace(row);
        let array = match (self.policy, open) {
            (DramPolicy::OpenPage, Some(r)) if r == row => DRAM_CAS_LATENCY,
            (DramPolicy::OpenPage, Some(_)) => {
                DRAM_PRE_LATENCY + DRAM_ACT_LATENCY + DRAM_CAS_LATENCY
            }
            _ => DRAM_ACT_LATENCY + DRAM_CAS_LATENCY,
        };
        array + DRAM_BUS_LATENCY
    }
}
