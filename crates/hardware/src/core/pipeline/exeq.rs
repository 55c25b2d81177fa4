//! Execution queue (EXEQ) for multi-cycle operations.
//!
//! An unordered bag of fixed capacity. Every instruction waits one cycle, loads
//! wait the configured load latency. Several entries may finish in the same
//! cycle; the execute stage drains all of them.

use crate::common::error::{Result, SimError};
use crate::core::pipeline::inst::InstInfo;
use crate::trace::OpType;

/// Fixed-capacity holding area for executing instructions.
#[derive(Clone, Debug)]
pub struct Exeq {
    slots: Vec<Option<InstInfo>>,
    load_latency: u64,
}

impl Exeq {
    /// Creates a queue with `capacity` slots.
    pub fn new(capacity: usize, load_latency: u64) -> Self {
        Self {
            slots: vec![None; capacity],
            load_latency,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Places `inst` in a free slot and starts its latency countdown.
    ///
    /// # Errors
    ///
    /// [`SimError::ExeqFull`] when every slot is taken. Existing entries are untouched.
    pub fn insert(&mut self, mut inst: InstInfo) -> Result<()> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.is_none())
            .ok_or(SimError::ExeqFull { capacity })?;
        inst.exe_wait_cycles = if inst.op_type == OpType::Load {
            self.load_latency
        } else {
            1
        };
        *slot = Some(inst);
        Ok(())
    }

    /// Advances every occupied slot by one cycle.
    pub fn cycle(&mut self) {
        for inst in self.slots.iter_mut().flatten() {
            inst.exe_wait_cycles = inst.exe_wait_cycles.saturating_sub(1);
        }
    }

    /// Returns true if some instruction has finished.
    pub fn check_done(&self) -> bool {
        self.slots.iter().flatten().any(|i| i.exe_wait_cycles == 0)
    }

    /// Removes one finished instruction, if any.
    pub fn remove(&mut self) -> Option<InstInfo> {
        self.slots
            .iter_mut()
            .find(|s| s.is_some_and(|i| i.exe_wait_cycles == 0))
            .and_then(Option::take)
    }
}
