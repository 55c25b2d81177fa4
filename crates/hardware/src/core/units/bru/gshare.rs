//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the branch address using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:** `predict()` and `train()` are O(1)
//! - **Space Complexity:** 2^12 two-bit counters
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches that alias in the table

use super::BranchPredictor;

/// Width of the global history register and of the table index.
pub const HISTORY_BITS: u32 = 12;
/// Total number of entries in the PHT.
const TABLE_SIZE: usize = 1 << HISTORY_BITS;
/// Mask selecting the low history bits.
const INDEX_MASK: u64 = (TABLE_SIZE as u64) - 1;
/// Initial counter value: weakly taken.
const WEAKLY_TAKEN: u8 = 2;

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register; the newest outcome is bit 0.
    ghr: u64,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<u8>,
}

impl Default for GSharePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl GSharePredictor {
    /// Creates a predictor with empty history and every counter weakly taken.
    pub fn new() -> Self {
        Self {
            ghr: 0,
            pht: vec![WEAKLY_TAKEN; TABLE_SIZE],
        }
    }

    /// Current global history.
    pub fn history(&self) -> u64 {
        self.ghr
    }

    /// Counter selected for the branch at `pc` under the current history.
    pub fn counter(&self, pc: u64) -> u8 {
        self.pht[self.index(pc)]
    }

    /// Low address bits XOR global history.
    fn index(&self, pc: u64) -> usize {
        ((pc & INDEX_MASK) ^ self.ghr) as usize
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns true if the 2-bit counter at the hashed index is 2 or 3.
    fn predict(&self, pc: u64) -> bool {
        self.counter(pc) >= WEAKLY_TAKEN
    }

    /// Updates the saturating counter, then shifts the outcome into the history.
    fn train(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        let counter = self.pht[idx];
        if taken && counter < 3 {
            self.pht[idx] += 1;
        } else if !taken && counter > 0 {
            self.pht[idx] -= 1;
        }

        self.ghr = ((self.ghr << 1) | u64::from(taken)) & INDEX_MASK;
    }
}
