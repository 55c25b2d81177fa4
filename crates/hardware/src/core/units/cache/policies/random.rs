//! Random Replacement Policy.
//!
//! This policy evicts a random cache line from the set once every way is
//! valid. It uses a xorshift generator with a fixed seed, so runs are
//! reproducible.

use super::ReplacementPolicy;
use crate::core::units::cache::CacheLine;

/// Initial xorshift state.
const SEED: u64 = 123456789;

/// Random Policy state.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    /// Internal state for the pseudo-random number generator.
    state: u64,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    pub const fn new() -> Self {
        Self { state: SEED }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Fills the first invalid way, else maps a pseudo-random number onto the set.
    fn get_victim(&mut self, set: &[CacheLine], _core: usize) -> usize {
        if let Some(free) = set.iter().position(|l| !l.valid) {
            return free;
        }
        (self.next() % set.len() as u64) as usize
    }
}
