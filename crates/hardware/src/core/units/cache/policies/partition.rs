//! Static Way Partitioning (SWP).
//!
//! Splits every set of a shared cache between two cores: core 0 may only
//! evict from ways `[0, quota)` and core 1 from `[quota, ways)`. Hits are not
//! restricted, so a core may still hit on a line living in the other
//! partition. A quota of zero disables partitioning.

use std::ops::Range;

use super::{ReplacementPolicy, lru_victim};
use crate::core::units::cache::CacheLine;

/// Ways `core` may evict from when core 0 owns the first `core0_ways`.
pub fn partition_for(core: usize, core0_ways: usize, ways: usize) -> Range<usize> {
    if core == 0 { 0..core0_ways } else { core0_ways..ways }
}

/// SWP Policy state.
#[derive(Clone, Copy, Debug)]
pub struct SwpPolicy {
    core0_ways: usize,
}

impl SwpPolicy {
    /// Creates a policy giving core 0 `core0_ways` ways of every set.
    pub const fn new(core0_ways: usize) -> Self {
        Self { core0_ways }
    }
}

impl ReplacementPolicy for SwpPolicy {
    fn get_victim(&mut self, set: &[CacheLine], core: usize) -> usize {
        let ways = if self.core0_ways == 0 {
            0..set.len()
        } else {
            partition_for(core, self.core0_ways, set.len())
        };
        lru_victim(set, ways)
    }
}
