//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in set-associative caches.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, by access timestamp.
//! - `Random`: Seeded pseudo-random selection.
//! - `Swp`: Static way partitioning between two cores, LRU within a partition.
//! - `Dwp`: Dynamic way partitioning tuned by miss-rate hill climbing.
//!
//! Every policy fills an invalid way before it evicts a valid one.

/// Dynamic way partitioning.
pub mod dwp;

/// Least Recently Used replacement policy.
pub mod lru;

/// Static way partitioning.
pub mod partition;

/// Random replacement policy.
pub mod random;

use std::fmt::Debug;
use std::ops::Range;

pub use dwp::DwpPolicy;
pub use lru::LruPolicy;
pub use partition::{SwpPolicy, partition_for};
pub use random::RandomPolicy;

use super::CacheLine;

/// Trait for cache replacement policies.
///
/// Defines the interface for observing accesses and selecting victim lines.
pub trait ReplacementPolicy: Send + Sync + Debug {
    /// Notes an access by `core`, hit or miss.
    fn observe_access(&mut self, _core: usize) {}

    /// Selects the way to fill for a miss by `core`.
    ///
    /// # Arguments
    ///
    /// * `set` - Every way of the indexed set.
    /// * `core` - The requesting core.
    ///
    /// # Returns
    ///
    /// The index of the way to (re)fill. May be a valid line.
    fn get_victim(&mut self, set: &[CacheLine], core: usize) -> usize;
}

/// First invalid way in `ways`, else the least recently used one.
///
/// Ties on the timestamp go to the lowest way.
pub fn lru_victim(set: &[CacheLine], ways: Range<usize>) -> usize {
    let start = ways.start;
    if let Some(free) = ways.clone().find(|&w| !set[w].valid) {
        return free;
    }
    ways.min_by_key(|&w| set[w].last_access).unwrap_or(start)
}
