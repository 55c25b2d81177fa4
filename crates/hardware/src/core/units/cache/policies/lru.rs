//! Least Recently Used (LRU) Replacement Policy.
//!
//! Every line carries the cycle of its last access; the victim is the line
//! with the oldest stamp. Hits refresh the stamp in the cache itself, so the
//! policy holds no state of its own.
//!
//! # Performance
//!
//! - **Time Complexity:** `get_victim()` is O(W) where W is the associativity
//! - **Space Complexity:** O(1) beyond the per-line timestamp
//! - **Best Case:** Working sets with good temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{ReplacementPolicy, lru_victim};
use crate::core::units::cache::CacheLine;

/// LRU Policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn get_victim(&mut self, set: &[CacheLine], _core: usize) -> usize {
        lru_victim(set, 0..set.len())
    }
}
