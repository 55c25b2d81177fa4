//! Dynamic Way Partitioning (DWP).
//!
//! Like static partitioning, but the boundary between the two cores moves at
//! run time. The policy counts accesses and misses per core; once both cores
//! have missed, it re-evaluates the boundary every `interval` accesses:
//! 1. **Metric:** The sum of both cores' miss rates since the start of the run.
//! 2. **Hill Climbing:** If the metric improved since the last evaluation, keep
//!    moving the boundary in the direction of the last move (towards core 0
//!    after a standstill); if it got worse, reverse (towards core 1 after a
//!    standstill); if it is unchanged, stay.
//! 3. **Clamping:** Each core always keeps at least one way.

use tracing::debug;

use super::partition::partition_for;
use super::{ReplacementPolicy, lru_victim};
use crate::core::units::cache::CacheLine;

/// DWP Policy state.
#[derive(Clone, Debug)]
pub struct DwpPolicy {
    ways: usize,
    interval: u64,
    step: usize,
    /// Ways owned by core 0.
    boundary: usize,
    prior_boundary: usize,
    prior_metric: f64,
    evaluations: u64,
    accesses: [u64; 2],
    misses: [u64; 2],
}

impl DwpPolicy {
    /// Creates a policy for a cache with `ways` ways, starting from an even split.
    ///
    /// # Arguments
    ///
    /// * `ways` - Associativity of the cache (at least 2).
    /// * `interval` - Accesses between two evaluations.
    /// * `step` - Ways the boundary moves per evaluation.
    pub fn new(ways: usize, interval: u64, step: usize) -> Self {
        let boundary = ways / 2;
        Self {
            ways,
            interval,
            step,
            boundary,
            prior_boundary: boundary,
            prior_metric: 0.0,
            evaluations: 0,
            accesses: [0; 2],
            misses: [0; 2],
        }
    }

    /// Ways currently owned by core 0.
    pub const fn boundary(&self) -> usize {
        self.boundary
    }

    fn metric(&self) -> f64 {
        (0..2)
            .map(|c| {
                if self.accesses[c] == 0 {
                    0.0
                } else {
                    self.misses[c] as f64 / self.accesses[c] as f64
                }
            })
            .sum()
    }

    fn evaluate(&mut self) {
        let total = self.accesses[0] + self.accesses[1];
        if total <= self.evaluations * self.interval {
            return;
        }
        self.evaluations += 1;

        let metric = self.metric();
        let moved_down = self.boundary < self.prior_boundary;
        let go_up = if metric > self.prior_metric {
            Some(moved_down)
        } else if metric < self.prior_metric {
            Some(!moved_down)
        } else {
            None
        };

        self.prior_boundary = self.boundary;
        self.prior_metric = metric;
        if let Some(up) = go_up {
            let next = if up {
                self.boundary.saturating_add(self.step)
            } else {
                self.boundary.saturating_sub(self.step)
            };
            self.boundary = next.clamp(1, self.ways.saturating_sub(1).max(1));
            if self.boundary != self.prior_boundary {
                debug!(
                    from = self.prior_boundary,
                    to = self.boundary,
                    metric,
                    "way partition moved"
                );
            }
        }
    }
}

impl ReplacementPolicy for DwpPolicy {
    fn observe_access(&mut self, core: usize) {
        if let Some(n) = self.accesses.get_mut(core) {
            *n += 1;
        }
    }

    fn get_victim(&mut self, set: &[CacheLine], core: usize) -> usize {
        if let Some(n) = self.misses.get_mut(core) {
            *n += 1;
        }
        if self.misses.iter().all(|&m| m > 0) {
            self.evaluate();
        }
        lru_victim(set, partition_for(core, self.boundary, set.len()))
    }
}
