//! Set-Associative Cache Simulator.
//!
//! This module implements a configurable set-associative cache that tracks
//! tags only, no data. Addresses are cache line numbers (the byte address
//! divided by the line size):
//! 1. **Indexing:** The low `log2(sets)` bits of the line address select the set, the rest form the tag.
//! 2. **Lookup:** `access` probes every way of the set and refreshes the LRU stamp on a hit.
//! 3. **Fill:** `install` asks the replacement policy for a way and reports what it displaced.
//!
//! A miss does not install by itself; the memory system decides when to fill
//! and what to do with a dirty victim.

/// Cache replacement policy implementations (LRU, Random, SWP, DWP).
pub mod policies;

use self::policies::{DwpPolicy, LruPolicy, RandomPolicy, ReplacementPolicy, SwpPolicy};
use crate::config::{MemSysConfig, ReplacementPolicy as PolicyType};
use crate::stats::CacheStats;

/// Cache line entry: tag, validity, dirty bit, owning core and LRU stamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Holds a line.
    pub valid: bool,
    /// Modified since it was filled, or touched by a second core.
    pub dirty: bool,
    /// Upper line-address bits.
    pub tag: u64,
    /// Core that last accessed the line.
    pub owner: usize,
    /// Cycle of the last access or fill.
    pub last_access: u64,
}

/// A line displaced by [`CacheSim::install`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eviction {
    /// Line address of the victim.
    pub line_addr: u64,
    /// The victim must be written back.
    pub dirty: bool,
}

/// Cache simulator implementing a set-associative cache with a pluggable policy.
#[derive(Debug)]
pub struct CacheSim {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    set_bits: u32,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates a new cache.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total capacity.
    /// * `ways` - Associativity.
    /// * `line_size` - Line size in bytes.
    /// * `policy` - Victim selection.
    ///
    /// Geometry is assumed validated; degenerate values are clamped to one set of one way.
    pub fn new(
        size_bytes: u64,
        ways: u64,
        line_size: u64,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Self {
        let ways = ways.max(1) as usize;
        let line_size = line_size.max(1);
        let num_sets = ((size_bytes / line_size) as usize / ways).max(1);
        Self {
            lines: vec![CacheLine::default(); num_sets * ways],
            num_sets,
            ways,
            set_bits: num_sets.trailing_zeros(),
            policy,
            stats: CacheStats::default(),
        }
    }

    /// Creates a cache whose policy is chosen by `kind`, with partitioning
    /// parameters taken from `config`.
    pub fn with_policy(
        size_bytes: u64,
        ways: u64,
        line_size: u64,
        kind: PolicyType,
        config: &MemSysConfig,
    ) -> Self {
        let policy: Box<dyn ReplacementPolicy> = match kind {
            PolicyType::Lru => Box::new(LruPolicy),
            PolicyType::Random => Box::new(RandomPolicy::new()),
            PolicyType::Swp => Box::new(SwpPolicy::new(config.swp_core0_ways as usize)),
            PolicyType::Dwp => Box::new(DwpPolicy::new(
                ways as usize,
                config.dwp_interval,
                config.dwp_step as usize,
            )),
        };
        Self::new(size_bytes, ways, line_size, policy)
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Access and eviction counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The ways of the set `line_addr` maps to.
    pub fn set(&self, line_addr: u64) -> &[CacheLine] {
        let base = self.index(line_addr) * self.ways;
        &self.lines[base..base + self.ways]
    }

    fn index(&self, line_addr: u64) -> usize {
        (line_addr & (self.num_sets as u64 - 1)) as usize
    }

    const fn tag(&self, line_addr: u64) -> u64 {
        line_addr >> self.set_bits
    }

    /// Returns true if the line is resident. Does not touch statistics or recency.
    pub fn contains(&self, line_addr: u64) -> bool {
        let tag = self.tag(line_addr);
        self.set(line_addr).iter().any(|l| l.valid && l.tag == tag)
    }

    /// Looks up a line on behalf of `core` at cycle `now`.
    ///
    /// A hit refreshes the line's stamp, marks it dirty on a write, and marks it
    /// dirty and changes owner when `core` is not the line's last user. A miss
    /// changes nothing but the counters.
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn access(&mut self, line_addr: u64, is_write: bool, core: usize, now: u64) -> bool {
        let tag = self.tag(line_addr);
        let base = self.index(line_addr) * self.ways;
        let hit = self.lines[base..base + self.ways]
            .iter_mut()
            .find(|l| l.valid && l.tag == tag)
            .map(|line| {
                line.last_access = now;
                if line.owner != core {
                    line.dirty = true;
                    line.owner = core;
                }
                if is_write {
                    line.dirty = true;
                }
            })
            .is_some();

        if is_write {
            self.stats.write_access += 1;
            self.stats.write_miss += u64::from(!hit);
        } else {
            self.stats.read_access += 1;
            self.stats.read_miss += u64::from(!hit);
        }
        self.policy.observe_access(core);
        hit
    }

    /// Fills `line_addr` into the way chosen by the replacement policy.
    ///
    /// # Returns
    ///
    /// The displaced line, if the chosen way held one.
    pub fn install(
        &mut self,
        line_addr: u64,
        is_write: bool,
        core: usize,
        now: u64,
    ) -> Option<Eviction> {
        let set_index = self.index(line_addr);
        let base = set_index * self.ways;
        let set = &mut self.lines[base..base + self.ways];
        let way = self.policy.get_victim(set, core).min(self.ways - 1);
        let victim = set[way];

        set[way] = CacheLine {
            valid: true,
            dirty: is_write,
            tag: line_addr >> self.set_bits,
            owner: core,
            last_access: now,
        };

        if !victim.valid {
            return None;
        }
        if victim.dirty {
            self.stats.dirty_evicts += 1;
        }
        Some(Eviction {
            line_addr: (victim.tag << self.set_bits) | set_index as u64,
            dirty: victim.dirty,
        })
    }
}
