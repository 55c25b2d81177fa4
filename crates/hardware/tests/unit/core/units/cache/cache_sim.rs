//! # Cache Simulator Tests
//!
//! Geometry, hit and miss accounting, and dirty evictions of `CacheSim`.

use tracesim_core::config::{MemSysConfig, ReplacementPolicy};
use tracesim_core::core::units::cache::policies::{LruPolicy, SwpPolicy};
use tracesim_core::core::units::cache::{CacheSim, Eviction};

/// 4 sets of 2 ways with 64-byte lines.
fn small_lru() -> CacheSim {
    CacheSim::new(512, 2, 64, Box::new(LruPolicy))
}

/// Probes and fills on a miss, the way the memory system does.
fn touch(cache: &mut CacheSim, line: u64, is_write: bool, core: usize, now: u64) -> Option<Eviction> {
    if cache.access(line, is_write, core, now) {
        None
    } else {
        cache.install(line, is_write, core, now)
    }
}

// ══════════════════════════════════════════════════════════
// 1. Geometry
// ══════════════════════════════════════════════════════════

#[test]
fn geometry_follows_size_and_ways() {
    let cache = CacheSim::new(32 * 1024, 8, 64, Box::new(LruPolicy));
    assert_eq!(cache.num_sets(), 64);
    assert_eq!(cache.ways(), 8);
}

/// Lines that differ only above the index bits share a set.
#[test]
fn set_index_uses_low_line_bits() {
    let mut cache = small_lru();
    let _ = touch(&mut cache, 0x1, false, 0, 1);
    let _ = touch(&mut cache, 0x5, false, 0, 2);
    let set = cache.set(0x9);
    assert!(set.iter().all(|l| l.valid));
    assert!(cache.set(0x2).iter().all(|l| !l.valid));
}

#[test]
fn policy_is_built_from_config() {
    let config = MemSysConfig::default();
    let mut cache = CacheSim::with_policy(512, 2, 64, ReplacementPolicy::Random, &config);
    assert!(touch(&mut cache, 0x0, false, 0, 1).is_none());
    assert!(cache.contains(0x0));
}

// ══════════════════════════════════════════════════════════
// 2. Accounting
// ══════════════════════════════════════════════════════════

/// A miss changes nothing but the counters.
#[test]
fn miss_does_not_fill() {
    let mut cache = small_lru();
    assert!(!cache.access(0x7, false, 0, 1));
    assert!(!cache.contains(0x7));
    assert_eq!(cache.stats().read_access, 1);
    assert_eq!(cache.stats().read_miss, 1);
}

#[test]
fn reads_and_writes_are_counted_apart() {
    let mut cache = small_lru();
    let _ = touch(&mut cache, 0x1, false, 0, 1);
    let _ = touch(&mut cache, 0x1, true, 0, 2);
    let _ = touch(&mut cache, 0x2, true, 0, 3);
    let stats = cache.stats();
    assert_eq!((stats.read_access, stats.read_miss), (1, 1));
    assert_eq!((stats.write_access, stats.write_miss), (2, 1));
    assert!((stats.write_miss_percent() - 50.0).abs() < 1e-9);
}

/// A write hit dirties the line, so its eviction is counted.
#[test]
fn write_hit_makes_victim_dirty() {
    let mut cache = small_lru();
    let _ = touch(&mut cache, 0x1, false, 0, 1);
    let _ = touch(&mut cache, 0x1, true, 0, 2);
    let _ = touch(&mut cache, 0x5, false, 0, 3);
    let evicted = touch(&mut cache, 0x9, false, 0, 4);
    assert_eq!(
        evicted,
        Some(Eviction {
            line_addr: 0x1,
            dirty: true
        })
    );
    assert_eq!(cache.stats().dirty_evicts, 1);
}

/// Clean victims are reported but not counted as dirty evictions.
#[test]
fn clean_victim_is_not_counted() {
    let mut cache = small_lru();
    let _ = touch(&mut cache, 0x1, false, 0, 1);
    let _ = touch(&mut cache, 0x5, false, 0, 2);
    let evicted = touch(&mut cache, 0x9, false, 0, 3).unwrap();
    assert!(!evicted.dirty);
    assert_eq!(cache.stats().dirty_evicts, 0);
}

// ══════════════════════════════════════════════════════════
// 3. Sharing
// ══════════════════════════════════════════════════════════

/// Under SWP a core hits on lines in the other core's partition.
#[test]
fn partition_does_not_restrict_hits() {
    let mut cache = CacheSim::new(512, 2, 64, Box::new(SwpPolicy::new(1)));
    let _ = touch(&mut cache, 0x1, false, 1, 1);
    assert!(cache.access(0x1, false, 0, 2));
    assert_eq!(cache.stats().read_miss, 1);
}

/// Core 1 fills only way 1, so it evicts its own line and leaves core 0's.
#[test]
fn partition_restricts_victims() {
    let mut cache = CacheSim::new(512, 2, 64, Box::new(SwpPolicy::new(1)));
    let _ = touch(&mut cache, 0x1, false, 0, 1);
    let _ = touch(&mut cache, 0x5, false, 1, 2);
    let evicted = touch(&mut cache, 0x9, false, 1, 3).unwrap();
    assert_eq!(evicted.line_addr, 0x5);
    assert!(cache.contains(0x1));
}
