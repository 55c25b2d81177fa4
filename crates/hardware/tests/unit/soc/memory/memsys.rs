//! # Memory System Tests
//!
//! Access delays through each hierarchy shape. L1 hits cost 1 cycle, L2 hits
//! 10 more and DRAM the rest.

use rstest::rstest;
use tracesim_core::common::AccessType;
use tracesim_core::config::{DramPolicy, MemSysConfig, MemSysMode};
use tracesim_core::soc::memory::memsys::translate;
use tracesim_core::{MemorySystem, SimError};

fn config(mode: MemSysMode) -> MemSysConfig {
    MemSysConfig {
        mode,
        ..MemSysConfig::default()
    }
}

/// Direct-mapped two-set L1 in front of the default L2.
fn config_with_small_l1() -> MemSysConfig {
    MemSysConfig {
        dcache_size: 128,
        dcache_assoc: 1,
        ..config(MemSysMode::TwoLevel)
    }
}

/// Direct-mapped two-set L1 and L2, so conflicts are easy to provoke.
fn tiny(mode: MemSysMode) -> MemSysConfig {
    MemSysConfig {
        mode,
        dcache_size: 128,
        dcache_assoc: 1,
        l2_size: 128,
        l2_assoc: 1,
        ..MemSysConfig::default()
    }
}

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(MemSysMode::Standalone, 2)]
#[case(MemSysMode::TwoLevelDram, 2)]
#[case(MemSysMode::MultiCore, 3)]
#[case(MemSysMode::MultiCore, 0)]
fn unsupported_core_counts_are_rejected(#[case] mode: MemSysMode, #[case] cores: usize) {
    assert!(matches!(
        MemorySystem::new(&config(mode), cores),
        Err(SimError::Config(_))
    ));
}

#[test]
fn multicore_mode_runs_a_single_core() {
    let sys = MemorySystem::new(&config(MemSysMode::MultiCore), 1).unwrap();
    assert_eq!(sys.cores(), 1);
}

#[rstest]
#[case(MemSysMode::Standalone, 1, &["DCACHE"])]
#[case(MemSysMode::TwoLevel, 1, &["ICACHE", "DCACHE", "L2CACHE"])]
#[case(MemSysMode::TwoLevelDram, 1, &["ICACHE", "DCACHE", "L2CACHE"])]
#[case(MemSysMode::MultiCore, 2, &["ICACHE_0", "DCACHE_0", "ICACHE_1", "DCACHE_1", "L2CACHE"])]
fn caches_are_labelled_per_mode(
    #[case] mode: MemSysMode,
    #[case] cores: usize,
    #[case] labels: &[&str],
) {
    let sys = MemorySystem::new(&config(mode), cores).unwrap();
    let found: Vec<String> = sys.cache_stats().into_iter().map(|(l, _)| l).collect();
    assert_eq!(found, labels);
    assert_eq!(sys.dram_stats().is_some(), mode != MemSysMode::Standalone);
}

// ══════════════════════════════════════════════════════════
// 2. Delays
// ══════════════════════════════════════════════════════════

/// Fetches bypass the data cache in standalone mode but are still counted.
#[test]
fn standalone_counts_fetches_without_caching_them() {
    let mut sys = MemorySystem::new(&config(MemSysMode::Standalone), 1).unwrap();
    assert_eq!(sys.access(0x0, AccessType::IFetch, 0, 0), 0);
    assert_eq!(sys.access(0x0, AccessType::Store, 0, 1), 0);
    let caches = sys.cache_stats();
    assert_eq!(caches[0].1.write_miss, 1);
    assert_eq!(caches[0].1.read_access, 0);
    assert_eq!(sys.stats().accesses(AccessType::IFetch), 1);
}

/// The first load misses everywhere; the second finds the bank in some state.
#[rstest]
#[case::row_hit(0x40, 66)]
#[case::row_conflict(0x4000, 156)]
fn open_page_delays(#[case] second: u64, #[case] delay: u64) {
    let mut sys = MemorySystem::new(&config(MemSysMode::TwoLevelDram), 1).unwrap();
    assert_eq!(sys.access(0x0, AccessType::Load, 0, 0), 111);
    assert_eq!(sys.access(second, AccessType::Load, 0, 1), delay);
}

#[test]
fn close_page_never_hits_the_row() {
    let mut sys = MemorySystem::new(
        &MemSysConfig {
            dram_policy: DramPolicy::ClosePage,
            ..config(MemSysMode::TwoLevelDram)
        },
        1,
    )
    .unwrap();
    assert_eq!(sys.access(0x0, AccessType::Load, 0, 0), 111);
    assert_eq!(sys.access(0x40, AccessType::Load, 0, 1), 111);
}

/// Instruction and data streams use separate L1s but share the L2.
#[test]
fn split_l1_shares_l2() {
    let mut sys = MemorySystem::new(&config(MemSysMode::TwoLevel), 1).unwrap();
    assert_eq!(sys.access(0x80, AccessType::IFetch, 0, 0), 111);
    assert_eq!(sys.access(0x80, AccessType::Load, 0, 1), 11);
    assert_eq!(sys.access(0x80, AccessType::IFetch, 0, 2), 1);
}

// ══════════════════════════════════════════════════════════
// 3. Write-Backs
// ══════════════════════════════════════════════════════════

/// A dirty L1 victim reaches the L2 without delaying the access that evicted it.
#[test]
fn l1_writeback_is_off_the_critical_path() {
    let mut sys = MemorySystem::new(&config_with_small_l1(), 1).unwrap();
    assert_eq!(sys.access(0x0, AccessType::Store, 0, 0), 111);
    assert_eq!(sys.access(0x80, AccessType::Load, 0, 1), 111);

    let caches = sys.cache_stats();
    let dcache = caches.iter().find(|(l, _)| l == "DCACHE").unwrap().1;
    let l2 = caches.iter().find(|(l, _)| l == "L2CACHE").unwrap().1;
    assert_eq!(dcache.dirty_evicts, 1);
    assert_eq!(l2.write_access, 1);
    assert_eq!(l2.write_miss, 0);

    // The written-back line is an L2 hit.
    assert_eq!(sys.access(0x0, AccessType::Load, 0, 2), 11);
}

/// A dirty L2 victim is written to DRAM.
#[test]
fn l2_writeback_reaches_dram() {
    let mut sys = MemorySystem::new(&tiny(MemSysMode::TwoLevel), 1).unwrap();
    let _ = sys.access(0x0, AccessType::Store, 0, 0);
    let _ = sys.access(0x80, AccessType::Load, 0, 1);
    assert_eq!(sys.access(0x100, AccessType::Load, 0, 2), 111);

    let dram = sys.dram_stats().copied().unwrap();
    assert_eq!(dram.read_access, 4);
    assert_eq!(dram.write_access, 1);
    assert_eq!(dram.write_delay, 100);
}

// ══════════════════════════════════════════════════════════
// 4. Multi-Core
// ══════════════════════════════════════════════════════════

#[test]
fn translation_keeps_page_offset() {
    let line = translate(0x1234_5678 / 64, 1, 64);
    assert_eq!(line * 64 % 4096, 0x678 & !63);
    assert_ne!(line, 0x1234_5678 / 64);
}

/// The same virtual line of two cores maps to two physical lines.
#[test]
fn cores_do_not_share_virtual_lines() {
    let mut sys = MemorySystem::new(&config(MemSysMode::MultiCore), 2).unwrap();
    let _ = sys.access(0x4000, AccessType::Load, 0, 0);
    let _ = sys.access(0x4000, AccessType::Load, 1, 0);
    let dram = sys.dram_stats().copied().unwrap();
    assert_eq!(dram.read_access, 2);
    assert_eq!(sys.access(0x4000, AccessType::Load, 1, 1), 1);
}
