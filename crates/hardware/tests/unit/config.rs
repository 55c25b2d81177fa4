//! # Configuration Tests
//!
//! Defaults, JSON loading, numeric command line selectors and validation.

use std::io::Write;

use rstest::rstest;
use tracesim_core::SimError;
use tracesim_core::config::*;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn ooo_defaults() {
    let ooo = OooConfig::default();
    assert_eq!(ooo.width, 1);
    assert_eq!(ooo.rob_entries, 32);
    assert_eq!(ooo.exeq_entries, 16);
    assert_eq!(ooo.load_latency, 4);
    assert_eq!(ooo.sched_policy, SchedPolicy::OutOfOrder);
}

#[test]
fn inorder_defaults() {
    let inorder = InOrderConfig::default();
    assert_eq!(inorder.width, 1);
    assert!(!inorder.enable_mem_fwd);
    assert!(!inorder.enable_exe_fwd);
    assert_eq!(inorder.bpred_policy, BranchPredictorPolicy::Perfect);
}

#[test]
fn memsys_defaults() {
    let memsys = MemSysConfig::default();
    assert_eq!(memsys.mode, MemSysMode::Standalone);
    assert_eq!(memsys.line_size, 64);
    assert_eq!(memsys.dcache_size, 32 * 1024);
    assert_eq!(memsys.dcache_assoc, 8);
    assert_eq!(memsys.l2_size, 1024 * 1024);
    assert_eq!(memsys.l2_assoc, 16);
    assert_eq!(memsys.swp_core0_ways, 0);
    assert_eq!(memsys.dram_policy, DramPolicy::OpenPage);
    assert_eq!(memsys.dwp_interval, 10_000);
    assert_eq!(memsys.dwp_step, 1);
}

#[test]
fn watchdog_defaults() {
    let watchdog = WatchdogConfig::default();
    assert_eq!(watchdog.window, 10_000);
    assert_eq!(watchdog.progress_interval, 500_000);
}

// ══════════════════════════════════════════════════════════
// 2. JSON
// ══════════════════════════════════════════════════════════

#[test]
fn empty_json_is_the_default_config() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.ooo.rob_entries, OooConfig::default().rob_entries);
    assert_eq!(config.memsys.mode, MemSysMode::Standalone);
}

#[test]
fn json_enums_use_variant_names() {
    let config = Config::from_json(
        r#"{
            "inorder": { "width": 2, "enable_exe_fwd": true, "bpred_policy": "GShare" },
            "memsys": { "mode": "TwoLevelDram", "dram_policy": "ClosePage", "repl": "RANDOM" }
        }"#,
    )
    .unwrap();
    assert_eq!(config.inorder.width, 2);
    assert!(config.inorder.enable_exe_fwd);
    assert_eq!(config.inorder.bpred_policy, BranchPredictorPolicy::GShare);
    assert_eq!(config.memsys.mode, MemSysMode::TwoLevelDram);
    assert_eq!(config.memsys.dram_policy, DramPolicy::ClosePage);
    assert_eq!(config.memsys.repl, ReplacementPolicy::Random);
}

#[test]
fn json_values_are_validated() {
    let err = Config::from_json(r#"{ "ooo": { "width": 9 } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn config_file_is_loaded_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "ooo": {{ "load_latency": 7 }} }}"#).unwrap();
    let config = Config::from_path(file.path()).unwrap();
    assert_eq!(config.ooo.load_latency, 7);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}

// ══════════════════════════════════════════════════════════
// 3. Numeric selectors
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0, ReplacementPolicy::Lru)]
#[case(1, ReplacementPolicy::Random)]
#[case(2, ReplacementPolicy::Swp)]
#[case(3, ReplacementPolicy::Dwp)]
fn replacement_selector(#[case] index: u32, #[case] expected: ReplacementPolicy) {
    assert_eq!(ReplacementPolicy::from_index(index).unwrap(), expected);
}

#[rstest]
#[case(1, MemSysMode::Standalone)]
#[case(2, MemSysMode::TwoLevel)]
#[case(3, MemSysMode::TwoLevelDram)]
#[case(4, MemSysMode::MultiCore)]
fn mode_selector_round_trips(#[case] index: u32, #[case] expected: MemSysMode) {
    let mode = MemSysMode::from_index(index).unwrap();
    assert_eq!(mode, expected);
    assert_eq!(mode.index(), index);
}

#[test]
fn out_of_range_selectors_are_config_errors() {
    assert!(SchedPolicy::from_index(2).is_err());
    assert!(BranchPredictorPolicy::from_index(3).is_err());
    assert!(ReplacementPolicy::from_index(4).is_err());
    assert!(MemSysMode::from_index(0).is_err());
    assert!(MemSysMode::from_index(5).is_err());
    assert!(DramPolicy::from_index(2).is_err());
}

// ══════════════════════════════════════════════════════════
// 4. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::zero_width(|c: &mut Config| c.ooo.width = 0)]
#[case::wide(|c: &mut Config| c.inorder.width = 9)]
#[case::tiny_rob(|c: &mut Config| c.ooo.rob_entries = 1)]
#[case::zero_latency(|c: &mut Config| c.ooo.load_latency = 0)]
#[case::line_size(|c: &mut Config| c.memsys.line_size = 48)]
#[case::l1_swp(|c: &mut Config| c.memsys.repl = ReplacementPolicy::Swp)]
#[case::zero_window(|c: &mut Config| c.watchdog.window = 0)]
fn invalid_settings_are_rejected(#[case] edit: fn(&mut Config)) {
    let mut config = Config::default();
    edit(&mut config);
    assert!(matches!(config.validate(), Err(SimError::Config(_))));
}

#[test]
fn swp_quota_must_leave_core_one_a_way() {
    let mut config = Config::default();
    config.memsys.mode = MemSysMode::MultiCore;
    config.memsys.l2_repl = ReplacementPolicy::Swp;
    config.memsys.swp_core0_ways = 16;
    assert!(config.validate().is_err());
    config.memsys.swp_core0_ways = 15;
    assert!(config.validate().is_ok());
}

#[test]
fn dwp_is_accepted_in_multicore_mode() {
    let mut config = Config::default();
    config.memsys.mode = MemSysMode::MultiCore;
    config.memsys.l2_repl = ReplacementPolicy::Dwp;
    assert!(config.validate().is_ok());
}
