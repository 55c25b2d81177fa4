//! # Register Alias Table Tests

use proptest::prelude::*;
use tracesim_core::common::reg::ArchReg;
use tracesim_core::core::pipeline::inst::RobTag;
use tracesim_core::core::pipeline::rat::Rat;

#[test]
fn fresh_table_has_no_aliases() {
    let rat = Rat::new();
    assert_eq!(rat.aliased_count(), 0);
    assert_eq!(rat.get_remap(ArchReg(0)), None);
    assert_eq!(rat.get_remap(ArchReg(255)), None);
}

/// Register numbers cover the whole byte.
#[test]
fn high_registers_are_tracked() {
    let mut rat = Rat::new();
    rat.set_remap(ArchReg(255), RobTag(9));
    assert_eq!(rat.get_remap(ArchReg(255)), Some(RobTag(9)));
    rat.reset(ArchReg(255));
    assert_eq!(rat.aliased_count(), 0);
}

proptest! {
    /// Each register names at most one producer: the last one written.
    #[test]
    fn last_write_wins(writes in proptest::collection::vec((any::<u8>(), 0u32..256), 1..64)) {
        let mut rat = Rat::new();
        for &(reg, tag) in &writes {
            rat.set_remap(ArchReg(reg), RobTag(tag));
        }
        for &(reg, _) in &writes {
            let last = writes.iter().rev().find(|(r, _)| *r == reg).map(|&(_, t)| RobTag(t));
            prop_assert_eq!(rat.get_remap(ArchReg(reg)), last);
        }
        let mut distinct: Vec<u8> = writes.iter().map(|&(r, _)| r).collect();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(rat.aliased_count(), distinct.len());
    }

    /// Releasing with a stale tag never clears a newer alias.
    #[test]
    fn stale_release_is_ignored(reg in any::<u8>(), old in 0u32..128, new in 128u32..256) {
        let mut rat = Rat::new();
        rat.set_remap(ArchReg(reg), RobTag(old));
        rat.set_remap(ArchReg(reg), RobTag(new));
        prop_assert!(!rat.release(ArchReg(reg), RobTag(old)));
        prop_assert_eq!(rat.get_remap(ArchReg(reg)), Some(RobTag(new)));
    }
}
