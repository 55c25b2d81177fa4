//! # Reorder Buffer Tests
//!
//! Allocation, the reserved slot, wakeup and in-order commit.

use proptest::prelude::*;
use tracesim_core::common::reg::ArchReg;
use tracesim_core::core::pipeline::inst::{InstInfo, RobTag};
use tracesim_core::core::pipeline::rob::Rob;

fn inst(num: u64) -> InstInfo {
    InstInfo {
        inst_num: num,
        ..InstInfo::default()
    }
}

// ══════════════════════════════════════════════════════════
// 1. Allocation
// ══════════════════════════════════════════════════════════

/// A ring of `n` slots holds `n - 1` instructions.
#[test]
fn one_slot_stays_free() {
    let mut rob = Rob::new(4);
    for num in 1..=3 {
        assert!(rob.insert(inst(num)).is_some());
    }
    assert_eq!(rob.len(), 3);
    assert!(!rob.has_space());
    assert_eq!(rob.insert(inst(4)), None);
    assert_eq!(rob.len(), 3);
}

/// Tags wrap around with the ring.
#[test]
fn tags_are_reused_after_commit() {
    let mut rob = Rob::new(3);
    let first = inst(1);
    assert_eq!(rob.insert(first), Some(RobTag(0)));
    assert_eq!(rob.insert(inst(2)), Some(RobTag(1)));
    rob.mark_ready(&first);
    assert_eq!(rob.remove_head().map(|i| i.inst_num), Some(1));
    assert_eq!(rob.insert(inst(3)), Some(RobTag(2)));
    assert_eq!(rob.capacity(), 3);
}

// ══════════════════════════════════════════════════════════
// 2. Wakeup
// ══════════════════════════════════════════════════════════

/// A broadcast readies both operands waiting on the same producer.
#[test]
fn wakeup_readies_both_operands() {
    let mut rob = Rob::new(8);
    let producer = rob.insert(inst(1)).unwrap();
    let consumer = rob
        .insert(InstInfo {
            inst_num: 2,
            src1_reg: Some(ArchReg(3)),
            src1_tag: Some(producer),
            src2_reg: Some(ArchReg(3)),
            src2_tag: Some(producer),
            ..InstInfo::default()
        })
        .unwrap();

    assert!(!rob.entry(consumer).unwrap().inst.srcs_ready());
    rob.wakeup(producer);
    assert!(rob.entry(consumer).unwrap().inst.srcs_ready());
}

/// The producer's readiness is visible through its tag.
#[test]
fn check_ready_follows_mark_ready() {
    let mut rob = Rob::new(8);
    let producer = inst(1);
    let tag = rob.insert(producer).unwrap();
    assert!(!rob.check_ready(tag));
    rob.mark_ready(&producer);
    assert!(rob.check_ready(tag));
    assert!(rob.check_head());
}

// ══════════════════════════════════════════════════════════
// 3. Properties
// ══════════════════════════════════════════════════════════

proptest! {
    /// Whatever order instructions finish in, they leave in program order.
    #[test]
    fn commit_order_is_program_order(order in Just((1..=12u64).collect::<Vec<_>>()).prop_shuffle()) {
        let mut rob = Rob::new(16);
        for num in 1..=12 {
            prop_assert!(rob.insert(inst(num)).is_some());
        }

        let mut committed = Vec::new();
        for num in order {
            rob.mark_ready(&inst(num));
            while let Some(done) = rob.remove_head() {
                committed.push(done.inst_num);
            }
        }
        prop_assert_eq!(committed, (1..=12).collect::<Vec<_>>());
        prop_assert!(rob.is_empty());
    }

    /// Occupancy never exceeds capacity minus one.
    #[test]
    fn occupancy_is_bounded(capacity in 2usize..32, inserts in 0usize..64) {
        let mut rob = Rob::new(capacity);
        for num in 0..inserts {
            let _ = rob.insert(inst(num as u64 + 1));
        }
        prop_assert_eq!(rob.len(), inserts.min(capacity - 1));
    }
}
