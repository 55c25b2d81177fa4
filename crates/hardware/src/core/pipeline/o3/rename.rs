//! Issue stage: ROB allocation and register renaming.
//!
//! Decoded instructions enter the ROB in sequence-number order. Sources are
//! renamed through the RAT before the destination alias is updated, so an
//! instruction that reads and writes the same register depends on the older
//! producer. When the ROB fills, the remaining instructions stay in their
//! decode lanes without side effects.

use crate::common::reg::ArchReg;
use crate::core::pipeline::inst::{InstInfo, RobTag};
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::rob::Rob;

/// Executes the issue stage.
pub fn issue_stage(id_latch: &mut [Option<InstInfo>], rob: &mut Rob, rat: &mut Rat) {
    let mut order: Vec<(u64, usize)> = id_latch
        .iter()
        .enumerate()
        .filter_map(|(lane, l)| l.map(|i| (i.inst_num, lane)))
        .collect();
    order.sort_unstable();

    for (_, lane) in order {
        if !rob.has_space() {
            break;
        }
        let Some(mut inst) = id_latch[lane] else {
            continue;
        };
        rename_sources(&mut inst, rob, rat);
        let Some(tag) = rob.insert(inst) else {
            break;
        };
        if let Some(dest) = inst.dest_reg {
            rat.set_remap(dest, tag);
        }
        id_latch[lane] = None;
    }
}

/// Resolves both source operands of `inst` against the current RAT.
///
/// A source aliased to an in-flight producer takes the producer's tag and its
/// current readiness, since the producer may already have written back.
pub fn rename_sources(inst: &mut InstInfo, rob: &Rob, rat: &Rat) {
    (inst.src1_tag, inst.src1_ready) = resolve(inst.src1_reg, rob, rat);
    (inst.src2_tag, inst.src2_ready) = resolve(inst.src2_reg, rob, rat);
}

fn resolve(reg: Option<ArchReg>, rob: &Rob, rat: &Rat) -> (Option<RobTag>, bool) {
    match reg.and_then(|r| rat.get_remap(r)) {
        Some(tag) => (Some(tag), rob.check_ready(tag)),
        None => (None, true),
    }
}
