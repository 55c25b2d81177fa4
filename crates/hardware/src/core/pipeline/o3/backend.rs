//! Execute, writeback and commit stages.

use tracing::debug;

use crate::common::constants::MAX_WRITEBACKS;
use crate::common::error::Result;
use crate::core::pipeline::exeq::Exeq;
use crate::core::pipeline::Sequencer;
use crate::core::pipeline::inst::InstInfo;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::rob::Rob;
use crate::stats::PipelineStats;

/// Executes the execute stage.
///
/// With a one-cycle load latency every operation passes straight through.
/// Otherwise all dispatched operations enter the EXEQ, which is then advanced
/// by a cycle and drained of every finished instruction, up to the writeback
/// fan-out limit.
///
/// # Errors
///
/// [`SimError::ExeqFull`](crate::common::error::SimError::ExeqFull) when a dispatched instruction finds no free slot.
pub fn exe_stage(
    sc_latch: &mut [Option<InstInfo>],
    exeq: &mut Exeq,
    ex_latch: &mut Vec<InstInfo>,
    load_latency: u64,
) -> Result<()> {
    if load_latency == 1 {
        ex_latch.extend(sc_latch.iter_mut().filter_map(Option::take));
        return Ok(());
    }

    for lane in sc_latch.iter_mut() {
        if let Some(inst) = lane.take() {
            exeq.insert(inst).inspect_err(|_| {
                debug!(inst_num = inst.inst_num, occupied = exeq.len(), "EXEQ overflow");
            })?;
        }
    }
    exeq.cycle();
    while ex_latch.len() < MAX_WRITEBACKS {
        match exeq.remove() {
            Some(inst) => ex_latch.push(inst),
            None => break,
        }
    }
    Ok(())
}

/// Executes the writeback stage: wake up consumers, then mark the producer ready.
pub fn writeback_stage(ex_latch: &mut Vec<InstInfo>, rob: &mut Rob) {
    for inst in ex_latch.drain(..) {
        if let Some(tag) = inst.dr_tag {
            rob.wakeup(tag);
        }
        rob.mark_ready(&inst);
    }
}

/// Executes the commit stage, retiring up to `width` ready instructions from the head.
pub fn commit_stage(
    rob: &mut Rob,
    rat: &mut Rat,
    width: usize,
    seq: &mut Sequencer,
    stats: &mut PipelineStats,
) {
    for _ in 0..width {
        let Some(inst) = rob.remove_head() else {
            break;
        };
        stats.record_retire(inst.op_type);
        if inst.inst_num >= seq.halt_inst_num {
            seq.halted = true;
        }
        if let (Some(dest), Some(tag)) = (inst.dest_reg, inst.dr_tag) {
            let _ = rat.release(dest, tag);
        }
    }
}
