//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the in-order pipeline. It retires
//! every valid instruction leaving MA, detects the end of the run, and lifts
//! the fetch block once a mispredicted branch leaves the pipeline.

use tracing::trace;

use crate::core::pipeline::Sequencer;
use crate::core::pipeline::latches::InOrderLatches;
use crate::stats::PipelineStats;

/// Executes the writeback stage of the pipeline.
///
/// The pipeline halts when the instruction carrying the halt sequence number
/// retires.
pub fn wb_stage(latches: &mut InOrderLatches, seq: &mut Sequencer, stats: &mut PipelineStats) {
    for lane in 0..latches.width() {
        let done = latches.ma_latch[lane];
        if !done.valid {
            continue;
        }
        stats.record_retire(done.rec.op_type);
        if done.op_id >= seq.halt_inst_num {
            seq.halted = true;
        }
        if done.rec.is_cond_branch() && done.is_mispred_cbr {
            trace!(op_id = done.op_id, "mispredicted branch retired, fetch resumes");
            for blocked in &mut latches.if_latch {
                blocked.fetch_blocked = false;
            }
        }
    }
}
