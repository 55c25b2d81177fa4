//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the in-order pipeline. It performs the following:
//! 1. **Stall Handling:** Leaves a stalled lane's instruction in place.
//! 2. **Mispredict Blocking:** Fetches bubbles on lanes blocked by an unresolved mispredict.
//! 3. **Trace Consumption:** Numbers each new record and detects the end of the trace.
//! 4. **Branch Prediction:** Predicts conditional branches and blocks every lane on a miss.

use tracing::{debug, trace};

use crate::common::error::Result;
use crate::core::pipeline::Sequencer;
use crate::core::pipeline::latches::{InOrderLatch, InOrderLatches};
use crate::core::units::bru::BranchUnit;
use crate::trace::{TraceRecord, TraceSource};

/// Executes the instruction fetch stage.
///
/// Without a branch unit prediction is perfect and fetch never blocks. At end of
/// trace the last sequence number becomes the halt point; if everything up to
/// it has already retired the pipeline halts at once.
///
/// # Errors
///
/// Propagates trace decoding failures.
pub fn fetch_stage<S: TraceSource<TraceRecord>>(
    source: &mut S,
    latches: &mut InOrderLatches,
    seq: &mut Sequencer,
    mut bpred: Option<&mut BranchUnit>,
    retired: u64,
) -> Result<()> {
    for lane in 0..latches.width() {
        let current = latches.if_latch[lane];
        if current.stall {
            continue;
        }

        if current.fetch_blocked {
            latches.if_latch[lane] = InOrderLatch {
                valid: false,
                ..current
            };
            continue;
        }

        let Some(rec) = source.next_record()? else {
            if seq.halt_inst_num != seq.last_inst_num {
                debug!(last = seq.last_inst_num, "trace exhausted");
            }
            seq.halt_inst_num = seq.last_inst_num;
            if retired >= seq.halt_inst_num {
                seq.halted = true;
            }
            latches.if_latch[lane] = InOrderLatch::default();
            continue;
        };

        seq.last_inst_num += 1;
        let mut fetched = InOrderLatch::holding(seq.last_inst_num, rec);
        if rec.is_cond_branch()
            && let Some(bp) = bpred.as_deref_mut()
        {
            let prediction = bp.predict(rec.inst_addr);
            if prediction != rec.br_taken {
                trace!(op_id = fetched.op_id, pc = rec.inst_addr, "branch mispredicted");
                fetched.is_mispred_cbr = true;
                fetched.fetch_blocked = true;
                for other in &mut latches.if_latch {
                    other.fetch_blocked = true;
                }
            }
            bp.update(rec.inst_addr, prediction, rec.br_taken);
        }
        latches.if_latch[lane] = fetched;
    }
    Ok(())
}
