//! Fetch and decode stages.
//!
//! Fetch fills every empty lane with the next trace record and numbers it.
//! Decode moves fetched instructions into empty decode lanes strictly in
//! sequence-number order, since fetch lanes may fill out of order once the
//! backend applies back-pressure.

use tracing::debug;

use crate::common::error::Result;
use crate::core::pipeline::Sequencer;
use crate::core::pipeline::inst::InstInfo;
use crate::trace::{TraceRecord, TraceSource};

/// Executes the fetch stage.
///
/// At end of trace the last sequence number becomes the halt point; if everything
/// up to it has already retired the pipeline halts immediately.
///
/// # Errors
///
/// Propagates trace decoding failures.
pub fn fetch_stage<S: TraceSource<TraceRecord>>(
    source: &mut S,
    fe_latch: &mut [Option<InstInfo>],
    seq: &mut Sequencer,
    retired: u64,
) -> Result<()> {
    for lane in fe_latch.iter_mut().filter(|l| l.is_none()) {
        match source.next_record()? {
            Some(rec) => {
                seq.last_inst_num += 1;
                *lane = Some(InstInfo::from_record(seq.last_inst_num, &rec));
            }
            None => {
                if seq.halt_inst_num != seq.last_inst_num {
                    debug!(last = seq.last_inst_num, "trace exhausted");
                }
                seq.halt_inst_num = seq.last_inst_num;
                if retired >= seq.halt_inst_num {
                    seq.halted = true;
                }
            }
        }
    }
    Ok(())
}

/// Executes the decode stage.
pub fn decode_stage(
    fe_latch: &mut [Option<InstInfo>],
    id_latch: &mut [Option<InstInfo>],
    seq: &mut Sequencer,
) {
    for slot in id_latch.iter_mut().filter(|l| l.is_none()) {
        let next = fe_latch
            .iter_mut()
            .find(|l| l.is_some_and(|i| i.inst_num == seq.next_inst_num));
        match next {
            Some(lane) => {
                *slot = lane.take();
                seq.next_inst_num += 1;
            }
            None => break,
        }
    }
}
