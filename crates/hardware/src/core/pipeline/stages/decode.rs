//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Latch Transfer:** Copies every fetch lane into decode and clears its stall bit.
//! 2. **Hazard Check:** Stalls any lane whose operands are not yet available.
//! 3. **Program Order:** Stalls every lane younger than the oldest stalled one, so
//!    instructions never enter execute out of order.
//!
//! A stalled lane becomes a bubble in decode and its fetch latch keeps the
//! instruction for another try next cycle.

use tracing::trace;

use crate::core::pipeline::hazards::{self, Forwarding};
use crate::core::pipeline::latches::InOrderLatches;

/// Executes the instruction decode stage.
///
/// Lanes are checked in lane order against the decode row as it stands, so a
/// producer already stalled earlier in the same cycle no longer counts as a
/// same-cycle producer.
pub fn decode_stage(latches: &mut InOrderLatches, fwd: Forwarding) {
    let width = latches.width();
    for lane in 0..width {
        latches.id_latch[lane] = latches.if_latch[lane];
        latches.if_latch[lane].stall = false;
    }

    let mut oldest_stalled: Option<u64> = None;
    for lane in 0..width {
        if !hazards::must_stall(latches, lane, fwd) {
            continue;
        }
        let op_id = latches.id_latch[lane].op_id;
        trace!(op_id, lane, "decode stall");
        oldest_stalled = Some(oldest_stalled.map_or(op_id, |o| o.min(op_id)));
        latches.id_latch[lane].valid = false;
        latches.if_latch[lane].stall = true;
    }

    let Some(oldest) = oldest_stalled else {
        return;
    };
    for lane in 0..width {
        let id = &mut latches.id_latch[lane];
        if id.valid && id.op_id > oldest {
            id.valid = false;
            latches.if_latch[lane].stall = true;
        }
    }
}
