//! Scheduling stage.
//!
//! Each lane walks the ROB from the head and dispatches at most one
//! instruction that is not yet executing:
//! - **In-order:** only the oldest non-executing instruction is a candidate. If its
//!   sources are not ready the lane dispatches nothing.
//! - **Out-of-order:** the oldest non-executing instruction with ready sources is
//!   dispatched, wherever it sits.

use crate::config::SchedPolicy;
use crate::core::pipeline::inst::InstInfo;
use crate::core::pipeline::rob::Rob;

/// Executes the scheduling stage, filling `sc_latch` lanes.
pub fn schedule_stage(rob: &mut Rob, sc_latch: &mut [Option<InstInfo>], policy: SchedPolicy) {
    for lane in sc_latch.iter_mut() {
        let Some(inst) = select(rob, policy) else {
            continue;
        };
        rob.mark_exec(&inst);
        *lane = Some(inst);
    }
}

/// Picks the instruction the next lane would dispatch.
pub fn select(rob: &Rob, policy: SchedPolicy) -> Option<InstInfo> {
    let mut waiting = rob.iter().filter(|e| !e.exec);
    match policy {
        SchedPolicy::InOrder => waiting.next().filter(|e| e.inst.srcs_ready()),
        SchedPolicy::OutOfOrder => waiting.find(|e| e.inst.srcs_ready()),
    }
    .map(|e| e.inst)
}
