//! Memory Access (MA) Stage.
//!
//! Memory latency is not modelled by the in-order pipeline; loads and stores
//! spend exactly one cycle here like every other operation.

use crate::core::pipeline::latches::InOrderLatches;

/// Executes the memory stage: every EX lane moves into MA, bubbles included.
pub fn mem_stage(latches: &mut InOrderLatches) {
    latches.ma_latch.copy_from_slice(&latches.ex_latch);
}
