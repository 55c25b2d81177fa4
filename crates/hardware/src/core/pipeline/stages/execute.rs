//! Execute (EX) Stage.
//!
//! Every operation takes one cycle here; multi-cycle behavior is modelled by
//! the decode stage refusing to forward a load result out of EX.

use crate::core::pipeline::latches::InOrderLatches;

/// Executes the execute stage: every decode lane moves into EX, bubbles included.
pub fn execute_stage(latches: &mut InOrderLatches) {
    latches.ex_latch.copy_from_slice(&latches.id_latch);
}
