//! Instruction pipeline implementation.
//!
//! This module contains the two trace-driven pipelines and the structures they
//! are built from. It includes the following components:
//! 1. **Engine:** The common cycle-stepping interface driven by the simulator.
//! 2. **Out-of-Order:** Rename table, reorder buffer, execution queue and the `o3` stages.
//! 3. **In-Order:** Superscalar latches, hazard and forwarding logic, and the five stages.

/// Cycle-stepping interface shared by all pipelines.
pub mod engine;

/// Execution queue for multi-cycle operations.
pub mod exeq;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// In-order superscalar pipeline.
pub mod inorder;

/// Per-instruction state carried through the out-of-order pipeline.
pub mod inst;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MA, MA/WB).
pub mod latches;

/// Out-of-order pipeline.
pub mod o3;

/// Register alias table.
pub mod rat;

/// Fixed-capacity circular buffer.
pub mod ring;

/// Reorder buffer.
pub mod rob;

/// In-order pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Sequence numbering and end-of-trace bookkeeping shared by both pipelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequencer {
    /// Sequence number given to the most recently fetched instruction.
    pub last_inst_num: u64,
    /// Next sequence number decode will accept.
    pub next_inst_num: u64,
    /// Sequence number of the final instruction, known once the trace ends.
    pub halt_inst_num: u64,
    /// Set once the final instruction has retired.
    pub halted: bool,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self {
            last_inst_num: 0,
            next_inst_num: 1,
            halt_inst_num: u64::MAX,
            halted: false,
        }
    }
}
