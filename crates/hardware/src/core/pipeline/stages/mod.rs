//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! in-order superscalar pipeline. It includes:
//! 1. **Fetch:** Pulls trace records into free lanes and predicts conditional branches.
//! 2. **Decode:** Checks operands against in-flight producers and stalls lanes.
//! 3. **Execute:** Latches decoded instructions into the EX row.
//! 4. **Memory:** Latches executed instructions into the MA row.
//! 5. **Writeback:** Retires instructions and releases a mispredict fetch block.
//!
//! The pipeline calls the stages in reverse order, so each stage sees the latch
//! it consumes as the previous stage left it at the end of the last cycle.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
