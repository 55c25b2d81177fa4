//! In-flight instruction state for the out-of-order engine.
//!
//! An `InstInfo` is created at fetch from a trace record, renamed at issue,
//! woken up at writeback and discarded at commit.

use crate::common::reg::ArchReg;
use crate::trace::{OpType, TraceRecord};

/// Identity of a reorder buffer slot, used as the physical register name.
///
/// The tag is the slot index, so comparing tags compares producers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobTag(pub u32);

impl RobTag {
    /// Slot index in the reorder buffer.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An instruction moving through the out-of-order pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InstInfo {
    /// Sequence number; defines program order. Starts at 1.
    pub inst_num: u64,
    /// Operation class.
    pub op_type: OpType,
    /// First source register.
    pub src1_reg: Option<ArchReg>,
    /// Second source register.
    pub src2_reg: Option<ArchReg>,
    /// Destination register.
    pub dest_reg: Option<ArchReg>,
    /// Producer of the first source, `None` when read from the register file.
    pub src1_tag: Option<RobTag>,
    /// Producer of the second source, `None` when read from the register file.
    pub src2_tag: Option<RobTag>,
    /// Own reorder buffer slot, assigned at issue.
    pub dr_tag: Option<RobTag>,
    /// First source value is available.
    pub src1_ready: bool,
    /// Second source value is available.
    pub src2_ready: bool,
    /// Cycles left in the execution queue.
    pub exe_wait_cycles: u64,
}

impl InstInfo {
    /// Builds an unrenamed instruction from a trace record.
    pub fn from_record(inst_num: u64, rec: &TraceRecord) -> Self {
        Self {
            inst_num,
            op_type: rec.op_type,
            src1_reg: rec.src1,
            src2_reg: rec.src2,
            dest_reg: rec.dest,
            ..Self::default()
        }
    }

    /// Both source operands are available.
    #[inline]
    pub const fn srcs_ready(&self) -> bool {
        self.src1_ready && self.src2_ready
    }
}
