//! Data Hazard Detection and Forwarding.
//!
//! This module decides whether an instruction in the decode latch may move on
//! to execute this cycle. It provides:
//! 1. **Producer Search:** Finds the youngest older instruction writing each source operand.
//! 2. **Forwarding Rules:** Decides whether that producer's result can be bypassed.
//! 3. **Superscalar Support:** Older instructions decoded in the same cycle are producers too.
//!
//! Only true (read-after-write) dependencies through registers and the condition
//! codes are tracked; trace replay has no values, so forwarding is a timing
//! question only.

use crate::core::pipeline::latches::{InOrderLatch, InOrderLatches, LatchKind};
use crate::trace::{OpType, TraceRecord};

/// Bypass paths enabled in the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Forwarding {
    /// MA to ID bypass.
    pub mem: bool,
    /// EX to ID bypass (never available for loads).
    pub exe: bool,
}

/// An operand an instruction reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// First source register.
    Src1,
    /// Second source register.
    Src2,
    /// Condition codes.
    Cc,
}

impl Operand {
    /// Every operand, in check order.
    pub const ALL: [Self; 3] = [Self::Src1, Self::Src2, Self::Cc];

    /// Returns true if `producer` writes what `consumer` reads through this operand.
    pub fn depends_on(self, consumer: &TraceRecord, producer: &TraceRecord) -> bool {
        match self {
            Self::Src1 => consumer.src1.is_some() && consumer.src1 == producer.dest,
            Self::Src2 => consumer.src2.is_some() && consumer.src2 == producer.dest,
            Self::Cc => consumer.cc_read && producer.cc_write,
        }
    }
}

/// The instruction an operand depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Producer {
    /// Latch row currently holding it.
    pub stage: LatchKind,
    /// Its sequence number.
    pub op_id: u64,
    /// Its operation class.
    pub op_type: OpType,
}

impl Producer {
    /// Returns true if the consumer must wait for this producer.
    ///
    /// A result in MA is bypassable with memory forwarding; a result in EX with
    /// execute forwarding unless it is still a pending load. A producer decoded
    /// in the same cycle has no result yet.
    pub fn blocks(&self, fwd: Forwarding) -> bool {
        match self.stage {
            LatchKind::Ma => !fwd.mem,
            LatchKind::Ex => !fwd.exe || self.op_type == OpType::Load,
            LatchKind::Id | LatchKind::If => true,
        }
    }
}

/// Finds the youngest instruction older than `consumer` that produces `operand`.
///
/// Candidates are every valid MA and EX latch plus the ID latches holding older
/// instructions.
pub fn youngest_producer(
    latches: &InOrderLatches,
    consumer: &InOrderLatch,
    operand: Operand,
) -> Option<Producer> {
    let mut youngest: Option<Producer> = None;
    for stage in [LatchKind::Ma, LatchKind::Ex, LatchKind::Id] {
        for cand in latches.row(stage) {
            if !cand.valid || !operand.depends_on(&consumer.rec, &cand.rec) {
                continue;
            }
            if stage == LatchKind::Id && cand.op_id >= consumer.op_id {
                continue;
            }
            if youngest.is_none_or(|y| cand.op_id > y.op_id) {
                youngest = Some(Producer {
                    stage,
                    op_id: cand.op_id,
                    op_type: cand.rec.op_type,
                });
            }
        }
    }
    youngest
}

/// Returns true if the instruction in decode lane `lane` must stall this cycle.
pub fn must_stall(latches: &InOrderLatches, lane: usize, fwd: Forwarding) -> bool {
    let consumer = latches.id_latch[lane];
    consumer.valid
        && Operand::ALL.iter().any(|&operand| {
            youngest_producer(latches, &consumer, operand).is_some_and(|p| p.blocks(fwd))
        })
}
