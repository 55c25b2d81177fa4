//! Pipeline latch structures for the in-order superscalar pipeline.
//!
//! Each stage boundary (IF, ID, EX, MA) holds one latch per lane. A latch
//! carries the trace record of the instruction in that lane plus the control
//! bits the hazard and branch logic attach to it:
//! 1. **Validity:** An invalid latch is a bubble.
//! 2. **Stall:** Set on an IF latch to hold its instruction for another cycle.
//! 3. **Misprediction:** Marks a mispredicted conditional branch.
//! 4. **Fetch Block:** Set on an IF latch while a mispredicted branch is in flight.

use crate::trace::TraceRecord;

/// One lane of an in-order pipeline latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InOrderLatch {
    /// Holds a real instruction (false = bubble).
    pub valid: bool,
    /// Hold the lane's instruction; the next fetch into this lane is skipped.
    pub stall: bool,
    /// The instruction is a conditional branch whose direction was mispredicted.
    pub is_mispred_cbr: bool,
    /// The lane fetches bubbles until the mispredicted branch retires.
    pub fetch_blocked: bool,
    /// Sequence number of the instruction, starting at 1.
    pub op_id: u64,
    /// The traced instruction.
    pub rec: TraceRecord,
}

impl InOrderLatch {
    /// A latch holding `rec` as instruction number `op_id`.
    pub fn holding(op_id: u64, rec: TraceRecord) -> Self {
        Self {
            valid: true,
            op_id,
            rec,
            ..Self::default()
        }
    }
}

/// Pipeline boundary a latch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LatchKind {
    /// Fetch to decode.
    If,
    /// Decode to execute.
    Id,
    /// Execute to memory access.
    Ex,
    /// Memory access to writeback.
    Ma,
}

/// The four latch rows of the in-order pipeline, `width` lanes each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InOrderLatches {
    /// IF/ID.
    pub if_latch: Vec<InOrderLatch>,
    /// ID/EX.
    pub id_latch: Vec<InOrderLatch>,
    /// EX/MA.
    pub ex_latch: Vec<InOrderLatch>,
    /// MA/WB.
    pub ma_latch: Vec<InOrderLatch>,
}

impl InOrderLatches {
    /// Empty latches for `width` lanes.
    pub fn new(width: usize) -> Self {
        Self {
            if_latch: vec![InOrderLatch::default(); width],
            id_latch: vec![InOrderLatch::default(); width],
            ex_latch: vec![InOrderLatch::default(); width],
            ma_latch: vec![InOrderLatch::default(); width],
        }
    }

    /// Number of lanes.
    pub fn width(&self) -> usize {
        self.if_latch.len()
    }

    /// The latch row for `kind`.
    pub fn row(&self, kind: LatchKind) -> &[InOrderLatch] {
        match kind {
            LatchKind::If => &self.if_latch,
            LatchKind::Id => &self.id_latch,
            LatchKind::Ex => &self.ex_latch,
            LatchKind::Ma => &self.ma_latch,
        }
    }

    /// Valid instructions in flight past fetch.
    pub fn in_flight(&self) -> usize {
        [&self.id_latch, &self.ex_latch, &self.ma_latch]
            .iter()
            .flat_map(|row| row.iter())
            .filter(|l| l.valid)
            .count()
    }
}
