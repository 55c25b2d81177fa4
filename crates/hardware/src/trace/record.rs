//! Pipeline trace record.
//!
//! Each record is 48 bytes, little endian, with the following layout:
//!
//! | Offset | Size | Field         |
//! |--------|------|---------------|
//! | 0      | 8    | `inst_addr`   |
//! | 8      | 1    | `op_type`     |
//! | 9      | 1    | `dest_reg`    |
//! | 10     | 1    | `dest_needed` |
//! | 11     | 1    | `src1_reg`    |
//! | 12     | 1    | `src2_reg`    |
//! | 13     | 1    | `src1_needed` |
//! | 14     | 1    | `src2_needed` |
//! | 15     | 1    | `cc_read`     |
//! | 16     | 1    | `cc_write`    |
//! | 24     | 8    | `mem_addr`    |
//! | 32     | 1    | `mem_write`   |
//! | 33     | 1    | `mem_read`    |
//! | 34     | 1    | `br_dir`      |
//! | 40     | 8    | `br_target`   |
//!
//! Bytes not listed are padding and are ignored on decode and zeroed on encode.

use std::fmt;

use crate::common::reg::ArchReg;

/// Size in bytes of one pipeline trace record.
pub const RECORD_SIZE: usize = 48;

/// Operation class of a traced instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OpType {
    /// Integer or logical operation.
    #[default]
    Alu,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Conditional branch.
    CondBranch,
    /// Anything else (jumps, system instructions, no-ops).
    Other,
}

impl OpType {
    /// Number of operation classes.
    pub const COUNT: usize = 5;

    /// Every operation class, in encoding order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Alu,
        Self::Load,
        Self::Store,
        Self::CondBranch,
        Self::Other,
    ];

    /// Decodes the on-disk operation byte.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Alu),
            1 => Some(Self::Load),
            2 => Some(Self::Store),
            3 => Some(Self::CondBranch),
            4 => Some(Self::Other),
            _ => None,
        }
    }

    /// On-disk encoding, also the position in per-class tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Alu => 0,
            Self::Load => 1,
            Self::Store => 2,
            Self::CondBranch => 3,
            Self::Other => 4,
        }
    }

    /// Label used by the instruction mix report.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alu => "ALU",
            Self::Load => "LD",
            Self::Store => "ST",
            Self::CondBranch => "CBR",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One decoded instruction from a pipeline trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TraceRecord {
    /// Instruction address.
    pub inst_addr: u64,
    /// Operation class.
    pub op_type: OpType,
    /// Destination register, if the instruction writes one.
    pub dest: Option<ArchReg>,
    /// First source register, if read.
    pub src1: Option<ArchReg>,
    /// Second source register, if read.
    pub src2: Option<ArchReg>,
    /// Reads the condition codes.
    pub cc_read: bool,
    /// Writes the condition codes.
    pub cc_write: bool,
    /// Effective address of a load or store.
    pub mem_addr: u64,
    /// Writes memory.
    pub mem_write: bool,
    /// Reads memory.
    pub mem_read: bool,
    /// Actual direction of a conditional branch (true = taken).
    pub br_taken: bool,
    /// Branch target address.
    pub br_target: u64,
}

impl TraceRecord {
    /// Decodes one record.
    ///
    /// # Returns
    ///
    /// `Err(op)` carrying the raw operation byte when it is out of range.
    pub fn decode(buf: &[u8; RECORD_SIZE]) -> Result<Self, u8> {
        let op = buf[8];
        let op_type = OpType::from_u8(op).ok_or(op)?;
        Ok(Self {
            inst_addr: read_u64(buf, 0),
            op_type,
            dest: ArchReg::from_trace(buf[9], buf[10] != 0),
            src1: ArchReg::from_trace(buf[11], buf[13] != 0),
            src2: ArchReg::from_trace(buf[12], buf[14] != 0),
            cc_read: buf[15] != 0,
            cc_write: buf[16] != 0,
            mem_addr: read_u64(buf, 24),
            mem_write: buf[32] != 0,
            mem_read: buf[33] != 0,
            br_taken: buf[34] != 0,
            br_target: read_u64(buf, 40),
        })
    }

    /// Encodes the record in the on-disk layout.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[0..8].copy_from_slice(&self.inst_addr.to_le_bytes());
        buf[8] = self.op_type.index() as u8;
        if let Some(reg) = self.dest {
            buf[9] = reg.0;
            buf[10] = 1;
        }
        if let Some(reg) = self.src1 {
            buf[11] = reg.0;
            buf[13] = 1;
        }
        if let Some(reg) = self.src2 {
            buf[12] = reg.0;
            buf[14] = 1;
        }
        buf[15] = u8::from(self.cc_read);
        buf[16] = u8::from(self.cc_write);
        buf[24..32].copy_from_slice(&self.mem_addr.to_le_bytes());
        buf[32] = u8::from(self.mem_write);
        buf[33] = u8::from(self.mem_read);
        buf[34] = u8::from(self.br_taken);
        buf[40..48].copy_from_slice(&self.br_target.to_le_bytes());
        buf
    }

    /// Returns true for conditional branches.
    #[inline]
    pub fn is_cond_branch(&self) -> bool {
        self.op_type == OpType::CondBranch
    }
}

fn read_u64(buf: &[u8; RECORD_SIZE], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[at..at + 8]);
    u64::from_le_bytes(bytes)
}
