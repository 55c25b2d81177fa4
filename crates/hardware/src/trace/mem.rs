//! Memory-system trace record.
//!
//! Records are packed, little endian, 9 bytes each: `inst_addr` (u32), `inst_type` (u8)
//! and `ldst_addr` (u32). Every record costs one instruction fetch; loads and stores
//! additionally access `ldst_addr`.

/// Size in bytes of one memory-system trace record.
pub const MEM_RECORD_SIZE: usize = 9;

/// Instruction class in a memory-system trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MemInstType {
    /// Non-memory operation.
    #[default]
    Alu,
    /// Load from `ldst_addr`.
    Load,
    /// Store to `ldst_addr`.
    Store,
    /// Other non-memory operation.
    Other,
}

impl MemInstType {
    /// Decodes the on-disk type byte.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Alu),
            1 => Some(Self::Load),
            2 => Some(Self::Store),
            3 => Some(Self::Other),
            _ => None,
        }
    }

    /// On-disk encoding.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Alu => 0,
            Self::Load => 1,
            Self::Store => 2,
            Self::Other => 3,
        }
    }
}

/// One decoded record of a memory-system trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MemTraceRecord {
    /// Instruction address (fetched every record).
    pub inst_addr: u32,
    /// Instruction class.
    pub inst_type: MemInstType,
    /// Data address for loads and stores.
    pub ldst_addr: u32,
}

impl MemTraceRecord {
    /// Decodes one packed record, returning the raw type byte when it is out of range.
    pub fn decode(buf: &[u8; MEM_RECORD_SIZE]) -> Result<Self, u8> {
        let inst_type = MemInstType::from_u8(buf[4]).ok_or(buf[4])?;
        Ok(Self {
            inst_addr: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            inst_type,
            ldst_addr: u32::from_le_bytes([buf[5], buf[6], buf[7], buf[8]]),
        })
    }

    /// Encodes the record in the packed on-disk layout.
    pub fn encode(&self) -> [u8; MEM_RECORD_SIZE] {
        let mut buf = [0u8; MEM_RECORD_SIZE];
        buf[0..4].copy_from_slice(&self.inst_addr.to_le_bytes());
        buf[4] = self.inst_type.as_u8();
        buf[5..9].copy_from_slice(&self.ldst_addr.to_le_bytes());
        buf
    }
}
