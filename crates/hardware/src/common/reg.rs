//! Architectural register identifiers.
//!
//! Trace records name registers with a raw byte plus a separate "needed" flag.
//! This module folds the pair into an `Option<ArchReg>` so that an unused operand
//! can never be confused with register zero.

use std::fmt;

/// Architectural register named by a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchReg(pub u8);

impl ArchReg {
    /// Combines a raw register byte with its "needed" flag.
    #[inline]
    pub const fn from_trace(reg: u8, needed: bool) -> Option<Self> {
        if needed { Some(Self(reg)) } else { None }
    }

    /// Index into per-register tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
