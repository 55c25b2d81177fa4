//! Memory access types.
//!
//! This module classifies requests presented to the memory system. The
//! classification drives:
//! 1. **Cache Selection:** Fetches go to the instruction cache, data accesses to the data cache.
//! 2. **Dirty Tracking:** Stores mark the touched line dirty.
//! 3. **Statistics:** Per-type access counts and average delays.

/// Type of memory access presented to the memory system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch.
    IFetch,

    /// Data load.
    Load,

    /// Data store. Stores never stall the issuing core.
    Store,
}

impl AccessType {
    /// Returns true if the access writes the target line.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Store)
    }

    /// Position of the access type in per-type statistic tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::IFetch => 0,
            Self::Load => 1,
            Self::Store => 2,
        }
    }

    /// Every access type, in statistics order.
    pub const ALL: [Self; 3] = [Self::IFetch, Self::Load, Self::Store];

    /// Upper-case label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::IFetch => "IFETCH",
            Self::Load => "LOAD",
            Self::Store => "STORE",
        }
    }
}
