//! Register Alias Table (RAT).
//!
//! Maps each architectural register to the reorder buffer tag of its latest
//! in-flight producer, or `None` when the committed register file holds the
//! value. Only the newest producer is remembered; older aliases are simply
//! overwritten.

use crate::common::constants::NUM_ARCH_REGS;
use crate::common::reg::ArchReg;
use crate::core::pipeline::inst::RobTag;

/// Architectural-register to producer-tag map.
#[derive(Clone, Debug)]
pub struct Rat {
    entries: [Option<RobTag>; NUM_ARCH_REGS],
}

impl Default for Rat {
    fn default() -> Self {
        Self::new()
    }
}

impl Rat {
    /// Creates a table with every register unaliased.
    pub const fn new() -> Self {
        Self {
            entries: [None; NUM_ARCH_REGS],
        }
    }

    /// Latest in-flight producer of `reg`.
    #[inline]
    pub fn get_remap(&self, reg: ArchReg) -> Option<RobTag> {
        self.entries[reg.index()]
    }

    /// Records `tag` as the producer of `reg`, replacing any older alias.
    #[inline]
    pub fn set_remap(&mut self, reg: ArchReg, tag: RobTag) {
        self.entries[reg.index()] = Some(tag);
    }

    /// Clears the alias of `reg` unconditionally.
    #[inline]
    pub fn reset(&mut self, reg: ArchReg) {
        self.entries[reg.index()] = None;
    }

    /// Clears the alias of `reg` only while it still names `tag`.
    ///
    /// Commit uses this so that retiring an overwritten producer leaves the
    /// newer alias in place.
    ///
    /// # Returns
    ///
    /// `true` if the alias was cleared.
    pub fn release(&mut self, reg: ArchReg, tag: RobTag) -> bool {
        if self.get_remap(reg) == Some(tag) {
            self.reset(reg);
            true
        } else {
            false
        }
    }

    /// Number of registers currently aliased.
    pub fn aliased_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}
