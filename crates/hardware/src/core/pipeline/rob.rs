//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from issue
//! through commit. It provides:
//! 1. **Allocation:** Inserts at the tail and stamps the slot index into the instruction as its tag.
//! 2. **Execution Tracking:** Marks instructions as executing when scheduled and ready at writeback.
//! 3. **Wakeup:** Broadcasts a completed tag to every waiting source operand.
//! 4. **In-order Commit:** Retires instructions from the head in program order.
//!
//! Each entry moves through Free, Allocated, Executing and Ready before it is
//! removed. One slot is always kept free, so a buffer of `n` entries holds at
//! most `n - 1` instructions.

use tracing::warn;

use crate::core::pipeline::inst::{InstInfo, RobTag};
use crate::core::pipeline::ring::RingBuffer;

/// A single entry in the Reorder Buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RobEntry {
    /// The renamed instruction.
    pub inst: InstInfo,
    /// Dispatched to the execute stage.
    pub exec: bool,
    /// Finished executing; eligible to commit.
    pub ready: bool,
}

/// Reorder Buffer, a ring of in-flight instructions.
#[derive(Clone, Debug)]
pub struct Rob {
    ring: RingBuffer<RobEntry>,
}

impl Rob {
    /// Creates a new ROB with the given number of slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
        }
    }

    /// Returns the number of slots, including the reserved one.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns true if another instruction can be inserted.
    #[inline]
    pub fn has_space(&self) -> bool {
        self.ring.has_space()
    }

    /// Inserts an instruction at the tail and assigns its destination tag.
    ///
    /// # Returns
    ///
    /// The tag (slot index) of the new entry, or `None` without any change when full.
    pub fn insert(&mut self, mut inst: InstInfo) -> Option<RobTag> {
        if !self.ring.has_space() {
            return None;
        }
        let tag = RobTag(self.ring.tail() as u32);
        inst.dr_tag = Some(tag);
        let entry = RobEntry {
            inst,
            exec: false,
            ready: false,
        };
        self.ring.push(entry).ok().map(|_| tag)
    }

    /// Marks the entry holding `inst` as executing.
    pub fn mark_exec(&mut self, inst: &InstInfo) {
        match self.find_mut(inst.inst_num) {
            Some(entry) => entry.exec = true,
            None => warn!(inst_num = inst.inst_num, "mark_exec on instruction not in ROB"),
        }
    }

    /// Marks the entry holding `inst` as ready to commit.
    pub fn mark_ready(&mut self, inst: &InstInfo) {
        match self.find_mut(inst.inst_num) {
            Some(entry) => entry.ready = true,
            None => warn!(inst_num = inst.inst_num, "mark_ready on instruction not in ROB"),
        }
    }

    /// Returns true if the producer in slot `tag` has finished executing.
    pub fn check_ready(&self, tag: RobTag) -> bool {
        self.ring.get(tag.index()).is_some_and(|e| e.ready)
    }

    /// Returns true if the oldest entry is ready to commit.
    pub fn check_head(&self) -> bool {
        self.ring.front().is_some_and(|e| e.ready)
    }

    /// Removes the head entry if it is ready to commit.
    pub fn remove_head(&mut self) -> Option<InstInfo> {
        if !self.check_head() {
            return None;
        }
        self.ring.pop_front().map(|e| e.inst)
    }

    /// Wakes up every source operand waiting on `tag`.
    ///
    /// Operands that are already ready, or that wait on another producer, are untouched.
    pub fn wakeup(&mut self, tag: RobTag) {
        for (_, entry) in self.ring.iter_mut() {
            if entry.inst.src1_reg.is_some() && entry.inst.src1_tag == Some(tag) {
                entry.inst.src1_ready = true;
            }
            if entry.inst.src2_reg.is_some() && entry.inst.src2_tag == Some(tag) {
                entry.inst.src2_ready = true;
            }
        }
    }

    /// Entry in slot `tag`, if occupied.
    pub fn entry(&self, tag: RobTag) -> Option<&RobEntry> {
        self.ring.get(tag.index())
    }

    /// Mutable entry in slot `tag`, if occupied.
    pub fn entry_mut(&mut self, tag: RobTag) -> Option<&mut RobEntry> {
        self.ring.get_mut(tag.index())
    }

    /// Entries from oldest to youngest.
    pub fn iter(&self) -> impl Iterator<Item = &RobEntry> + '_ {
        self.ring.iter().map(|(_, e)| e)
    }

    /// Mutable entries from oldest to youngest.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RobEntry> + '_ {
        self.ring.iter_mut().map(|(_, e)| e)
    }

    fn find_mut(&mut self, inst_num: u64) -> Option<&mut RobEntry> {
        self.iter_mut().find(|e| e.inst.inst_num == inst_num)
    }
}
