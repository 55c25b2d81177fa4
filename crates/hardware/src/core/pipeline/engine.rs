//! Cycle-stepped engine interface.
//!
//! Both pipelines implement [`Engine`] so that a single driver can step them,
//! watch their retirement progress and stop them when they halt.

use crate::common::error::Result;

/// A pipeline that advances one clock cycle at a time.
pub trait Engine {
    /// Simulates one cycle of every stage, in reverse pipeline order.
    ///
    /// # Errors
    ///
    /// Trace decoding failures and fatal resource exhaustion.
    fn cycle(&mut self) -> Result<()>;

    /// Returns true once every fetched instruction has retired after end of trace.
    fn is_halted(&self) -> bool;

    /// Cycles simulated so far.
    fn cycles(&self) -> u64;

    /// Instructions retired so far.
    fn retired(&self) -> u64;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn cycle(&mut self) -> Result<()> {
        (**self).cycle()
    }

    fn is_halted(&self) -> bool {
        (**self).is_halted()
    }

    fn cycles(&self) -> u64 {
        (**self).cycles()
    }

    fn retired(&self) -> u64 {
        (**self).retired()
    }
}
