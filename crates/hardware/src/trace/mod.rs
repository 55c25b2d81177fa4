//! Trace input.
//!
//! Every simulator in the crate replays a pre-recorded instruction trace. This module provides:
//! 1. **Pipeline Records:** The 48-byte record consumed by the in-order and out-of-order pipelines.
//! 2. **Memory Records:** The packed 9-byte record consumed by the memory-system cores.
//! 3. **Readers:** Streaming decoders over any `std::io::Read` with strict framing checks.
//! 4. **Sources:** The `TraceSource` seam through which engines pull records.

/// Memory-system trace format.
pub mod mem;

/// Streaming readers for both trace formats.
pub mod reader;

/// Pipeline trace record layout.
pub mod record;

use std::collections::VecDeque;

use crate::common::error::Result;

pub use mem::{MemInstType, MemTraceRecord};
pub use reader::{MemTraceReader, TraceReader};
pub use record::{OpType, TraceRecord};

/// A finite stream of decoded trace records.
///
/// `Ok(None)` marks a clean end of trace. Once a source has returned `Ok(None)`
/// it keeps doing so.
pub trait TraceSource<T> {
    /// Returns the next record, `Ok(None)` at end of trace.
    fn next_record(&mut self) -> Result<Option<T>>;
}

/// In-memory source, used by tests and by callers that synthesize traces.
impl<T> TraceSource<T> for VecDeque<T> {
    fn next_record(&mut self) -> Result<Option<T>> {
        Ok(self.pop_front())
    }
}

impl<T, S: TraceSource<T> + ?Sized> TraceSource<T> for Box<S> {
    fn next_record(&mut self) -> Result<Option<T>> {
        (**self).next_record()
    }
}
