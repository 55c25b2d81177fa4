//! Streaming trace readers.
//!
//! Both readers pull fixed-size records from any `Read` implementation and apply the
//! same framing discipline:
//! 1. **Clean End:** Zero bytes available at a record boundary ends the trace.
//! 2. **Truncation:** A partial record is a fatal `TraceFormat` error.
//! 3. **Range Checks:** An unknown operation or instruction type is a fatal `TraceFormat` error.

use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::TraceSource;
use super::mem::{MEM_RECORD_SIZE, MemTraceRecord};
use super::record::{OpType, RECORD_SIZE, TraceRecord};
use crate::common::error::{Result, SimError};

/// Byte-level framing shared by both record formats.
#[derive(Debug)]
struct Framer<R> {
    inner: R,
    name: PathBuf,
    offset: u64,
    records: u64,
    finished: bool,
}

impl<R: Read> Framer<R> {
    fn new(inner: R, name: PathBuf) -> Self {
        Self {
            inner,
            name,
            offset: 0,
            records: 0,
            finished: false,
        }
    }

    /// Fills `buf` completely.
    ///
    /// # Returns
    ///
    /// `Ok(false)` at a clean end of stream, `Ok(true)` when a full record was read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(source) => {
                    return Err(SimError::Io {
                        path: self.name.clone(),
                        source,
                    });
                }
            }
        }

        if filled == 0 {
            self.finished = true;
            debug!(
                trace = %self.name.display(),
                records = self.records,
                "end of trace"
            );
            return Ok(false);
        }
        if filled < buf.len() {
            self.finished = true;
            return Err(SimError::trace_format(
                self.offset,
                format!(
                    "truncated record: {filled} of {} bytes",
                    buf.len()
                ),
            ));
        }
        Ok(true)
    }

    /// Advances past a record that has been decoded successfully.
    fn commit(&mut self, size: usize) {
        self.offset += size as u64;
        self.records += 1;
    }
}

/// Reader for the 48-byte pipeline trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    framer: Framer<R>,
}

impl<R: Read> TraceReader<R> {
    /// Wraps an in-memory or already opened stream.
    pub fn new(inner: R) -> Self {
        Self::with_name(inner, "<stream>")
    }

    /// Wraps a stream and labels it with `name` in diagnostics.
    pub fn with_name(inner: R, name: impl AsRef<Path>) -> Self {
        Self {
            framer: Framer::new(inner, name.as_ref().to_path_buf()),
        }
    }

    /// Number of records decoded so far.
    pub fn records_read(&self) -> u64 {
        self.framer.records
    }

    /// Reads and decodes the next record.
    pub fn read_record(&mut self) -> Result<Option<TraceRecord>> {
        let mut buf = [0u8; RECORD_SIZE];
        if !self.framer.fill(&mut buf)? {
            return Ok(None);
        }
        match TraceRecord::decode(&buf) {
            Ok(rec) => {
                self.framer.commit(RECORD_SIZE);
                Ok(Some(rec))
            }
            Err(op) => {
                self.framer.finished = true;
                Err(SimError::trace_format(
                    self.framer.offset,
                    format!(
                        "op_type {op} out of range (expected < {})",
                        OpType::COUNT
                    ),
                ))
            }
        }
    }
}

impl<R: Read> TraceSource<TraceRecord> for TraceReader<R> {
    fn next_record(&mut self) -> Result<Option<TraceRecord>> {
        self.read_record()
    }
}

/// Reader for the packed 9-byte memory-system trace.
#[derive(Debug)]
pub struct MemTraceReader<R> {
    framer: Framer<R>,
}

impl<R: Read> MemTraceReader<R> {
    /// Wraps an in-memory or already opened stream.
    pub fn new(inner: R) -> Self {
        Self::with_name(inner, "<stream>")
    }

    /// Wraps a stream and labels it with `name` in diagnostics.
    pub fn with_name(inner: R, name: impl AsRef<Path>) -> Self {
        Self {
            framer: Framer::new(inner, name.as_ref().to_path_buf()),
        }
    }

    /// Reads and decodes the next record.
    pub fn read_record(&mut self) -> Result<Option<MemTraceRecord>> {
        let mut buf = [0u8; MEM_RECORD_SIZE];
        if !self.framer.fill(&mut buf)? {
            return Ok(None);
        }
        match MemTraceRecord::decode(&buf) {
            Ok(rec) => {
                self.framer.commit(MEM_RECORD_SIZE);
                Ok(Some(rec))
            }
            Err(kind) => {
                self.framer.finished = true;
                Err(SimError::trace_format(
                    self.framer.offset,
                    format!("instruction type {kind} out of range (expected < 4)"),
                ))
            }
        }
    }
}

impl<R: Read> TraceSource<MemTraceRecord> for MemTraceReader<R> {
    fn next_record(&mut self) -> Result<Option<MemTraceRecord>> {
        self.read_record()
    }
}
