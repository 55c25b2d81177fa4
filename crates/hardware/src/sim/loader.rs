//! Trace file loading.
//!
//! Opens trace files on disk and wraps them in the buffered streaming readers.
//! A file that cannot be opened is a startup failure reported with its path.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::common::error::{Result, SimError};
use crate::trace::{MemTraceReader, TraceReader};

/// Buffered file reader.
pub type FileReader = BufReader<File>;

fn open(path: &Path) -> Result<FileReader> {
    let file = File::open(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(trace = %path.display(), "opened trace");
    Ok(BufReader::new(file))
}

/// Opens a 48-byte pipeline trace.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be opened.
pub fn open_trace(path: &Path) -> Result<TraceReader<FileReader>> {
    Ok(TraceReader::with_name(open(path)?, path))
}

/// Opens a 9-byte memory-system trace.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be opened.
pub fn open_mem_trace(path: &Path) -> Result<MemTraceReader<FileReader>> {
    Ok(MemTraceReader::with_name(open(path)?, path))
}
