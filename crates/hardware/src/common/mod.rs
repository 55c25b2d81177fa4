//! Common utilities and types shared by every simulator in the crate.
//!
//! This module provides the fundamental building blocks used across components:
//! 1. **Constants:** Hardware limits and memory timing.
//! 2. **Memory Access:** Classification of fetch, load and store requests.
//! 3. **Error Handling:** The crate-wide `SimError` and `Result` alias.
//! 4. **Registers:** Typed architectural register identifiers.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

/// Architectural register identifiers.
pub mod reg;

pub use data::AccessType;
pub use error::{Result, SimError};
pub use reg::ArchReg;
