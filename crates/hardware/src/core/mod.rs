//! Core processor models.
//!
//! This module contains the two trace-driven pipelines and the units they
//! share with the memory system.

/// Instruction pipelines (out-of-order and in-order superscalar).
pub mod pipeline;

/// Functional units (branch prediction, caches).
pub mod units;
