//! Execution units and functional components.
//!
//! This module contains the units the pipelines and the memory system are
//! assembled from: the branch prediction unit and the set-associative cache
//! with its replacement policies.

/// Branch prediction unit: direction predictors and misprediction accounting.
pub mod bru;

/// Set-associative cache with LRU, random and way-partitioning replacement.
pub mod cache;
