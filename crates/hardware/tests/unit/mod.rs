//! # Unit Components
//!
//! Tests organized by the source module they exercise.


/// Configuration parsing, defaults and validation.
pub mod config;
