//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements. The in-order front end asks for a prediction when it
//! fetches a conditional branch and trains the predictor immediately with the
//! traced outcome.

/// Trait for conditional branch direction predictors.
pub trait BranchPredictor {
    /// Predicts whether the branch at `pc` is taken.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    fn predict(&self, pc: u64) -> bool;

    /// Trains the predictor with the resolved direction of the branch at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    fn train(&mut self, pc: u64, taken: bool);
}
