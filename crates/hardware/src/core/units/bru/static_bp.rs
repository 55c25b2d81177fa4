//! Static Branch Predictor.
//!
//! Implements an "Always Taken" policy. The predictor holds no state and
//! ignores training.

use super::BranchPredictor;

/// Stateless predictor that predicts every conditional branch taken.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysTakenPredictor;

impl BranchPredictor for AlwaysTakenPredictor {
    fn predict(&self, _pc: u64) -> bool {
        true
    }

    fn train(&mut self, _pc: u64, _taken: bool) {}
}
