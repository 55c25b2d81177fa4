//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors used by the in-order front end
//! and the [`BranchUnit`] that wraps the selected one with misprediction
//! accounting.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictor (always taken).
pub mod static_bp;

use self::{gshare::GSharePredictor, static_bp::AlwaysTakenPredictor};
use crate::config::BranchPredictorPolicy;
use crate::stats::BranchStats;

/// Enum wrapper for static dispatch of branch predictors.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// Always predicts taken.
    AlwaysTaken(AlwaysTakenPredictor),
    /// Global history predictor.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Creates the predictor for `policy`, or `None` for perfect prediction.
    pub fn new(policy: BranchPredictorPolicy) -> Option<Self> {
        match policy {
            BranchPredictorPolicy::Perfect => None,
            BranchPredictorPolicy::AlwaysTaken => Some(Self::AlwaysTaken(AlwaysTakenPredictor)),
            BranchPredictorPolicy::GShare => Some(Self::GShare(GSharePredictor::new())),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline]
    fn predict(&self, pc: u64) -> bool {
        match self {
            Self::AlwaysTaken(bp) => bp.predict(pc),
            Self::GShare(bp) => bp.predict(pc),
        }
    }

    #[inline]
    fn train(&mut self, pc: u64, taken: bool) {
        match self {
            Self::AlwaysTaken(bp) => bp.train(pc, taken),
            Self::GShare(bp) => bp.train(pc, taken),
        }
    }
}

/// A predictor plus the branch and misprediction counters.
#[derive(Clone, Debug)]
pub struct BranchUnit<P = BranchPredictorWrapper> {
    predictor: P,
    stats: BranchStats,
}

impl<P: BranchPredictor> BranchUnit<P> {
    /// Wraps `predictor` with zeroed counters.
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            stats: BranchStats::default(),
        }
    }

    /// Predicts the direction of the branch at `pc`.
    pub fn predict(&self, pc: u64) -> bool {
        self.predictor.predict(pc)
    }

    /// Counts the branch, counts a misprediction when `prediction != actual`,
    /// and trains the predictor with `actual`.
    pub fn update(&mut self, pc: u64, prediction: bool, actual: bool) {
        self.stats.branches += 1;
        if prediction != actual {
            self.stats.mispredicted += 1;
        }
        self.predictor.train(pc, actual);
    }

    /// Branch counters so far.
    pub fn stats(&self) -> &BranchStats {
        &self.stats
    }
}
