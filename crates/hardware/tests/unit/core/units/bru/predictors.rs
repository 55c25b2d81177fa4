//! # Branch Predictor Tests

use rstest::rstest;
use tracesim_core::config::BranchPredictorPolicy;
use tracesim_core::core::units::bru::gshare::GSharePredictor;
use tracesim_core::core::units::bru::static_bp::AlwaysTakenPredictor;
use tracesim_core::core::units::bru::{BranchPredictor, BranchPredictorWrapper, BranchUnit};

#[test]
fn perfect_prediction_has_no_predictor() {
    assert!(BranchPredictorWrapper::new(BranchPredictorPolicy::Perfect).is_none());
}

#[rstest]
#[case(0x0)]
#[case(0x4000)]
#[case(u64::MAX)]
fn always_taken_ignores_training(#[case] pc: u64) {
    let mut bp = AlwaysTakenPredictor;
    for _ in 0..4 {
        bp.train(pc, false);
    }
    assert!(bp.predict(pc));
}

/// One not-taken outcome flips a weakly-taken counter.
#[test]
fn gshare_learns_not_taken() {
    let mut bp = GSharePredictor::new();
    bp.train(0x20, false);
    // History is still zero after a not-taken outcome.
    assert_eq!(bp.counter(0x20), 1);
    assert!(!bp.predict(0x20));
}

/// The same branch in a different history context uses another counter.
#[test]
fn gshare_history_changes_the_index() {
    let mut bp = GSharePredictor::new();
    bp.train(0x20, false);
    bp.train(0x20, false);
    assert_eq!(bp.counter(0x20), 0);

    bp.train(0x99, true);
    assert_eq!(bp.history(), 1);
    assert_eq!(bp.counter(0x20), 2);
    assert!(bp.predict(0x20));
}

#[test]
fn branch_unit_counts_mispredictions() {
    let mut unit = BranchUnit::new(
        BranchPredictorWrapper::new(BranchPredictorPolicy::AlwaysTaken).unwrap(),
    );
    for taken in [true, false, true, false, false] {
        let prediction = unit.predict(0x40);
        unit.update(0x40, prediction, taken);
    }
    assert_eq!(unit.stats().branches, 5);
    assert_eq!(unit.stats().mispredicted, 3);
    assert!((unit.stats().mispred_rate() - 60.0).abs() < 1e-9);
}

/// The unit trains its predictor with the actual outcome.
#[test]
fn branch_unit_trains_gshare() {
    let mut unit = BranchUnit::new(GSharePredictor::new());
    let first = unit.predict(0x0);
    unit.update(0x0, first, false);
    assert!(first);
    assert!(!unit.predict(0x0));
    assert_eq!(unit.stats().mispredicted, 1);
}
