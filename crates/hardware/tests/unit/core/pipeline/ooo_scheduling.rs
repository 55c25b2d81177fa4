//! # Out-of-Order Pipeline Tests
//!
//! End-to-end timing of short traces through the out-of-order pipeline.
//! With one lane and the default load latency of 4 a lone ALU operation
//! takes 7 cycles: fetch, decode, issue, schedule, execute, writeback and
//! commit.

use pretty_assertions::assert_eq;
use tracesim_core::config::{OooConfig, SchedPolicy, WatchdogConfig};
use tracesim_core::stats::PipelineStats;
use tracesim_core::trace::OpType;
use tracesim_core::{Engine, OooPipeline, SimError, Simulator};

use crate::common::builders::TraceBuilder;

fn config(sched_policy: SchedPolicy) -> OooConfig {
    OooConfig {
        sched_policy,
        ..OooConfig::default()
    }
}

fn run(config: &OooConfig, trace: TraceBuilder) -> PipelineStats {
    let engine = OooPipeline::new(config, trace.build()).unwrap();
    let mut sim = Simulator::new(engine, &WatchdogConfig::default());
    let _ = sim.run().unwrap();
    sim.engine.stats().clone()
}

/// Two loads, each followed by a consumer of its result.
fn load_use_pairs() -> TraceBuilder {
    TraceBuilder::new()
        .load(1, 0x100)
        .alu(Some(2), Some(1), None)
        .load(3, 0x140)
        .alu(Some(4), Some(3), None)
}

// ══════════════════════════════════════════════════════════
// 1. Basic Timing
// ══════════════════════════════════════════════════════════

/// An empty trace halts on the first cycle.
#[test]
fn empty_trace_halts_immediately() {
    let stats = run(&OooConfig::default(), TraceBuilder::new());
    assert_eq!(stats.retired, 0);
    assert_eq!(stats.cycles, 1);
}

#[test]
fn single_alu_takes_seven_cycles() {
    let stats = run(&OooConfig::default(), TraceBuilder::new().independent(1));
    assert_eq!(stats.retired, 1);
    assert_eq!(stats.cycles, 7);
}

/// Independent instructions overlap fully.
#[test]
fn independent_pair_overlaps() {
    let stats = run(&OooConfig::default(), TraceBuilder::new().independent(2));
    assert_eq!(stats.cycles, 8);
}

/// A consumer dispatches in the cycle its producer writes back.
#[test]
fn dependent_pair_waits_for_wakeup() {
    let trace = TraceBuilder::new()
        .alu(Some(1), None, None)
        .alu(Some(2), Some(1), None);
    let stats = run(&OooConfig::default(), trace);
    assert_eq!(stats.retired, 2);
    assert_eq!(stats.cycles, 9);
}

/// An instruction reading and writing the same register waits for the older producer.
#[test]
fn self_overwrite_depends_on_older_producer() {
    let trace = TraceBuilder::new()
        .alu(Some(1), None, None)
        .alu(Some(1), Some(1), None);
    let stats = run(&OooConfig::default(), trace);
    assert_eq!(stats.cycles, 9);
}

// ══════════════════════════════════════════════════════════
// 2. Scheduling Policies
// ══════════════════════════════════════════════════════════

/// The second load slips past the stalled consumer of the first.
#[test]
fn out_of_order_hides_load_latency() {
    let stats = run(&config(SchedPolicy::OutOfOrder), load_use_pairs());
    assert_eq!(stats.retired, 4);
    assert_eq!(stats.cycles, 14);
}

/// In-order dispatch serializes the two load-use chains.
#[test]
fn in_order_dispatch_serializes_chains() {
    let stats = run(&config(SchedPolicy::InOrder), load_use_pairs());
    assert_eq!(stats.retired, 4);
    assert_eq!(stats.cycles, 18);
}

#[test]
fn instruction_mix_is_counted_at_retire() {
    let stats = run(&OooConfig::default(), load_use_pairs().store(4, 0x180));
    assert_eq!(stats.mix.count(OpType::Load), 2);
    assert_eq!(stats.mix.count(OpType::Alu), 2);
    assert_eq!(stats.mix.count(OpType::Store), 1);
    assert_eq!(stats.mix.total(), stats.retired);
}

/// Commit never outruns the pipeline width.
#[test]
fn wide_pipeline_retires_faster() {
    let narrow = run(&OooConfig::default(), TraceBuilder::new().independent(16));
    let wide = run(
        &OooConfig {
            width: 4,
            ..OooConfig::default()
        },
        TraceBuilder::new().independent(16),
    );
    assert_eq!(wide.retired, 16);
    assert!(wide.cycles < narrow.cycles);
    assert!(wide.cpi() >= 0.25);
}

// ══════════════════════════════════════════════════════════
// 3. Structural Limits
// ══════════════════════════════════════════════════════════

/// The ROB never holds more than its capacity minus one.
#[test]
fn rob_occupancy_respects_capacity() {
    let config = OooConfig {
        rob_entries: 4,
        ..OooConfig::default()
    };
    let mut pipe = OooPipeline::new(&config, TraceBuilder::new().independent(32).build()).unwrap();
    while !pipe.is_halted() {
        pipe.cycle().unwrap();
        assert!(pipe.rob().len() <= 3);
    }
    assert_eq!(pipe.stats().retired, 32);
    assert_eq!(pipe.rat().aliased_count(), 0);
}

/// Two loads dispatched in one cycle overflow a single-slot EXEQ.
#[test]
fn exeq_overflow_is_fatal() {
    let config = OooConfig {
        width: 2,
        exeq_entries: 1,
        load_latency: 10,
        ..OooConfig::default()
    };
    let trace = TraceBuilder::new().load(1, 0x100).load(2, 0x200);
    let engine = OooPipeline::new(&config, trace.build()).unwrap();
    let mut sim = Simulator::new(engine, &WatchdogConfig::default());
    assert!(matches!(sim.run(), Err(SimError::ExeqFull { capacity: 1 })));
}

/// With unit load latency the EXEQ is bypassed entirely.
#[test]
fn unit_latency_skips_exeq() {
    let config = OooConfig {
        width: 2,
        exeq_entries: 1,
        load_latency: 1,
        ..OooConfig::default()
    };
    let trace = TraceBuilder::new().load(1, 0x100).load(2, 0x200);
    let stats = run(&config, trace);
    assert_eq!(stats.retired, 2);
}

#[test]
fn invalid_config_is_rejected() {
    let config = OooConfig {
        rob_entries: 0,
        ..OooConfig::default()
    };
    let result = OooPipeline::new(&config, TraceBuilder::new().build());
    assert!(matches!(result, Err(SimError::Config(_))));
}
