//! Out-of-order pipeline.
//!
//! A trace-driven dynamic scheduler built from a register alias table, a reorder
//! buffer and an execution queue. Each cycle runs the stages in reverse order:
//! commit, writeback, execute, schedule, issue, decode, fetch. Running the
//! consumers first lets every stage read its input latch as it stood at the end
//! of the previous cycle, with no double buffering.
//!
//! Renaming removes WAR and WAW hazards, RAW hazards are tracked through ROB
//! tags, and the fixed-capacity ROB and EXEQ model structural limits.

/// Execute, writeback and commit stages.
pub mod backend;

/// Fetch and decode stages.
pub mod frontend;

/// Issue stage (ROB allocation and renaming).
pub mod rename;

/// Scheduling stage.
pub mod schedule;

use crate::common::constants::MAX_WRITEBACKS;
use crate::common::error::Result;
use crate::config::{OooConfig, SchedPolicy};
use crate::core::pipeline::engine::Engine;
use crate::core::pipeline::exeq::Exeq;
use crate::core::pipeline::inst::InstInfo;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::rob::Rob;
use crate::core::pipeline::Sequencer;
use crate::stats::PipelineStats;
use crate::trace::{TraceRecord, TraceSource};

/// Out-of-order pipeline replaying a trace from `S`.
#[derive(Debug)]
pub struct OooPipeline<S> {
    source: S,
    width: usize,
    load_latency: u64,
    policy: SchedPolicy,
    rob: Rob,
    rat: Rat,
    exeq: Exeq,
    fe_latch: Vec<Option<InstInfo>>,
    id_latch: Vec<Option<InstInfo>>,
    sc_latch: Vec<Option<InstInfo>>,
    ex_latch: Vec<InstInfo>,
    seq: Sequencer,
    stats: PipelineStats,
}

impl<S: TraceSource<TraceRecord>> OooPipeline<S> {
    /// Builds an idle pipeline.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`](crate::common::error::SimError::Config) for out-of-range settings.
    pub fn new(config: &OooConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            width: config.width,
            load_latency: config.load_latency,
            policy: config.sched_policy,
            rob: Rob::new(config.rob_entries),
            rat: Rat::new(),
            exeq: Exeq::new(config.exeq_entries, config.load_latency),
            fe_latch: vec![None; config.width],
            id_latch: vec![None; config.width],
            sc_latch: vec![None; config.width],
            ex_latch: Vec::with_capacity(MAX_WRITEBACKS),
            seq: Sequencer::default(),
            stats: PipelineStats::default(),
        })
    }

    /// Counters collected so far.
    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// The reorder buffer.
    pub fn rob(&self) -> &Rob {
        &self.rob
    }

    /// The register alias table.
    pub fn rat(&self) -> &Rat {
        &self.rat
    }

    /// The execution queue.
    pub fn exeq(&self) -> &Exeq {
        &self.exeq
    }

    /// Fetch latches, one per lane.
    pub fn fetch_latches(&self) -> &[Option<InstInfo>] {
        &self.fe_latch
    }

    /// Decode latches, one per lane.
    pub fn decode_latches(&self) -> &[Option<InstInfo>] {
        &self.id_latch
    }

    /// Sequence numbering state.
    pub fn sequencer(&self) -> &Sequencer {
        &self.seq
    }

    /// Gives back the trace source.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: TraceSource<TraceRecord>> Engine for OooPipeline<S> {
    fn cycle(&mut self) -> Result<()> {
        self.stats.cycles += 1;

        backend::commit_stage(
            &mut self.rob,
            &mut self.rat,
            self.width,
            &mut self.seq,
            &mut self.stats,
        );
        backend::writeback_stage(&mut self.ex_latch, &mut self.rob);
        backend::exe_stage(
            &mut self.sc_latch,
            &mut self.exeq,
            &mut self.ex_latch,
            self.load_latency,
        )?;
        schedule::schedule_stage(&mut self.rob, &mut self.sc_latch, self.policy);
        rename::issue_stage(&mut self.id_latch, &mut self.rob, &mut self.rat);
        frontend::decode_stage(&mut self.fe_latch, &mut self.id_latch, &mut self.seq);
        frontend::fetch_stage(
            &mut self.source,
            &mut self.fe_latch,
            &mut self.seq,
            self.stats.retired,
        )
    }

    fn is_halted(&self) -> bool {
        self.seq.halted
    }

    fn cycles(&self) -> u64 {
        self.stats.cycles
    }

    fn retired(&self) -> u64 {
        self.stats.retired
    }
}
