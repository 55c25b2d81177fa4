//! In-order superscalar pipeline.
//!
//! A five-stage machine (IF, ID, EX, MA, WB) that moves up to `width`
//! instructions per stage per cycle. Data hazards stall in decode unless a
//! configured bypass can supply the operand. A mispredicted conditional branch
//! blocks fetch until it retires, charging the full pipeline depth as penalty.

use crate::common::error::Result;
use crate::config::InOrderConfig;
use crate::core::pipeline::Sequencer;
use crate::core::pipeline::engine::Engine;
use crate::core::pipeline::hazards::Forwarding;
use crate::core::pipeline::latches::InOrderLatches;
use crate::core::pipeline::stages;
use crate::core::units::bru::{BranchPredictorWrapper, BranchUnit};
use crate::stats::{BranchStats, PipelineStats};
use crate::trace::{TraceRecord, TraceSource};

/// In-order pipeline replaying a trace from `S`.
#[derive(Debug)]
pub struct InOrderPipeline<S> {
    source: S,
    fwd: Forwarding,
    latches: InOrderLatches,
    bpred: Option<BranchUnit>,
    seq: Sequencer,
    stats: PipelineStats,
}

impl<S: TraceSource<TraceRecord>> InOrderPipeline<S> {
    /// Builds an idle pipeline.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`](crate::common::error::SimError::Config) for out-of-range settings.
    pub fn new(config: &InOrderConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            fwd: Forwarding {
                mem: config.enable_mem_fwd,
                exe: config.enable_exe_fwd,
            },
            latches: InOrderLatches::new(config.width),
            bpred: BranchPredictorWrapper::new(config.bpred_policy).map(BranchUnit::new),
            seq: Sequencer::default(),
            stats: PipelineStats::default(),
        })
    }

    /// Counters collected so far.
    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Branch counters, or `None` under perfect prediction.
    pub fn branch_stats(&self) -> Option<&BranchStats> {
        self.bpred.as_ref().map(BranchUnit::stats)
    }

    /// The pipeline latches.
    pub fn latches(&self) -> &InOrderLatches {
        &self.latches
    }

    /// Sequence numbering state.
    pub fn sequencer(&self) -> &Sequencer {
        &self.seq
    }
}

impl<S: TraceSource<TraceRecord>> Engine for InOrderPipeline<S> {
    fn cycle(&mut self) -> Result<()> {
        self.stats.cycles += 1;

        stages::wb_stage(&mut self.latches, &mut self.seq, &mut self.stats);
        stages::mem_stage(&mut self.latches);
        stages::execute_stage(&mut self.latches);
        stages::decode_stage(&mut self.latches, self.fwd);
        stages::fetch_stage(
            &mut self.source,
            &mut self.latches,
            &mut self.seq,
            self.bpred.as_mut(),
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
