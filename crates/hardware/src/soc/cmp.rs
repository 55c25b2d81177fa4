//! Chip multiprocessor (CMP) driver for the memory-system simulator.
//!
//! Each [`MemCore`] replays a memory trace through the shared [`MemorySystem`]:
//! 1. **Fetch:** Every instruction performs an instruction fetch.
//! 2. **Data:** Loads and stores add a data access; stores never stall the core.
//! 3. **Stalls:** A fetch or load slower than one cycle puts the core to sleep
//!    for the extra cycles, during which it issues nothing.
//!
//! [`CmpSimulator`] steps every core once per cycle until all traces are done.

use tracing::{debug, info};

use crate::common::data::AccessType;
use crate::common::error::Result;
use crate::soc::memory::memsys::MemorySystem;
use crate::stats::{CoreStats, MemSysReport};
use crate::trace::{MemInstType, MemTraceRecord, TraceSource};

/// One trace-driven core.
#[derive(Debug)]
pub struct MemCore<S> {
    id: usize,
    source: S,
    current: Option<MemTraceRecord>,
    inst_count: u64,
    snooze_end: u64,
    stats: CoreStats,
}

impl<S: TraceSource<MemTraceRecord>> MemCore<S> {
    /// Creates core `id` and reads its first record.
    ///
    /// An empty trace yields a core that is done from cycle 0.
    ///
    /// # Errors
    ///
    /// Propagates trace decoding failures.
    pub fn new(id: usize, mut source: S) -> Result<Self> {
        let current = source.next_record()?;
        Ok(Self {
            id,
            source,
            current,
            inst_count: 0,
            snooze_end: 0,
            stats: CoreStats {
                done: current.is_none(),
                ..CoreStats::default()
            },
        })
    }

    /// Core id.
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Returns true once the trace is exhausted.
    pub const fn is_done(&self) -> bool {
        self.stats.done
    }

    /// Final counters; meaningful once the core is done.
    pub const fn stats(&self) -> &CoreStats {
        &self.stats
    }

    /// Executes at most one instruction at cycle `now`.
    ///
    /// # Errors
    ///
    /// Propagates trace decoding failures.
    pub fn cycle(&mut self, memsys: &mut MemorySystem, now: u64) -> Result<()> {
        if self.stats.done || now <= self.snooze_end {
            return Ok(());
        }
        let Some(rec) = self.current else {
            return Ok(());
        };

        self.inst_count += 1;
        let mut bubbles = 0;

        let fetch = memsys.access(u64::from(rec.inst_addr), AccessType::IFetch, self.id, now);
        bubbles += fetch.saturating_sub(1);

        match rec.inst_type {
            MemInstType::Load => {
                let load = memsys.access(u64::from(rec.ldst_addr), AccessType::Load, self.id, now);
                bubbles += load.saturating_sub(1);
            }
            MemInstType::Store => {
                let _ = memsys.access(u64::from(rec.ldst_addr), AccessType::Store, self.id, now);
            }
            MemInstType::Alu | MemInstType::Other => {}
        }

        if bubbles > 0 {
            self.snooze_end = now + bubbles;
        }

        self.current = self.source.next_record()?;
        if self.current.is_none() {
            debug!(core = self.id, insts = self.inst_count, cycle = now, "core done");
            self.stats.done = true;
            self.stats.inst = self.inst_count;
            self.stats.cycles = now;
        }
        Ok(())
    }
}

/// Drives one or more cores against a shared memory system.
#[derive(Debug)]
pub struct CmpSimulator<S> {
    cores: Vec<MemCore<S>>,
    memsys: MemorySystem,
    cycle: u64,
    progress_interval: u64,
}

impl<S: TraceSource<MemTraceRecord>> CmpSimulator<S> {
    /// Wraps `memsys` and one core per trace source, numbered in order.
    ///
    /// # Errors
    ///
    /// Propagates failures reading the first record of a trace.
    pub fn new(memsys: MemorySystem, sources: Vec<S>, progress_interval: u64) -> Result<Self> {
        let cores = sources
            .into_iter()
            .enumerate()
            .map(|(id, source)| MemCore::new(id, source))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            cores,
            memsys,
            cycle: 0,
            progress_interval: progress_interval.max(1),
        })
    }

    /// Runs until every core has finished its trace.
    ///
    /// # Returns
    ///
    /// The total number of cycles simulated.
    ///
    /// # Errors
    ///
    /// Propagates trace decoding failures.
    pub fn run(&mut self) -> Result<u64> {
        loop {
            let mut all_done = true;
            for core in &mut self.cores {
                core.cycle(&mut self.memsys, self.cycle)?;
                all_done &= core.is_done();
            }
            if self.cycle > 0 && self.cycle % self.progress_interval == 0 {
                let insts: u64 = self.cores.iter().map(|c| c.inst_count).sum();
                info!(cycle = self.cycle, insts, "memsys progress");
            }
            self.cycle += 1;
            if all_done {
                return Ok(self.cycle);
            }
        }
    }

    /// Cycles simulated so far.
    pub const fn cycles(&self) -> u64 {
        self.cycle
    }

    /// The cores, in id order.
    pub fn cores(&self) -> &[MemCore<S>] {
        &self.cores
    }

    /// The memory system.
    pub const fn memsys(&self) -> &MemorySystem {
        &self.memsys
    }

    /// Snapshot of every counter, ready to print.
    pub fn report(&self) -> MemSysReport {
        MemSysReport {
            cycles: self.cycle,
            cores: self.cores.iter().map(|c| *c.stats()).collect(),
            memsys: *self.memsys.stats(),
            caches: self
                .memsys
                .cache_stats()
                .into_iter()
                .map(|(label, stats)| (label, *stats))
                .collect(),
            dram: self.memsys.dram_stats().copied(),
        }
    }
}
