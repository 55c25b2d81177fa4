//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the three simulators. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived CPI.
//! 2. **Instruction mix:** Retired instruction counts by operation class.
//! 3. **Branch prediction:** Conditional branches seen and mispredicted.
//! 4. **Memory hierarchy:** Per-cache access, miss and dirty-eviction counts,
//!    DRAM access delays and per-access-type memory-system delays.
//! 5. **Reports:** Plain-text key/value reports printed through `Display`.
//!
//! Every ratio with a zero denominator reports 0.

use std::fmt;

use crate::common::data::AccessType;
use crate::trace::OpType;

/// Returns `num / den`, or 0 when `den` is zero.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Retired instruction counts by operation class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstMix {
    counts: [u64; OpType::COUNT],
}

impl InstMix {
    /// Counts one retired instruction of class `op`.
    pub const fn record(&mut self, op: OpType) {
        self.counts[op.index()] += 1;
    }

    /// Instructions of class `op`.
    pub const fn count(&self, op: OpType) -> u64 {
        self.counts[op.index()]
    }

    /// Sum over every class.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of class `op` in percent of all counted instructions.
    pub fn percent(&self, op: OpType) -> f64 {
        100.0 * ratio(self.count(op), self.total())
    }
}

/// Cycle and retirement counters of one pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Cycles simulated.
    pub cycles: u64,
    /// Instructions retired.
    pub retired: u64,
    /// Retired instructions by class.
    pub mix: InstMix,
}

impl PipelineStats {
    /// Counts one retired instruction.
    pub const fn record_retire(&mut self, op: OpType) {
        self.retired += 1;
        self.mix.record(op);
    }

    /// Cycles per retired instruction.
    pub fn cpi(&self) -> f64 {
        ratio(self.cycles, self.retired)
    }
}

/// Branch predictor accuracy counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchStats {
    /// Conditional branches predicted.
    pub branches: u64,
    /// Predictions whose direction was wrong.
    pub mispredicted: u64,
}

impl BranchStats {
    /// Misprediction rate in percent.
    pub fn mispred_rate(&self) -> f64 {
        100.0 * ratio(self.mispredicted, self.branches)
    }
}

/// Counters of one cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Read lookups.
    pub read_access: u64,
    /// Write lookups.
    pub write_access: u64,
    /// Read lookups that missed.
    pub read_miss: u64,
    /// Write lookups that missed.
    pub write_miss: u64,
    /// Fills that displaced a dirty line.
    pub dirty_evicts: u64,
}

impl CacheStats {
    /// Read miss rate in percent.
    pub fn read_miss_percent(&self) -> f64 {
        100.0 * ratio(self.read_miss, self.read_access)
    }

    /// Write miss rate in percent.
    pub fn write_miss_percent(&self) -> f64 {
        100.0 * ratio(self.write_miss, self.write_access)
    }
}

/// DRAM access counters and accumulated delays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DramStats {
    /// Line reads.
    pub read_access: u64,
    /// Line write-backs.
    pub write_access: u64,
    /// Cycles spent on reads.
    pub read_delay: u64,
    /// Cycles spent on write-backs.
    pub write_delay: u64,
}

impl DramStats {
    /// Mean read delay in cycles.
    pub fn avg_read_delay(&self) -> f64 {
        ratio(self.read_delay, self.read_access)
    }

    /// Mean write delay in cycles.
    pub fn avg_write_delay(&self) -> f64 {
        ratio(self.write_delay, self.write_access)
    }
}

/// Memory-system accesses and delays by access type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemSysStats {
    accesses: [u64; 3],
    delays: [u64; 3],
}

impl MemSysStats {
    /// Counts one access of `kind` that took `delay` cycles.
    pub const fn record(&mut self, kind: AccessType, delay: u64) {
        self.accesses[kind.index()] += 1;
        self.delays[kind.index()] += delay;
    }

    /// Accesses of `kind`.
    pub const fn accesses(&self, kind: AccessType) -> u64 {
        self.accesses[kind.index()]
    }

    /// Mean delay of `kind` in cycles.
    pub fn avg_delay(&self, kind: AccessType) -> f64 {
        ratio(self.delays[kind.index()], self.accesses(kind))
    }
}

/// Outcome of one memory-system core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreStats {
    /// The core has replayed its whole trace.
    pub done: bool,
    /// Instructions replayed.
    pub inst: u64,
    /// Cycle on which the core finished.
    pub cycles: u64,
}

impl CoreStats {
    /// Instructions per cycle.
    pub fn ipc(&self) -> f64 {
        ratio(self.inst, self.cycles)
    }
}

fn lab_u64(f: &mut fmt::Formatter<'_>, key: &str, value: u64) -> fmt::Result {
    writeln!(f, "{key:<24}\t : {value:>10}")
}

fn lab_f64(f: &mut fmt::Formatter<'_>, key: &str, value: f64) -> fmt::Result {
    writeln!(f, "{key:<24}\t : {value:>10.3}")
}

fn mem_u64(f: &mut fmt::Formatter<'_>, key: &str, width: usize, value: u64) -> fmt::Result {
    writeln!(f, "{key:<width$}\t\t : {value:>10}")
}

fn mem_f64(f: &mut fmt::Formatter<'_>, key: &str, width: usize, value: f64) -> fmt::Result {
    writeln!(f, "{key:<width$}\t\t : {value:>10.3}")
}

fn write_mix(f: &mut fmt::Formatter<'_>, mix: &InstMix) -> fmt::Result {
    writeln!(f)?;
    for op in OpType::ALL {
        lab_u64(f, &format!("OP_{}", op.label()), mix.count(op))?;
    }
    for op in OpType::ALL {
        lab_f64(f, &format!("OP_{}_PERC", op.label()), mix.percent(op))?;
    }
    Ok(())
}

/// Final report of the out-of-order pipeline.
#[derive(Clone, Debug)]
pub struct OooReport {
    /// Pipeline counters.
    pub stats: PipelineStats,
}

impl fmt::Display for OooReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        lab_u64(f, "LAB3_NUM_INST", self.stats.retired)?;
        lab_u64(f, "LAB3_NUM_CYCLES", self.stats.cycles)?;
        lab_f64(f, "LAB3_CPI", self.stats.cpi())?;
        write_mix(f, &self.stats.mix)
    }
}

/// Final report of the in-order superscalar pipeline.
#[derive(Clone, Debug)]
pub struct InOrderReport {
    /// Pipeline counters.
    pub stats: PipelineStats,
    /// Predictor counters; `None` under perfect prediction.
    pub branches: Option<BranchStats>,
}

impl fmt::Display for InOrderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        lab_u64(f, "LAB2_NUM_INST", self.stats.retired)?;
        lab_u64(f, "LAB2_NUM_CYCLES", self.stats.cycles)?;
        lab_f64(f, "LAB2_CPI", self.stats.cpi())?;
        if let Some(b) = &self.branches {
            lab_u64(f, "LAB2_BPRED_BRANCHES", b.branches)?;
            lab_u64(f, "LAB2_BPRED_MISPRED", b.mispredicted)?;
            lab_f64(f, "LAB2_MISPRED_RATE", b.mispred_rate())?;
        }
        write_mix(f, &self.stats.mix)
    }
}

/// Final report of the memory-system simulator.
///
/// Caches are listed in the order the memory system reports them.
#[derive(Clone, Debug, Default)]
pub struct MemSysReport {
    /// Cycles simulated.
    pub cycles: u64,
    /// Per-core outcome, in core id order.
    pub cores: Vec<CoreStats>,
    /// Per-access-type counters.
    pub memsys: MemSysStats,
    /// Every cache with its report label.
    pub caches: Vec<(String, CacheStats)>,
    /// DRAM counters, for the modes with a DRAM.
    pub dram: Option<DramStats>,
}

impl fmt::Display for MemSysReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        mem_u64(f, "CYCLES", 20, self.cycles)?;

        for (id, core) in self.cores.iter().enumerate() {
            writeln!(f)?;
            mem_u64(f, &format!("CORE_{id}_INST"), 20, core.inst)?;
            mem_u64(f, &format!("CORE_{id}_CYCLES"), 20, core.cycles)?;
            mem_f64(f, &format!("CORE_{id}_IPC"), 20, core.ipc())?;
        }

        writeln!(f)?;
        for kind in AccessType::ALL {
            let key = format!("MEMSYS_{}_ACCESS", kind.label());
            mem_u64(f, &key, 23, self.memsys.accesses(kind))?;
        }
        for kind in AccessType::ALL {
            let key = format!("MEMSYS_{}_AVGDELAY", kind.label());
            mem_f64(f, &key, 23, self.memsys.avg_delay(kind))?;
        }

        for (label, c) in &self.caches {
            let key = |suffix: &str| format!("{label}_{suffix:<16}");
            writeln!(f)?;
            mem_u64(f, &key("READ_ACCESS"), 0, c.read_access)?;
            mem_u64(f, &key("WRITE_ACCESS"), 0, c.write_access)?;
            mem_u64(f, &key("READ_MISS"), 0, c.read_miss)?;
            mem_u64(f, &key("WRITE_MISS"), 0, c.write_miss)?;
            mem_f64(f, &key("READ_MISS_PERC"), 0, c.read_miss_percent())?;
            mem_f64(f, &key("WRITE_MISS_PERC"), 0, c.write_miss_percent())?;
            mem_u64(f, &key("DIRTY_EVICTS"), 0, c.dirty_evicts)?;
        }

        if let Some(d) = &self.dram {
            writeln!(f)?;
            mem_u64(f, "DRAM_READ_ACCESS", 21, d.read_access)?;
            mem_u64(f, "DRAM_WRITE_ACCESS", 21, d.write_access)?;
            mem_f64(f, "DRAM_READ_DELAY_AVG", 21, d.avg_read_delay())?;
            mem_f64(f, "DRAM_WRITE_DELAY_AVG", 21, d.avg_write_delay())?;
        }
        Ok(())
    }
}
