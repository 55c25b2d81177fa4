//! Configuration system for the trace-driven simulators.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulators. It provides:
//! 1. **Defaults:** Baseline hardware constants (pipeline width, buffer sizes, cache geometry).
//! 2. **Structures:** One config block per simulator plus the watchdog settings.
//! 3. **Enums:** Scheduling, branch prediction, replacement, memory-system mode and DRAM page policy.
//! 4. **Validation:** Range checks performed before any cycle is simulated.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from `Config::default()`
//! and overridden field by field by the command line front end.

use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{
    MAX_CORES, MAX_EXEQ_ENTRIES, MAX_PIPE_WIDTH, MAX_ROB_ENTRIES, MAX_WAYS, PROGRESS_INTERVAL,
    WATCHDOG_WINDOW,
};
use crate::common::error::{Result, SimError};

/// Default configuration constants for the simulators.
///
/// These values define the baseline hardware when a field is not
/// explicitly overridden in JSON or on the command line.
mod defaults {
    /// Default pipeline width (1 instruction per cycle).
    pub const PIPELINE_WIDTH: usize = 1;

    /// Default reorder buffer size.
    ///
    /// One slot is always kept free to tell a full ring from an empty one,
    /// so 31 instructions may be in flight.
    pub const ROB_ENTRIES: usize = 32;

    /// Default execution queue size.
    pub const EXEQ_ENTRIES: usize = 16;

    /// Default load execution latency in cycles.
    pub const LOAD_LATENCY: u64 = 4;

    /// Default cache line size in bytes.
    pub const LINE_SIZE: u64 = 64;

    /// Default L1 data and instruction cache size (32 KiB).
    pub const L1_SIZE: u64 = 32 * 1024;

    /// Default L1 associativity.
    pub const L1_ASSOC: u64 = 8;

    /// Default L2 cache size (1 MiB).
    pub const L2_SIZE: u64 = 1024 * 1024;

    /// Default L2 associativity.
    pub const L2_ASSOC: u64 = 16;

    /// Default number of L2 accesses between dynamic partition samples.
    pub const DWP_INTERVAL: u64 = 10_000;

    /// Default number of ways the dynamic partition boundary moves per sample.
    pub const DWP_STEP: u64 = 1;
}

/// Selection rule used by the out-of-order scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SchedPolicy {
    /// Only a ready prefix starting at the ROB head may dispatch.
    InOrder,
    /// The oldest ready instructions dispatch regardless of position.
    #[default]
    OutOfOrder,
}

impl SchedPolicy {
    /// Maps the numeric command line selector (0 in-order, 1 out-of-order).
    pub fn from_index(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::InOrder),
            1 => Ok(Self::OutOfOrder),
            other => Err(SimError::Config(format!(
                "scheduling policy must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// Branch prediction policy for the in-order pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictorPolicy {
    /// Oracle prediction. No predictor is consulted and no bubbles are inserted.
    #[default]
    Perfect,
    /// Static predictor that always predicts taken.
    AlwaysTaken,
    /// Global history XOR address indexed table of 2-bit counters.
    #[serde(alias = "Gshare")]
    GShare,
}

impl BranchPredictorPolicy {
    /// Maps the numeric command line selector (0 perfect, 1 always taken, 2 gshare).
    pub fn from_index(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Perfect),
            1 => Ok(Self::AlwaysTaken),
            2 => Ok(Self::GShare),
            other => Err(SimError::Config(format!(
                "branch predictor policy must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

/// Cache replacement policy algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Random replacement from a seeded xorshift stream.
    #[serde(alias = "Random")]
    Random,
    /// Static way partitioning between two cores.
    #[serde(alias = "Swp")]
    Swp,
    /// Dynamic way partitioning adjusted from sampled miss rates.
    #[serde(alias = "Dwp")]
    Dwp,
}

impl ReplacementPolicy {
    /// Maps the numeric command line selector (0 LRU, 1 random, 2 SWP, 3 DWP).
    pub fn from_index(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Lru),
            1 => Ok(Self::Random),
            2 => Ok(Self::Swp),
            3 => Ok(Self::Dwp),
            other => Err(SimError::Config(format!(
                "replacement policy must be between 0 and 3, got {other}"
            ))),
        }
    }

    /// Returns true for the policies that split ways between cores.
    pub const fn is_partitioned(self) -> bool {
        matches!(self, Self::Swp | Self::Dwp)
    }
}

/// Memory hierarchy configuration selected for the memory-system simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MemSysMode {
    /// Data cache only, no timing.
    #[default]
    Standalone,
    /// Split L1 caches, unified L2 and a fixed-latency DRAM.
    TwoLevel,
    /// Split L1 caches, unified L2 and the DRAM timing model.
    TwoLevelDram,
    /// Two cores with private L1 caches sharing an L2 and the DRAM timing model.
    MultiCore,
}

impl MemSysMode {
    /// Maps the numeric command line selector (1 to 4).
    pub fn from_index(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::Standalone),
            2 => Ok(Self::TwoLevel),
            3 => Ok(Self::TwoLevelDram),
            4 => Ok(Self::MultiCore),
            other => Err(SimError::Config(format!(
                "memory system mode must be between 1 and 4, got {other}"
            ))),
        }
    }

    /// Numeric form used in diagnostics.
    pub const fn index(self) -> u32 {
        match self {
            Self::Standalone => 1,
            Self::TwoLevel => 2,
            Self::TwoLevelDram => 3,
            Self::MultiCore => 4,
        }
    }

    /// Number of cores the mode simulates at most.
    pub const fn max_cores(self) -> usize {
        match self {
            Self::MultiCore => MAX_CORES,
            _ => 1,
        }
    }
}

/// DRAM row buffer management policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DramPolicy {
    /// Rows stay open after an access; same-row accesses pay only CAS.
    #[default]
    OpenPage,
    /// Rows are closed after every access.
    ClosePage,
}

impl DramPolicy {
    /// Maps the numeric command line selector (0 open page, 1 close page).
    pub fn from_index(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::OpenPage),
            1 => Ok(Self::ClosePage),
            other => Err(SimError::Config(format!(
                "DRAM page policy must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use tracesim_core::config::{Config, SchedPolicy};
///
/// let config = Config::from_json(r#"{ "ooo": { "width": 4, "sched_policy": "InOrder" } }"#)
///     .unwrap();
/// assert_eq!(config.ooo.width, 4);
/// assert_eq!(config.ooo.sched_policy, SchedPolicy::InOrder);
/// assert_eq!(config.ooo.rob_entries, 32);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Out-of-order pipeline settings
    #[serde(default)]
    pub ooo: OooConfig,
    /// In-order superscalar pipeline settings
    #[serde(default)]
    pub inorder: InOrderConfig,
    /// Memory hierarchy settings
    #[serde(default)]
    pub memsys: MemSysConfig,
    /// Deadlock detection and progress reporting
    #[serde(default)]
    pub watchdog: WatchdogConfig,
}

impl Config {
    /// Parses a JSON document. Missing fields take their defaults.
    ///
    /// The result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimError::Config(format!("malformed JSON configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks every block for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        self.ooo.validate()?;
        self.inorder.validate()?;
        self.memsys.validate()?;
        self.watchdog.validate()
    }
}

/// Out-of-order pipeline settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OooConfig {
    /// Fetch, decode, issue, schedule and commit lanes
    #[serde(default = "OooConfig::default_width")]
    pub width: usize,

    /// Reorder buffer slots (one is reserved)
    #[serde(default = "OooConfig::default_rob_entries")]
    pub rob_entries: usize,

    /// Execution queue slots
    #[serde(default = "OooConfig::default_exeq_entries")]
    pub exeq_entries: usize,

    /// Execution latency of loads in cycles
    #[serde(default = "OooConfig::default_load_latency")]
    pub load_latency: u64,

    /// Scheduler selection rule
    #[serde(default)]
    pub sched_policy: SchedPolicy,
}

impl OooConfig {
    fn default_width() -> usize {
        defaults::PIPELINE_WIDTH
    }

    fn default_rob_entries() -> usize {
        defaults::ROB_ENTRIES
    }

    fn default_exeq_entries() -> usize {
        defaults::EXEQ_ENTRIES
    }

    fn default_load_latency() -> u64 {
        defaults::LOAD_LATENCY
    }

    /// Rejects widths, buffer sizes and latencies the engine cannot model.
    pub fn validate(&self) -> Result<()> {
        check_width(self.width)?;
        if !(2..=MAX_ROB_ENTRIES).contains(&self.rob_entries) {
            return Err(SimError::Config(format!(
                "rob_entries must be between 2 and {MAX_ROB_ENTRIES}, got {}",
                self.rob_entries
            )));
        }
        if !(1..=MAX_EXEQ_ENTRIES).contains(&self.exeq_entries) {
            return Err(SimError::Config(format!(
                "exeq_entries must be between 1 and {MAX_EXEQ_ENTRIES}, got {}",
                self.exeq_entries
            )));
        }
        if self.load_latency == 0 {
            return Err(SimError::Config("load_latency must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for OooConfig {
    fn default() -> Self {
        Self {
            width: defaults::PIPELINE_WIDTH,
            rob_entries: defaults::ROB_ENTRIES,
            exeq_entries: defaults::EXEQ_ENTRIES,
            load_latency: defaults::LOAD_LATENCY,
            sched_policy: SchedPolicy::default(),
        }
    }
}

/// In-order superscalar pipeline settings.
#[derive(Debug, Clone, Deserialize)]
pub struct InOrderConfig {
    /// Lanes per stage
    #[serde(default = "InOrderConfig::default_width")]
    pub width: usize,

    /// Forward results from the memory access stage
    #[serde(default)]
    pub enable_mem_fwd: bool,

    /// Forward results from the execute stage (loads still stall)
    #[serde(default)]
    pub enable_exe_fwd: bool,

    /// Conditional branch handling
    #[serde(default)]
    pub bpred_policy: BranchPredictorPolicy,
}

impl InOrderConfig {
    fn default_width() -> usize {
        defaults::PIPELINE_WIDTH
    }

    /// Rejects unsupported widths.
    pub fn validate(&self) -> Result<()> {
        check_width(self.width)
    }
}

impl Default for InOrderConfig {
    fn default() -> Self {
        Self {
            width: defaults::PIPELINE_WIDTH,
            enable_mem_fwd: false,
            enable_exe_fwd: false,
            bpred_policy: BranchPredictorPolicy::default(),
        }
    }
}

/// Memory hierarchy settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MemSysConfig {
    /// Hierarchy shape
    #[serde(default)]
    pub mode: MemSysMode,

    /// Cache line size in bytes (all levels)
    #[serde(default = "MemSysConfig::default_line_size")]
    pub line_size: u64,

    /// Replacement policy of the L1 caches
    #[serde(default)]
    pub repl: ReplacementPolicy,

    /// L1 data cache size in bytes
    #[serde(default = "MemSysConfig::default_l1_size")]
    pub dcache_size: u64,

    /// L1 data cache associativity
    #[serde(default = "MemSysConfig::default_l1_assoc")]
    pub dcache_assoc: u64,

    /// L1 instruction cache size in bytes
    #[serde(default = "MemSysConfig::default_l1_size")]
    pub icache_size: u64,

    /// L1 instruction cache associativity
    #[serde(default = "MemSysConfig::default_l1_assoc")]
    pub icache_assoc: u64,

    /// L2 cache size in bytes
    #[serde(default = "MemSysConfig::default_l2_size")]
    pub l2_size: u64,

    /// L2 cache associativity
    #[serde(default = "MemSysConfig::default_l2_assoc")]
    pub l2_assoc: u64,

    /// Replacement policy of the shared L2 in multi-core mode
    #[serde(default)]
    pub l2_repl: ReplacementPolicy,

    /// Ways reserved for core 0 under static partitioning (0 disables the split)
    #[serde(default)]
    pub swp_core0_ways: u64,

    /// DRAM row buffer policy
    #[serde(default)]
    pub dram_policy: DramPolicy,

    /// L2 accesses between dynamic partition samples
    #[serde(default = "MemSysConfig::default_dwp_interval")]
    pub dwp_interval: u64,

    /// Ways the dynamic partition boundary moves per sample
    #[serde(default = "MemSysConfig::default_dwp_step")]
    pub dwp_step: u64,
}

impl MemSysConfig {
    fn default_line_size() -> u64 {
        defaults::LINE_SIZE
    }

    fn default_l1_size() -> u64 {
        defaults::L1_SIZE
    }

    fn default_l1_assoc() -> u64 {
        defaults::L1_ASSOC
    }

    fn default_l2_size() -> u64 {
        defaults::L2_SIZE
    }

    fn default_l2_assoc() -> u64 {
        defaults::L2_ASSOC
    }

    fn default_dwp_interval() -> u64 {
        defaults::DWP_INTERVAL
    }

    fn default_dwp_step() -> u64 {
        defaults::DWP_STEP
    }

    /// Rejects geometries that do not decompose into power-of-two sets and
    /// partitioning policies the selected mode cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.line_size.is_power_of_two() {
            return Err(SimError::Config(format!(
                "line size must be a power of two, got {}",
                self.line_size
            )));
        }
        check_geometry("dcache", self.dcache_size, self.dcache_assoc, self.line_size)?;
        if self.mode != MemSysMode::Standalone {
            check_geometry("icache", self.icache_size, self.icache_assoc, self.line_size)?;
            check_geometry("l2", self.l2_size, self.l2_assoc, self.line_size)?;
        }

        if self.repl.is_partitioned() {
            return Err(SimError::Config(
                "SWP and DWP apply only to the shared L2 (use l2_repl in mode 4)".into(),
            ));
        }
        if self.l2_repl.is_partitioned() {
            if self.mode != MemSysMode::MultiCore {
                return Err(SimError::Config(format!(
                    "partitioned L2 replacement requires mode 4, got mode {}",
                    self.mode.index()
                )));
            }
            if self.l2_assoc < 2 {
                return Err(SimError::Config(
                    "partitioned L2 replacement needs at least two ways".into(),
                ));
            }
        }
        if self.l2_repl == ReplacementPolicy::Swp && self.swp_core0_ways >= self.l2_assoc {
            return Err(SimError::Config(format!(
                "swp_core0_ways must leave core 1 at least one of {} ways, got {}",
                self.l2_assoc, self.swp_core0_ways
            )));
        }
        if self.l2_repl == ReplacementPolicy::Dwp && (self.dwp_interval == 0 || self.dwp_step == 0)
        {
            return Err(SimError::Config(
                "dwp_interval and dwp_step must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MemSysConfig {
    fn default() -> Self {
        Self {
            mode: MemSysMode::default(),
            line_size: defaults::LINE_SIZE,
            repl: ReplacementPolicy::default(),
            dcache_size: defaults::L1_SIZE,
            dcache_assoc: defaults::L1_ASSOC,
            icache_size: defaults::L1_SIZE,
            icache_assoc: defaults::L1_ASSOC,
            l2_size: defaults::L2_SIZE,
            l2_assoc: defaults::L2_ASSOC,
            l2_repl: ReplacementPolicy::default(),
            swp_core0_ways: 0,
            dram_policy: DramPolicy::default(),
            dwp_interval: defaults::DWP_INTERVAL,
            dwp_step: defaults::DWP_STEP,
        }
    }
}

/// Deadlock detection and progress reporting.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchdogConfig {
    /// Cycles between retirement progress checks
    #[serde(default = "WatchdogConfig::default_window")]
    pub window: u64,

    /// Cycles between progress log lines
    #[serde(default = "WatchdogConfig::default_progress_interval")]
    pub progress_interval: u64,
}

impl WatchdogConfig {
    fn default_window() -> u64 {
        WATCHDOG_WINDOW
    }

    fn default_progress_interval() -> u64 {
        PROGRESS_INTERVAL
    }

    /// Rejects zero-length intervals.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 || self.progress_interval == 0 {
            return Err(SimError::Config(
                "watchdog window and progress interval must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            window: WATCHDOG_WINDOW,
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

fn check_width(width: usize) -> Result<()> {
    if (1..=MAX_PIPE_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(SimError::Config(format!(
            "pipeline width must be between 1 and {MAX_PIPE_WIDTH}, got {width}"
        )))
    }
}

fn check_geometry(name: &str, size: u64, assoc: u64, line_size: u64) -> Result<()> {
    if assoc == 0 || assoc > MAX_WAYS as u64 {
        return Err(SimError::Config(format!(
            "{name} associativity must be between 1 and {MAX_WAYS}, got {assoc}"
        )));
    }
    let set_bytes = assoc * line_size;
    if size == 0 || size % set_bytes != 0 || !(size / set_bytes).is_power_of_two() {
        return Err(SimError::Config(format!(
            "{name} size {size} does not give a power-of-two set count with {assoc} ways of {line_size} bytes"
        )));
    }
    Ok(())
}
