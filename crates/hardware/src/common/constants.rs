//! Global simulator constants.
//!
//! This module defines fixed hardware limits and timing constants shared across
//! the simulators. It includes:
//! 1. **Pipeline Limits:** Maximum lane counts, ROB and EXEQ sizes, writeback fan-out.
//! 2. **Memory Timing:** Cache hit latencies and DRAM command latencies.
//! 3. **Address Translation:** Page geometry used by the multi-core memory system.
//! 4. **Simulation Control:** Watchdog and progress intervals.

/// Maximum superscalar width of either pipeline.
pub const MAX_PIPE_WIDTH: usize = 8;

/// Maximum number of reorder buffer slots.
pub const MAX_ROB_ENTRIES: usize = 256;

/// Maximum number of execution queue slots.
pub const MAX_EXEQ_ENTRIES: usize = 16;

/// Maximum number of instructions that may complete execution in one cycle.
pub const MAX_WRITEBACKS: usize = 256;

/// Number of architectural registers a trace may name (one per `u8` value).
pub const NUM_ARCH_REGS: usize = 256;

/// Maximum cache associativity.
pub const MAX_WAYS: usize = 16;

/// Maximum number of cores in the multi-core memory system.
pub const MAX_CORES: usize = 2;

/// L1 hit latency in cycles.
pub const L1_HIT_LATENCY: u64 = 1;

/// L2 hit latency in cycles.
pub const L2_HIT_LATENCY: u64 = 10;

/// Fixed DRAM latency used when no DRAM timing model is selected.
pub const DRAM_FIXED_LATENCY: u64 = 100;

/// Row activate latency in cycles.
pub const DRAM_ACT_LATENCY: u64 = 45;

/// Column access latency in cycles.
pub const DRAM_CAS_LATENCY: u64 = 45;

/// Precharge latency in cycles.
pub const DRAM_PRE_LATENCY: u64 = 45;

/// Data bus transfer latency in cycles.
pub const DRAM_BUS_LATENCY: u64 = 10;

/// Size of one DRAM row buffer in bytes.
pub const DRAM_ROW_BUFFER_SIZE: u64 = 1024;

/// Number of independently open DRAM banks.
pub const DRAM_NUM_BANKS: u64 = 16;

/// Page size in bytes (4KB).
pub const PAGE_SIZE: u64 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u64 = 12;

/// Mask applied to the low virtual page number bits during translation.
pub const VPN_LOW_MASK: u64 = 0xF_FFFF;

/// Shift placing the core id above the per-core physical frame range.
pub const CORE_FRAME_SHIFT: u64 = 21;

/// Default watchdog window in cycles.
pub const WATCHDOG_WINDOW: u64 = 10_000;

/// Default progress heartbeat interval in cycles.
pub const PROGRESS_INTERVAL: u64 = 500_000;
