//! Cache hierarchy and memory-system access paths.
//!
//! The memory system owns every cache and the DRAM of one simulation and turns
//! a byte address plus access type into a delay in cycles:
//! 1. **Standalone:** Loads and stores probe a lone data cache; no timing.
//! 2. **Two-level:** Split L1 caches in front of a unified L2 and DRAM.
//! 3. **Multi-core:** Private L1 pairs per core sharing the L2 and DRAM, with
//!    virtual addresses translated to per-core physical frames first.
//!
//! Write-backs of dirty victims travel down the hierarchy off the critical
//! path: they update the lower level but add nothing to the returned delay.

use tracing::trace;

use super::dram::Dram;
use crate::common::constants::{
    CORE_FRAME_SHIFT, L1_HIT_LATENCY, L2_HIT_LATENCY, PAGE_SHIFT, PAGE_SIZE, VPN_LOW_MASK,
};
use crate::common::data::AccessType;
use crate::common::error::{Result, SimError};
use crate::config::{MemSysConfig, MemSysMode};
use crate::core::units::cache::CacheSim;
use crate::stats::{CacheStats, DramStats, MemSysStats};

/// Maps a virtual page number of `core` onto its physical frame.
///
/// The low 20 bits are kept, the core id lands at bit 21 and the remaining
/// high bits are added above it, so the cores never share a frame.
pub const fn vpn_to_pfn(vpn: u64, core: usize) -> u64 {
    let tail = vpn & VPN_LOW_MASK;
    let head = vpn >> 20;
    tail + ((core as u64) << CORE_FRAME_SHIFT) + (head << CORE_FRAME_SHIFT)
}

/// Translates a virtual line address of `core` into a physical line address.
pub const fn translate(v_line_addr: u64, core: usize, line_size: u64) -> u64 {
    let v_addr = v_line_addr * line_size;
    let pfn = vpn_to_pfn(v_addr >> PAGE_SHIFT, core);
    ((pfn * PAGE_SIZE) | (v_addr % PAGE_SIZE)) / line_size
}

/// The unified L2 and the DRAM behind it.
#[derive(Debug)]
pub struct SharedLevel {
    l2: CacheSim,
    dram: Dram,
}

impl SharedLevel {
    /// Accesses the L2 and, on a miss, DRAM.
    ///
    /// `is_writeback` marks an L1 victim arriving; it writes the line. The
    /// returned delay covers the L2 lookup and the DRAM read on a miss; a dirty
    /// L2 victim is written to DRAM without adding to it.
    pub fn access(&mut self, line_addr: u64, is_writeback: bool, core: usize, now: u64) -> u64 {
        let mut delay = L2_HIT_LATENCY;
        if !self.l2.access(line_addr, is_writeback, core, now) {
            delay += self.dram.access(line_addr, false);
            if let Some(victim) = self.l2.install(line_addr, is_writeback, core, now)
                && victim.dirty
            {
                let _ = self.dram.access(victim.line_addr, true);
            }
        }
        delay
    }

    /// The L2 cache.
    pub const fn l2(&self) -> &CacheSim {
        &self.l2
    }

    /// The DRAM.
    pub const fn dram(&self) -> &Dram {
        &self.dram
    }
}

/// Accesses a private L1 and fills it from `lower` on a miss.
fn l1_access(
    l1: &mut CacheSim,
    lower: &mut SharedLevel,
    line_addr: u64,
    is_write: bool,
    core: usize,
    now: u64,
) -> u64 {
    let mut delay = L1_HIT_LATENCY;
    if !l1.access(line_addr, is_write, core, now) {
        delay += lower.access(line_addr, false, core, now);
        if let Some(victim) = l1.install(line_addr, is_write, core, now)
            && victim.dirty
        {
            let _ = lower.access(victim.line_addr, true, core, now);
        }
    }
    delay
}

/// Private L1 caches of one core.
#[derive(Debug)]
struct CorePort {
    icache: Option<CacheSim>,
    dcache: CacheSim,
}

/// The complete memory hierarchy of one simulation.
#[derive(Debug)]
pub struct MemorySystem {
    mode: MemSysMode,
    line_size: u64,
    ports: Vec<CorePort>,
    shared: Option<SharedLevel>,
    stats: MemSysStats,
}

impl MemorySystem {
    /// Builds the hierarchy `config.mode` describes for `cores` cores.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] for an invalid configuration or a core count the
    /// mode does not support.
    pub fn new(config: &MemSysConfig, cores: usize) -> Result<Self> {
        config.validate()?;
        let max = config.mode.max_cores();
        if cores == 0 || cores > max {
            return Err(SimError::Config(format!(
                "memory system mode {} simulates 1 to {max} cores, got {cores}",
                config.mode.index()
            )));
        }

        let l1 = |size, assoc| {
            CacheSim::with_policy(size, assoc, config.line_size, config.repl, config)
        };
        let ports = (0..cores)
            .map(|_| CorePort {
                icache: (config.mode != MemSysMode::Standalone)
                    .then(|| l1(config.icache_size, config.icache_assoc)),
                dcache: l1(config.dcache_size, config.dcache_assoc),
            })
            .collect();

        // The partitioned policies only reach the L2 in multi-core mode.
        let l2_policy = if config.mode == MemSysMode::MultiCore {
            config.l2_repl
        } else {
            config.repl
        };
        let shared = (config.mode != MemSysMode::Standalone).then(|| SharedLevel {
            l2: CacheSim::with_policy(
                config.l2_size,
                config.l2_assoc,
                config.line_size,
                l2_policy,
                config,
            ),
            dram: Dram::for_config(config),
        });

        Ok(Self {
            mode: config.mode,
            line_size: config.line_size,
            ports,
            shared,
            stats: MemSysStats::default(),
        })
    }

    /// Hierarchy shape.
    pub const fn mode(&self) -> MemSysMode {
        self.mode
    }

    /// Number of cores with private caches.
    pub fn cores(&self) -> usize {
        self.ports.len()
    }

    /// Performs one access for `core` at cycle `now`.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address; virtual in multi-core mode.
    /// * `kind` - Instruction fetch, load or store.
    /// * `core` - Requesting core.
    /// * `now` - Current cycle, used as the LRU stamp.
    ///
    /// # Returns
    ///
    /// The delay in cycles. Always 0 in standalone mode.
    pub fn access(&mut self, addr: u64, kind: AccessType, core: usize, now: u64) -> u64 {
        let mut line_addr = addr / self.line_size;
        if self.mode == MemSysMode::MultiCore {
            line_addr = translate(line_addr, core, self.line_size);
        }

        let is_write = kind.is_write();
        let delay = match (self.ports.get_mut(core), self.shared.as_mut()) {
            (Some(port), None) => {
                if kind != AccessType::IFetch
                    && !port.dcache.access(line_addr, is_write, core, now)
                {
                    let _ = port.dcache.install(line_addr, is_write, core, now);
                }
                0
            }
            (Some(port), Some(shared)) => {
                let l1 = match kind {
                    AccessType::IFetch => port.icache.as_mut().unwrap_or(&mut port.dcache),
                    AccessType::Load | AccessType::Store => &mut port.dcache,
                };
                l1_access(l1, shared, line_addr, is_write, core, now)
            }
            (None, _) => 0,
        };

        trace!(core, addr, ?kind, delay, "memsys access");
        self.stats.record(kind, delay);
        delay
    }

    /// Per-type access counters.
    pub const fn stats(&self) -> &MemSysStats {
        &self.stats
    }

    /// Every cache with the label it is reported under, in report order.
    pub fn cache_stats(&self) -> Vec<(String, &CacheStats)> {
        let mut out = Vec::new();
        match self.mode {
            MemSysMode::Standalone => {
                if let Some(port) = self.ports.first() {
                    out.push(("DCACHE".to_string(), port.dcache.stats()));
                }
            }
            MemSysMode::TwoLevel | MemSysMode::TwoLevelDram => {
                if let Some(port) = self.ports.first() {
                    if let Some(icache) = &port.icache {
                        out.push(("ICACHE".to_string(), icache.stats()));
                    }
                    out.push(("DCACHE".to_string(), port.dcache.stats()));
                }
            }
            MemSysMode::MultiCore => {
                for (core, port) in self.ports.iter().enumerate() {
                    if let Some(icache) = &port.icache {
                        out.push((format!("ICACHE_{core}"), icache.stats()));
                    }
                    out.push((format!("DCACHE_{core}"), port.dcache.stats()));
                }
            }
        }
        if let Some(shared) = &self.shared {
            out.push(("L2CACHE".to_string(), shared.l2.stats()));
        }
        out
    }

    /// DRAM counters, when the mode has a DRAM.
    pub fn dram_stats(&self) -> Option<&DramStats> {
        self.shared.as_ref().map(|s| s.dram.stats())
    }

    /// The shared L2 and DRAM, when the mode has them.
    pub const fn shared(&self) -> Option<&SharedLevel> {
        self.shared.as_ref()
    }
}
