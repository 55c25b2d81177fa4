//! Simulator: steps a pipeline engine to completion under a watchdog.
//!
//! The simulator owns the engine and adds the concerns no pipeline stage
//! should carry:
//! 1. **Termination:** Cycles the engine until it reports that it halted.
//! 2. **Deadlock Detection:** Fails if a whole window passes without a retirement.
//! 3. **Progress:** Logs instruction and cycle counts at a fixed interval.

use tracing::{info, warn};

use crate::common::error::{Result, SimError};
use crate::config::WatchdogConfig;
use crate::core::pipeline::engine::Engine;

/// Top-level simulator driving one engine.
#[derive(Debug)]
pub struct Simulator<E> {
    /// The pipeline being simulated.
    pub engine: E,
    window: u64,
    progress_interval: u64,
    checkpoint_retired: u64,
}

impl<E: Engine> Simulator<E> {
    /// Wraps `engine` with the given watchdog settings.
    pub fn new(engine: E, watchdog: &WatchdogConfig) -> Self {
        Self {
            engine,
            window: watchdog.window.max(1),
            progress_interval: watchdog.progress_interval.max(1),
            checkpoint_retired: 0,
        }
    }

    /// Advances the engine by one clock cycle and runs the periodic checks.
    ///
    /// # Errors
    ///
    /// Propagates engine failures and returns [`SimError::Deadlock`] when no
    /// instruction retired during the last window.
    pub fn tick(&mut self) -> Result<()> {
        self.engine.cycle()?;
        let cycle = self.engine.cycles();
        let retired = self.engine.retired();

        if cycle % self.window == 0 {
            if retired == self.checkpoint_retired && !self.engine.is_halted() {
                warn!(cycle, retired, window = self.window, "no instruction retired");
                return Err(SimError::Deadlock {
                    window: self.window,
                    cycle,
                    retired,
                });
            }
            self.checkpoint_retired = retired;
        }

        if cycle % self.progress_interval == 0 {
            let cpi = if retired == 0 {
                0.0
            } else {
                cycle as f64 / retired as f64
            };
            info!(cycle, retired, cpi, "progress");
        }
        Ok(())
    }

    /// Runs until the engine halts.
    ///
    /// # Returns
    ///
    /// The number of cycles simulated.
    ///
    /// # Errors
    ///
    /// See [`Simulator::tick`].
    pub fn run(&mut self) -> Result<u64> {
        while !self.engine.is_halted() {
            self.tick()?;
        }
        Ok(self.engine.cycles())
    }

    /// Gives back the engine.
    pub fn into_engine(self) -> E {
        self.engine
    }
}
