//! Simulator: the cycle clock driving a scoreboard engine.
//!
//! The simulator owns the engine and the cycle counter. Cycles are numbered from 1;
//! a program with no instructions completes at cycle 0. Each tick advances the
//! clock, steps the engine once and checks the two termination bounds:
//! 1. **Deadlock:** more than twice the instruction count consecutive cycles with no
//!    progress.
//! 2. **Cycle limit:** the optional `general.max_cycles` ceiling.
//!
//! Both bounds return the report computed so far inside the error.

use serde::Serialize;

use crate::common::error::{ConfigError, SimulationError};
use crate::config::{Config, GeneralConfig};
use crate::core::pipeline::engine::{CycleEvents, ScoreboardEngine};
use crate::core::pipeline::row::StageTimes;
use crate::isa::Instruction;
use crate::sim::report::SimReport;

/// State recorded after one cycle when `general.trace_cycles` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleTrace {
    /// Cycle number.
    pub cycle: u64,
    /// What happened during the cycle.
    pub events: CycleEvents,
    /// Stage timestamps of every instruction at the end of the cycle.
    pub times: Vec<StageTimes>,
}

/// Top-level simulator: engine plus cycle clock.
#[derive(Debug, Clone)]
pub struct Simulator {
    engine: ScoreboardEngine,
    cycle: u64,
    idle_cycles: u64,
    idle_limit: u64,
    general: GeneralConfig,
    trace: Vec<CycleTrace>,
}

impl Simulator {
    /// Creates a simulator for `program` on the machine described by `config`.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the configuration is invalid or does not provide a unit
    /// class the program needs.
    pub fn new(program: Vec<Instruction>, config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = ScoreboardEngine::load(program, &config.units)?;
        Ok(Self::from_engine(engine, &config.general))
    }

    pub(crate) fn from_engine(engine: ScoreboardEngine, general: &GeneralConfig) -> Self {
        let idle_limit = 2 * engine.program().len() as u64;
        Self {
            engine,
            cycle: 0,
            idle_cycles: 0,
            idle_limit,
            general: general.clone(),
            trace: Vec::new(),
        }
    }

    /// Advances the simulation by one cycle.
    ///
    /// # Errors
    ///
    /// `SimulationError::CycleLimit` if the configured ceiling has been reached,
    /// `SimulationError::Deadlock` if the idle bound trips on this cycle.
    pub fn tick(&mut self) -> Result<CycleEvents, SimulationError> {
        if let Some(limit) = self.general.max_cycles {
            if self.cycle >= limit {
                tracing::warn!(limit, "cycle limit reached");
                return Err(SimulationError::CycleLimit {
                    limit,
                    report: Box::new(self.report()),
                });
            }
        }

        self.cycle += 1;
        let events = self.engine.step(self.cycle);
        if self.general.trace_cycles {
            self.trace.push(CycleTrace {
                cycle: self.cycle,
                events: events.clone(),
                times: self.engine.rows().iter().map(|r| r.times).collect(),
            });
        }

        if events.made_progress() {
            self.idle_cycles = 0;
        } else {
            self.idle_cycles += 1;
            if self.idle_cycles > self.idle_limit {
                tracing::warn!(
                    cycle = self.cycle,
                    idle_cycles = self.idle_cycles,
                    "no progress, giving up"
                );
                return Err(SimulationError::Deadlock {
                    cycle: self.cycle,
                    idle_cycles: self.idle_cycles,
                    report: Box::new(self.report()),
                });
            }
        }
        Ok(events)
    }

    /// Runs until every instruction has written its result.
    ///
    /// # Errors
    ///
    /// See [`Simulator::tick`].
    pub fn run(&mut self) -> Result<SimReport, SimulationError> {
        tracing::info!(instructions = self.engine.program().len(), "simulation start");
        while !self.engine.is_done() {
            let _ = self.tick()?;
        }
        tracing::info!(cycles = self.cycle, "simulation complete");
        Ok(self.report())
    }

    /// Every instruction has written its result.
    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }

    /// Last simulated cycle (0 before the first tick).
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The engine being driven.
    pub const fn engine(&self) -> &ScoreboardEngine {
        &self.engine
    }

    /// Snapshot of the current state.
    pub fn report(&self) -> SimReport {
        SimReport::capture(&self.engine, self.cycle)
    }

    /// Per-cycle trace; empty unless `general.trace_cycles` is set.
    pub fn trace(&self) -> &[CycleTrace] {
        &self.trace
    }
}
