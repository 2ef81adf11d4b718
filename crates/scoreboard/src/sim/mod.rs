//! Simulation driver, reporting and input loading.
//!
//! Provides the cycle clock that drives the scoreboard engine, the report it
//! produces, and helpers for reading programs and configurations from disk.

/// Program and configuration file loading.
pub mod loader;

/// Stage table and unit status snapshots.
pub mod report;

/// Cycle clock and termination bounds.
pub mod simulator;

pub use report::SimReport;
pub use simulator::{CycleTrace, Simulator};

use crate::common::error::Error;
use crate::config::Config;
use crate::isa::decode_program;

/// Decodes `source` and runs it to completion on the machine described by `config`.
///
/// # Errors
///
/// Any parse, configuration or simulation error, in that order.
pub fn run(source: &str, config: &Config) -> Result<SimReport, Error> {
    let program = decode_program(source)?;
    let mut sim = Simulator::new(program, config)?;
    Ok(sim.run()?)
}
