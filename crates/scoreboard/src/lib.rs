//! Scoreboard dynamic-scheduling simulator library.
//!
//! This crate simulates the classic CDC 6600 style scoreboard on a small
//! floating-point instruction set. It provides:
//! 1. **ISA:** Decoding of `fld`/`fsd`/`fadd`/`fsub`/`fmul`/`fdiv` listings and disassembly.
//! 2. **Core:** Register status table, functional-unit pool and the hazard-aware engine.
//! 3. **Simulation:** Cycle clock, deadlock detection, reports and file loading.
//! 4. **Configuration and statistics:** Unit tables and per-run stall accounting.
//!
//! # Examples
//!
//! ```
//! use sbsim_core::{Config, sim};
//!
//! let report = sim::run("fld f6, 34(x2)\nfld f2, 45(x3)\nfadd f4, f2, f6", &Config::default())
//!     .unwrap();
//! assert_eq!(report.cycles, 10);
//! assert_eq!(report.times(2), Some([Some(5), Some(7), Some(9), Some(10)]));
//! ```

/// Common types (registers, errors).
pub mod common;
/// Simulator configuration (defaults, unit table, JSON and table formats).
pub mod config;
/// Scoreboard engine and functional units.
pub mod core;
/// Instruction set (opcodes, instructions, decoding, disassembly).
pub mod isa;
/// Cycle driver, reports and input loading.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load one from JSON or a table.
pub use crate::config::Config;
/// Umbrella error type.
pub use crate::common::error::Error;
/// Snapshot of a run.
pub use crate::sim::SimReport;
/// Cycle clock driving the engine.
pub use crate::sim::Simulator;
