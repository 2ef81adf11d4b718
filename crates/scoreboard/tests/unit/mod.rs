//! # Unit Components
//!
//! Tests grouped by the component they exercise.

/// Unit table defaults, JSON and plain-table configuration formats.
pub mod config;


/// Instruction decoding and rendering.
pub mod isa;


/// Simulation driver, reports and file loading.
pub mod sim;

/// Statistics accounting for known schedules.
pub mod stats;
