//! Common types used throughout the scoreboard simulator.
//!
//! This module provides the building blocks shared by the decoder, the engine and
//! the driver. It includes:
//! 1. **Register Types:** Strongly typed integer and floating-point registers.
//! 2. **Error Handling:** Parse, configuration and simulation error types.

/// Error types for decoding, configuration and simulation.
pub mod error;

/// Architectural register identifiers.
pub mod reg;

pub use error::{ConfigError, Error, ParseError, SimulationError};
pub use reg::{NUM_REGS, RegKind, Register};
