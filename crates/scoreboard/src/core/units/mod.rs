//! Functional units.
//!
//! This module groups the execution resources of the machine:
//! 1. **Classes:** Address, adder, multiplier and divider, with opcode mapping.
//! 2. **Pool:** Fixed-capacity units per class, allocation and execution countdown.

/// Functional-unit classes.
pub mod class;

/// Functional-unit pool and per-unit scoreboard status.
pub mod pool;

pub use class::UnitClass;
pub use pool::{FunctionalUnit, FunctionalUnitPool, UnitId};
