//! Core scheduling machinery.
//!
//! This module contains the scoreboard itself and the functional units it
//! allocates.

/// Register status, stage rows and the scoreboard engine.
pub mod pipeline;

/// Functional-unit classes and the unit pool.
pub mod units;

pub use self::pipeline::ScoreboardEngine;
