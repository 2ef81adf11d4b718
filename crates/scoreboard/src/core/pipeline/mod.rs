//! Scoreboard pipeline.
//!
//! This module contains the dynamic scheduling machinery. It includes:
//! 1. **Register status:** Pending producer of every architectural register.
//! 2. **Rows:** Per-instruction stage state and timestamps.
//! 3. **Engine:** Hazard checks and the four-phase cycle evaluation.

/// Four-phase scoreboard engine.
pub mod engine;

/// Per-instruction stage rows.
pub mod row;

/// Register result status table.
pub mod scoreboard;

pub use engine::{CycleEvents, IssueStall, ScoreboardEngine};
pub use row::{ScoreboardRow, Stage, StageTimes};
pub use scoreboard::{RegisterStatusTable, ReservationConflict};
