//! Per-instruction scoreboard rows.
//!
//! A row holds the explicit stage state of one instruction plus the cycle at
//! which it entered each stage. Every timestamp is written at most once, through
//! the `record_*` methods, which also advance the stage.

use std::fmt;

use serde::Serialize;

use crate::core::units::UnitId;

/// Progress of an instruction through the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Not yet issued.
    Waiting,
    /// Holds a functional unit, waiting for its operands.
    Issued,
    /// Operands read; the unit is computing (or has computed) the result.
    Executing,
    /// Result published. Terminal.
    WrittenBack,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Waiting => "waiting",
            Self::Issued => "issued",
            Self::Executing => "executing",
            Self::WrittenBack => "written back",
        })
    }
}

/// Cycle at which an instruction entered each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct StageTimes {
    /// Issue cycle.
    pub issue: Option<u64>,
    /// Read-Operands cycle.
    pub read_operands: Option<u64>,
    /// Execute-Complete cycle.
    pub execute_complete: Option<u64>,
    /// Write-Result cycle.
    pub write_result: Option<u64>,
}

impl StageTimes {
    /// Timestamps in stage order.
    pub const fn as_array(&self) -> [Option<u64>; 4] {
        [
            self.issue,
            self.read_operands,
            self.execute_complete,
            self.write_result,
        ]
    }

    /// Set timestamps never decrease in stage order and are positive.
    pub fn is_monotonic(&self) -> bool {
        let set: Vec<u64> = self.as_array().into_iter().flatten().collect();
        set.iter().all(|&c| c > 0) && set.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Scoreboard row for one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardRow {
    /// Program-order index.
    pub index: usize,
    /// Current stage.
    pub stage: Stage,
    /// Stage timestamps.
    pub times: StageTimes,
    /// Unit held between Issue and Write-Result.
    pub unit: Option<UnitId>,
    /// Unit the instruction was issued to; kept after Write-Result for reporting.
    pub used_unit: Option<UnitId>,
}

impl ScoreboardRow {
    /// Fresh row with every stage unset.
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            stage: Stage::Waiting,
            times: StageTimes {
                issue: None,
                read_operands: None,
                execute_complete: None,
                write_result: None,
            },
            unit: None,
            used_unit: None,
        }
    }

    /// Write-Result recorded.
    pub fn is_done(&self) -> bool {
        self.stage == Stage::WrittenBack
    }

    /// Executing with a recorded execute-complete cycle strictly before `cycle`.
    pub fn ready_to_write(&self, cycle: u64) -> bool {
        self.stage == Stage::Executing && self.times.execute_complete.is_some_and(|c| c < cycle)
    }

    pub(crate) fn record_issue(&mut self, cycle: u64, unit: UnitId) {
        debug_assert_eq!(self.stage, Stage::Waiting);
        self.stage = Stage::Issued;
        self.times.issue = Some(cycle);
        self.unit = Some(unit);
        self.used_unit = Some(unit);
    }

    pub(crate) fn record_read_operands(&mut self, cycle: u64) {
        debug_assert_eq!(self.stage, Stage::Issued);
        self.stage = Stage::Executing;
        self.times.read_operands = Some(cycle);
    }

    pub(crate) fn record_execute_complete(&mut self, cycle: u64) {
        debug_assert!(self.times.execute_complete.is_none());
        self.times.execute_complete = Some(cycle);
    }

    pub(crate) fn record_write_result(&mut self, cycle: u64) {
        debug_assert!(self.ready_to_write(cycle));
        self.stage = Stage::WrittenBack;
        self.times.write_result = Some(cycle);
        self.unit = None;
    }
}
