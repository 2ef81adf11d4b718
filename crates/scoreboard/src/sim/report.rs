//! Simulation report.
//!
//! A [`SimReport`] is a self-contained snapshot of the engine: the stage table
//! (one row per instruction with its four timestamps), the functional-unit status
//! table and the register result status. It renders as plain text via `Display`
//! and as JSON via serde.

use std::fmt;

use serde::Serialize;

use crate::common::reg::Register;
use crate::core::pipeline::engine::ScoreboardEngine;
use crate::core::pipeline::row::{Stage, StageTimes};
use crate::core::units::{FunctionalUnit, UnitId};
use crate::isa::Opcode;
use crate::stats::SimStats;

/// Stage-table row of one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionReport {
    /// Program-order index.
    pub index: usize,
    /// Instruction text as written in the program.
    pub text: String,
    /// Operation.
    pub op: Opcode,
    /// Stage reached.
    pub stage: Stage,
    /// Stage timestamps; unset stages are `None`.
    pub times: StageTimes,
    /// Name of the unit the instruction issued to.
    pub unit: Option<String>,
}

/// Pending producer of one register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterStatus {
    /// Register awaiting a result.
    pub register: Register,
    /// Name of the producing unit.
    pub unit: String,
}

/// Snapshot of a simulation, complete or partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimReport {
    /// Cycles simulated.
    pub cycles: u64,
    /// Every instruction wrote its result.
    pub finished: bool,
    /// Stage table in program order.
    pub rows: Vec<InstructionReport>,
    /// Functional-unit status in unit-id order.
    pub units: Vec<FunctionalUnit>,
    /// Registers with a pending producer.
    pub registers: Vec<RegisterStatus>,
    /// Run statistics.
    pub stats: SimStats,
}

impl SimReport {
    /// Captures the current state of `engine` after `cycles` cycles.
    pub fn capture(engine: &ScoreboardEngine, cycles: u64) -> Self {
        let rows = engine
            .rows()
            .iter()
            .zip(engine.program())
            .map(|(row, inst)| InstructionReport {
                index: row.index,
                text: inst.text.clone(),
                op: inst.op,
                stage: row.stage,
                times: row.times,
                unit: row.used_unit.map(|id| engine.unit_name(id).to_string()),
            })
            .collect();
        let registers = engine
            .registers()
            .pending()
            .map(|(register, id)| RegisterStatus {
                register,
                unit: engine.unit_name(id).to_string(),
            })
            .collect();
        Self {
            cycles,
            finished: engine.is_done(),
            rows,
            units: engine.pool().snapshot(),
            registers,
            stats: engine.stats().clone(),
        }
    }

    /// Timestamps of row `index` in stage order.
    pub fn times(&self, index: usize) -> Option<[Option<u64>; 4]> {
        self.rows.get(index).map(|r| r.times.as_array())
    }

    /// Writes only the stage table.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    pub fn write_stage_table(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.text.len())
            .max()
            .unwrap_or(0)
            .max("Instruction".len());
        writeln!(
            f,
            "{:<width$}  {:>5}  {:>5}  {:>5}  {:>5}  Unit",
            "Instruction", "Issue", "Read", "Exec", "Write"
        )?;
        for row in &self.rows {
            write!(f, "{:<width$}", row.text)?;
            for t in row.times.as_array() {
                write!(f, "  {:>5}", Cell(t))?;
            }
            writeln!(f, "  {}", row.unit.as_deref().unwrap_or("-"))?;
        }
        Ok(())
    }

    fn write_unit_table(&self, f: &mut impl fmt::Write) -> fmt::Result {
        writeln!(
            f,
            "{:<14} {:<5} {:<5} {:<4} {:<4} {:<4} {:<14} {:<14} {:<3} {:<3}",
            "Unit", "Busy", "Op", "Fi", "Fj", "Fk", "Qj", "Qk", "Rj", "Rk"
        )?;
        for unit in &self.units {
            let producer = |q: Option<UnitId>| {
                q.map_or_else(|| "-".to_string(), |id| self.units[id.0].name.clone())
            };
            writeln!(
                f,
                "{:<14} {:<5} {:<5} {:<4} {:<4} {:<4} {:<14} {:<14} {:<3} {:<3}",
                unit.name,
                if unit.busy { "yes" } else { "no" },
                unit.op.map_or("-", |op| op.mnemonic()),
                Cell(unit.fi),
                Cell(unit.fj),
                Cell(unit.fk),
                producer(unit.qj),
                producer(unit.qk),
                Flag(unit.busy && unit.rj),
                Flag(unit.busy && unit.rk),
            )?;
        }
        Ok(())
    }
}

/// Renders `None` as `-`.
struct Cell<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => f.pad(&v.to_string()),
            None => f.pad("-"),
        }
    }
}

struct Flag(bool);

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(if self.0 { "yes" } else { "no" })
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_stage_table(f)?;
        writeln!(f)?;
        self.write_unit_table(f)?;
        writeln!(f)?;
        if self.registers.is_empty() {
            writeln!(f, "Register result status: all registers ready")?;
        } else {
            write!(f, "Register result status:")?;
            for status in &self.registers {
                write!(f, " {}={}", status.register, status.unit)?;
            }
            writeln!(f)?;
        }
        if self.finished {
            write!(f, "Completed in {} cycles", self.cycles)
        } else {
            write!(f, "Stopped after {} cycles", self.cycles)
        }
    }
}
