//! Error taxonomy for decoding, configuration and simulation.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Decode errors:** `ParseError` for malformed assembly lines.
//! 2. **Configuration errors:** `ConfigError` for missing or invalid unit classes and
//!    programs that do not fit the machine.
//! 3. **Simulation errors:** `SimulationError` carrying the partial stage table.
//! 4. **Umbrella:** `Error`, used by the loader and the CLI.
//!
//! Parse and configuration errors are raised before the first cycle runs and never
//! carry partial output. Simulation errors always carry the report computed so far.

use std::path::PathBuf;

use thiserror::Error;

use crate::common::reg::Register;
use crate::core::units::UnitClass;
use crate::sim::report::SimReport;

/// Malformed instruction text. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The mnemonic is not one of `fld`, `fsd`, `fadd`, `fsub`, `fmul`, `fdiv`.
    #[error("line {line}: unknown opcode `{opcode}`")]
    UnknownOpcode {
        /// Source line.
        line: usize,
        /// Offending mnemonic.
        opcode: String,
    },

    /// Fewer operands than the instruction format requires.
    #[error("line {line}: `{opcode}` expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Source line.
        line: usize,
        /// Mnemonic being decoded.
        opcode: String,
        /// Operands the format requires.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },

    /// A register token could not be decoded.
    #[error("line {line}: invalid register `{token}`")]
    InvalidRegister {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A memory operand was not of the form `imm(reg)`.
    #[error("line {line}: invalid memory operand `{token}`, expected imm(reg)")]
    InvalidMemoryOperand {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The displacement of a memory operand is not a decimal integer.
    #[error("line {line}: invalid immediate `{token}`")]
    InvalidImmediate {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },
}

/// Invalid or incomplete functional-unit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The program uses an opcode whose unit class is not configured.
    #[error("unit class `{class}` is required by `{opcode}` but not configured")]
    MissingClass {
        /// Class that is absent.
        class: UnitClass,
        /// First mnemonic in program order that needs it.
        opcode: String,
    },

    /// An instruction names a register outside the architectural register files.
    #[error("instruction {index} (`{text}`): register `{register}` does not exist")]
    RegisterOutOfRange {
        /// Program-order index of the instruction.
        index: usize,
        /// Instruction text.
        text: String,
        /// Offending register.
        register: Register,
    },

    /// A class was configured with zero units.
    #[error("unit class `{0}` must have a positive capacity")]
    ZeroCapacity(UnitClass),

    /// A class was configured with a zero-cycle latency.
    #[error("unit class `{0}` must have a positive latency")]
    ZeroLatency(UnitClass),

    /// A class name in a configuration table was not recognised.
    #[error("line {line}: unknown unit class `{name}`")]
    UnknownClass {
        /// Source line.
        line: usize,
        /// Offending name.
        name: String,
    },

    /// The same class appears twice in a JSON `units` object, possibly under two
    /// aliases.
    #[error("unit class `{class}` configured twice, as `{first}` and `{second}`")]
    DuplicateClassName {
        /// Repeated class.
        class: UnitClass,
        /// Key of the first entry.
        first: String,
        /// Key of the second entry.
        second: String,
    },

    /// The same class appears twice in a configuration table.
    #[error("line {line}: unit class `{class}` configured twice")]
    DuplicateClass {
        /// Source line of the second occurrence.
        line: usize,
        /// Repeated class.
        class: UnitClass,
    },

    /// A configuration table line is not `<class> <capacity> <latency>`.
    #[error("line {line}: malformed configuration `{text}`, expected <class> <capacity> <latency>")]
    Malformed {
        /// Source line.
        line: usize,
        /// Offending line.
        text: String,
    },

    /// JSON configuration failed to deserialize.
    #[error("invalid JSON configuration: {0}")]
    Json(String),
}

/// Failure while the cycle loop is running. Always carries the partial report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// No instruction made progress for more than twice the instruction count.
    #[error("deadlock at cycle {cycle}: no progress for {idle_cycles} cycles")]
    Deadlock {
        /// Cycle at which the bound tripped.
        cycle: u64,
        /// Consecutive cycles without progress.
        idle_cycles: u64,
        /// Stage table computed so far.
        report: Box<SimReport>,
    },

    /// The configured hard cycle ceiling was reached before completion.
    #[error("cycle limit of {limit} reached before all instructions wrote back")]
    CycleLimit {
        /// Configured `general.max_cycles`.
        limit: u64,
        /// Stage table computed so far.
        report: Box<SimReport>,
    },
}

impl SimulationError {
    /// The partial report attached to this error.
    pub fn report(&self) -> &SimReport {
        match self {
            Self::Deadlock { report, .. } | Self::CycleLimit { report, .. } => report,
        }
    }
}

/// Top-level error for loading inputs and running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// Instruction text could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration is invalid or does not cover the program.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The simulation stopped early.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// An input file could not be read.
    #[error("could not read `{}`: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}
