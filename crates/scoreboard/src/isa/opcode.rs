//! Floating-point opcodes understood by the simulator.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::units::UnitClass;

/// Operation performed by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    /// `fld rd, imm(rs1)`: load a double from memory.
    Load,
    /// `fsd rs2, imm(rs1)`: store a double to memory.
    Store,
    /// `fadd rd, rs1, rs2`.
    Add,
    /// `fsub rd, rs1, rs2`.
    Sub,
    /// `fmul rd, rs1, rs2`.
    Mul,
    /// `fdiv rd, rs1, rs2`.
    Div,
}

impl Opcode {
    /// All opcodes in encoding order.
    pub const ALL: [Self; 6] = [
        Self::Load,
        Self::Store,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
    ];

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Load => "fld",
            Self::Store => "fsd",
            Self::Add => "fadd",
            Self::Sub => "fsub",
            Self::Mul => "fmul",
            Self::Div => "fdiv",
        }
    }

    /// Functional-unit class that executes this opcode.
    ///
    /// Loads and stores compute their effective address on the integer/address
    /// unit; add and subtract share the adder.
    pub const fn unit_class(self) -> UnitClass {
        match self {
            Self::Load | Self::Store => UnitClass::Address,
            Self::Add | Self::Sub => UnitClass::Adder,
            Self::Mul => UnitClass::Multiplier,
            Self::Div => UnitClass::Divider,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
