//! Architectural register identifiers.
//!
//! This module provides the `Register` type used throughout the simulator to name
//! operands. It provides:
//! 1. **Register kinds:** Integer (`x0`-`x31`) and floating-point (`f0`-`f31`) files.
//! 2. **Parsing:** Conversion from assembly syntax (`x2`, `f6`).
//! 3. **Display:** Canonical assembly rendering for tables and disassembly.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Number of registers in each architectural register file.
pub const NUM_REGS: usize = 32;

/// Register file a register belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegKind {
    /// Integer register file (`x` prefix). Used for load/store base addresses.
    Int,
    /// Floating-point register file (`f` prefix).
    Float,
}

impl RegKind {
    /// Assembly prefix for this register file.
    pub const fn prefix(self) -> char {
        match self {
            Self::Int => 'x',
            Self::Float => 'f',
        }
    }
}

/// A single architectural register, keyed by register file and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Register {
    /// Register file.
    pub kind: RegKind,
    /// Index within the file (0-31).
    pub index: u8,
}

impl Register {
    /// Integer register `x<index>`.
    pub const fn int(index: u8) -> Self {
        Self {
            kind: RegKind::Int,
            index,
        }
    }

    /// Floating-point register `f<index>`.
    pub const fn float(index: u8) -> Self {
        Self {
            kind: RegKind::Float,
            index,
        }
    }

    /// Returns true for `x0`, which is hardwired to zero and never has a producer.
    pub const fn is_zero(self) -> bool {
        matches!(self.kind, RegKind::Int) && self.index == 0
    }

    /// Whether the index names a register of the `NUM_REGS`-entry file.
    ///
    /// The constructors accept any `u8`; instructions built outside the decoder
    /// are checked with this before they reach the register status table.
    pub const fn in_range(self) -> bool {
        (self.index as usize) < NUM_REGS
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index)
    }
}

/// Reason a register token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterSyntax {
    /// Prefix was not `x` or `f`.
    UnknownPrefix,
    /// Index was missing or not a decimal number.
    BadIndex,
    /// Index was outside `0..32`.
    OutOfRange,
}

impl FromStr for Register {
    type Err = RegisterSyntax;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let kind = match chars.next().map(|c| c.to_ascii_lowercase()) {
            Some('x') => RegKind::Int,
            Some('f') => RegKind::Float,
            _ => return Err(RegisterSyntax::UnknownPrefix),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RegisterSyntax::BadIndex);
        }
        let index: usize = digits.parse().map_err(|_| RegisterSyntax::OutOfRange)?;
        if index >= NUM_REGS {
            return Err(RegisterSyntax::OutOfRange);
        }
        Ok(Self {
            kind,
            index: index as u8,
        })
    }
}
