//! Functional-unit classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of functional unit. Every opcode executes on exactly one class.
///
/// Class names are matched case-insensitively and accept the short names used by
/// plain-text configuration tables (`int`, `add`, `mult`, `div`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UnitClass {
    /// Integer/address unit: effective-address computation for loads and stores.
    Address,
    /// Floating-point adder: `fadd` and `fsub`.
    Adder,
    /// Floating-point multiplier: `fmul`.
    Multiplier,
    /// Floating-point divider: `fdiv`.
    Divider,
}

impl UnitClass {
    /// All classes in unit-id order.
    pub const ALL: [Self; 4] = [Self::Address, Self::Adder, Self::Multiplier, Self::Divider];

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Adder => "adder",
            Self::Multiplier => "multiplier",
            Self::Divider => "divider",
        }
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "address" | "addr" | "int" | "integer" => Ok(Self::Address),
            "adder" | "add" => Ok(Self::Adder),
            "multiplier" | "mult" | "mul" => Ok(Self::Multiplier),
            "divider" | "div" => Ok(Self::Divider),
            _ => Err(format!("unknown unit class `{s}`")),
        }
    }
}

impl TryFrom<String> for UnitClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
