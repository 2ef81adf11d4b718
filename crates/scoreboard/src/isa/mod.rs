//! Instruction Set Definitions.
//!
//! Contains the opcode set, the decoded instruction record and the text decoder
//! for the floating-point subset the scoreboard schedules:
//!
//! * `fld` / `fsd`: loads and stores through the address unit.
//! * `fadd` / `fsub`: adder.
//! * `fmul`: multiplier.
//! * `fdiv`: divider.

/// Assembly text decoder.
pub mod decode;

/// Instruction rendering for tables, traces and explanations.
pub mod disasm;

/// Decoded instruction record.
pub mod instruction;

/// Opcode set and opcode-to-unit-class mapping.
pub mod opcode;

pub use decode::decode_program;
pub use instruction::Instruction;
pub use opcode::Opcode;
