//! Decoded instruction record.
//!
//! An `Instruction` is immutable once produced by the decoder (or built directly
//! by a caller). Its position in the program is its identity; the engine never
//! reorders or copies instructions, it only refers to them by index.

use serde::Serialize;

use crate::common::reg::Register;
use crate::isa::opcode::Opcode;

/// One decoded instruction.
///
/// Operand layout follows the RISC-V convention: `rs1` is the first source (the
/// base address for memory operations), `rs2` the second source (the stored value
/// for `fsd`), `rd` the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Operation.
    pub op: Opcode,
    /// Destination register; `None` for stores.
    pub rd: Option<Register>,
    /// First source register.
    pub rs1: Option<Register>,
    /// Second source register; `None` for loads and single-operand arithmetic.
    pub rs2: Option<Register>,
    /// Address displacement, present only for loads and stores.
    pub imm: Option<i64>,
    /// Source text the instruction was decoded from.
    pub text: String,
}

impl Instruction {
    /// `fld rd, imm(base)`.
    pub fn load(rd: Register, imm: i64, base: Register) -> Self {
        Self::with_canonical_text(Self {
            op: Opcode::Load,
            rd: Some(rd),
            rs1: Some(base),
            rs2: None,
            imm: Some(imm),
            text: String::new(),
        })
    }

    /// `fsd value, imm(base)`.
    pub fn store(value: Register, imm: i64, base: Register) -> Self {
        Self::with_canonical_text(Self {
            op: Opcode::Store,
            rd: None,
            rs1: Some(base),
            rs2: Some(value),
            imm: Some(imm),
            text: String::new(),
        })
    }

    /// Two-operand arithmetic, `op rd, rs1, rs2`.
    ///
    /// Passing a memory opcode yields a record with no immediate; the decoder
    /// never does this.
    pub fn arith(op: Opcode, rd: Register, rs1: Register, rs2: Register) -> Self {
        Self::with_canonical_text(Self {
            op,
            rd: Some(rd),
            rs1: Some(rs1),
            rs2: Some(rs2),
            imm: None,
            text: String::new(),
        })
    }

    fn with_canonical_text(mut inst: Self) -> Self {
        inst.text = inst.to_string();
        inst
    }

    /// Source registers in operand order, skipping absent ones.
    pub fn sources(&self) -> impl Iterator<Item = Register> + '_ {
        self.rs1.into_iter().chain(self.rs2)
    }

    /// Destination register, ignoring writes to the hardwired `x0`.
    pub fn effective_rd(&self) -> Option<Register> {
        self.rd.filter(|r| !r.is_zero())
    }
}
