//! Instruction rendering.
//!
//! Converts decoded instructions back into canonical assembly text and into a
//! one-sentence English description, for stage tables, trace output and the
//! `explain` subcommand.

use std::fmt;

use crate::common::reg::Register;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;

struct Reg(Option<Register>);

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(r) => write!(f, "{r}"),
            None => f.write_str("?"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let imm = self.imm.unwrap_or(0);
        match self.op {
            Opcode::Load => write!(f, "fld {}, {imm}({})", Reg(self.rd), Reg(self.rs1)),
            Opcode::Store => write!(f, "fsd {}, {imm}({})", Reg(self.rs2), Reg(self.rs1)),
            op => {
                write!(f, "{op} {}, {}", Reg(self.rd), Reg(self.rs1))?;
                if let Some(rs2) = self.rs2 {
                    write!(f, ", {rs2}")?;
                }
                Ok(())
            }
        }
    }
}

/// Describes what an instruction does in plain English.
pub fn describe(inst: &Instruction) -> String {
    let rd = Reg(inst.rd);
    let rs1 = Reg(inst.rs1);
    let imm = inst.imm.unwrap_or(0);
    match (inst.op, inst.rs2) {
        (Opcode::Load, _) => {
            format!("{} loads a value into register {rd} from the memory address {imm} + {rs1}", inst.op)
        }
        (Opcode::Store, rs2) => format!(
            "{} stores the value from register {} into the memory address {imm} + {rs1}",
            inst.op,
            Reg(rs2)
        ),
        (op, Some(rs2)) => {
            let symbol = match op {
                Opcode::Sub => '-',
                Opcode::Mul => '*',
                Opcode::Div => '/',
                _ => '+',
            };
            format!("{op} stores the result of register {rs1} {symbol} register {rs2} in register {rd}")
        }
        (op, None) => format!("{op} stores the result of register {rs1} in register {rd}"),
    }
}
