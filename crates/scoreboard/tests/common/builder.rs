//! Fluent builders for test programs and machine configurations.

use sbsim_core::common::reg::Register;
use sbsim_core::config::{Config, UnitsConfig};
use sbsim_core::core::units::UnitClass;
use sbsim_core::isa::{Instruction, Opcode};

/// Builds a program instruction by instruction. Register arguments are indices:
/// `f` registers for data, `x` registers for load/store bases.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Vec<Instruction>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fld(mut self, rd: u8, imm: i64, base: u8) -> Self {
        self.program
            .push(Instruction::load(Register::float(rd), imm, Register::int(base)));
        self
    }

    pub fn fsd(mut self, value: u8, imm: i64, base: u8) -> Self {
        self.program
            .push(Instruction::store(Register::float(value), imm, Register::int(base)));
        self
    }

    pub fn arith(mut self, op: Opcode, rd: u8, rs1: u8, rs2: u8) -> Self {
        self.program.push(Instruction::arith(
            op,
            Register::float(rd),
            Register::float(rs1),
            Register::float(rs2),
        ));
        self
    }

    pub fn fadd(self, rd: u8, rs1: u8, rs2: u8) -> Self {
        self.arith(Opcode::Add, rd, rs1, rs2)
    }

    pub fn fsub(self, rd: u8, rs1: u8, rs2: u8) -> Self {
        self.arith(Opcode::Sub, rd, rs1, rs2)
    }

    pub fn fmul(self, rd: u8, rs1: u8, rs2: u8) -> Self {
        self.arith(Opcode::Mul, rd, rs1, rs2)
    }

    pub fn fdiv(self, rd: u8, rs1: u8, rs2: u8) -> Self {
        self.arith(Opcode::Div, rd, rs1, rs2)
    }

    pub fn build(self) -> Vec<Instruction> {
        self.program
    }
}

/// Builds a unit table starting from the default machine.
#[derive(Debug)]
pub struct MachineBuilder {
    units: UnitsConfig,
    max_cycles: Option<u64>,
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self {
            units: UnitsConfig::default(),
            max_cycles: None,
        }
    }
}

impl MachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a machine with no units at all.
    pub fn bare() -> Self {
        Self {
            units: UnitsConfig::empty(),
            max_cycles: None,
        }
    }

    pub fn class(mut self, class: UnitClass, capacity: usize, latency: u64) -> Self {
        self.units = self.units.with(class, capacity, latency);
        self
    }

    pub fn without(mut self, class: UnitClass) -> Self {
        self.units = self.units.without(class);
        self
    }

    pub fn max_cycles(mut self, limit: u64) -> Self {
        self.max_cycles = Some(limit);
        self
    }

    pub fn build(self) -> Config {
        let mut config = Config::with_units(self.units);
        config.general.max_cycles = self.max_cycles;
        config
    }
}
