//! # Decoder Tests
//!
//! Operand formats, separators, comments and every error variant with its line.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sbsim_core::common::error::ParseError;
use sbsim_core::common::reg::Register;
use sbsim_core::core::units::UnitClass;
use sbsim_core::isa::decode::decode_line;
use sbsim_core::isa::{Opcode, decode_program};

#[rstest]
#[case("fld f6, 34(x2)", Opcode::Load)]
#[case("FLD F6,34(X2)", Opcode::Load)]
#[case("fsd f6, 0(x2)", Opcode::Store)]
#[case("fadd f1, f2, f3", Opcode::Add)]
#[case("fsub f1 f2 f3", Opcode::Sub)]
#[case("fmul\tf1,\tf2,\tf3", Opcode::Mul)]
#[case("fdiv f1,f2,f3", Opcode::Div)]
fn test_accepts_every_opcode(#[case] text: &str, #[case] op: Opcode) {
    let inst = decode_line(1, text).unwrap().unwrap();
    assert_eq!(inst.op, op);
}

#[rstest]
#[case(Opcode::Load, UnitClass::Address)]
#[case(Opcode::Store, UnitClass::Address)]
#[case(Opcode::Add, UnitClass::Adder)]
#[case(Opcode::Sub, UnitClass::Adder)]
#[case(Opcode::Mul, UnitClass::Multiplier)]
#[case(Opcode::Div, UnitClass::Divider)]
fn test_opcode_unit_class(#[case] op: Opcode, #[case] class: UnitClass) {
    assert_eq!(op.unit_class(), class);
}

#[test]
fn test_textbook_program() {
    let program = decode_program(
        "# H&P scoreboard example\n\
         fld f6, 34(x2)\n\
         fld f2, 45(x3)\n\
         \n\
         fadd f4, f2, f6   ; consumer\n",
    )
    .unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(program[2].rd, Some(Register::float(4)));
    assert_eq!(program[2].rs1, Some(Register::float(2)));
    assert_eq!(program[2].rs2, Some(Register::float(6)));
    assert_eq!(program[1].imm, Some(45));
    assert_eq!(program[2].text, "fadd f4, f2, f6");
}

#[test]
fn test_negative_displacement() {
    let inst = decode_line(1, "fld f0, -16(x4)").unwrap().unwrap();
    assert_eq!(inst.imm, Some(-16));
    assert_eq!(inst.rs1, Some(Register::int(4)));
}

#[test]
fn test_two_operand_arith_has_no_rs2() {
    let inst = decode_line(1, "fadd f1, f2").unwrap().unwrap();
    assert_eq!(inst.rs2, None);
    assert_eq!(inst.sources().collect::<Vec<_>>(), vec![Register::float(2)]);
}

#[test]
fn test_empty_program() {
    assert_eq!(decode_program("").unwrap(), vec![]);
    assert_eq!(decode_program("\n  \n# nothing\n").unwrap(), vec![]);
}

#[rstest]
#[case("fmadd f1, f2, f3", ParseError::UnknownOpcode { line: 1, opcode: "fmadd".into() })]
#[case("fld f1", ParseError::OperandCount { line: 1, opcode: "fld".into(), expected: 2, found: 1 })]
#[case("fmul f1", ParseError::OperandCount { line: 1, opcode: "fmul".into(), expected: 3, found: 1 })]
#[case("fadd f1, f2, f3, f4", ParseError::OperandCount { line: 1, opcode: "fadd".into(), expected: 3, found: 4 })]
#[case("fadd f1, f2, r3", ParseError::InvalidRegister { line: 1, token: "r3".into() })]
#[case("fadd f32, f2, f3", ParseError::InvalidRegister { line: 1, token: "f32".into() })]
#[case("fld f1, 8x2", ParseError::InvalidMemoryOperand { line: 1, token: "8x2".into() })]
#[case("fld f1, 8(x2", ParseError::InvalidMemoryOperand { line: 1, token: "8(x2".into() })]
#[case("fsd f1, abc(x2)", ParseError::InvalidImmediate { line: 1, token: "abc".into() })]
#[case("fsd f1, 4(q2)", ParseError::InvalidRegister { line: 1, token: "q2".into() })]
fn test_decode_errors(#[case] text: &str, #[case] expected: ParseError) {
    assert_eq!(decode_line(1, text).unwrap_err(), expected);
}

#[test]
fn test_error_carries_source_line() {
    let err = decode_program("fld f1, 0(x1)\n# comment\n\nfadd f1, f2, fx\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidRegister {
            line: 4,
            token: "fx".into()
        }
    );
    assert_eq!(err.to_string(), "line 4: invalid register `fx`");
}
