//! Assembly line decoder.
//!
//! Turns the textual program format into `Instruction` records. It performs:
//! 1. **Tokenizing:** Commas and whitespace both separate operands; `#` and `;`
//!    start a comment; blank lines are skipped.
//! 2. **Format dispatch:** `fld rd, imm(rs1)`, `fsd rs2, imm(rs1)` and
//!    `op rd, rs1[, rs2]` for arithmetic.
//! 3. **Validation:** Fails fast on the first malformed line with its line number.

use crate::common::error::ParseError;
use crate::common::reg::Register;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;

/// Decodes a whole program, one instruction per non-empty line.
///
/// # Errors
///
/// Returns the first `ParseError` encountered; no partial program is returned.
pub fn decode_program(source: &str) -> Result<Vec<Instruction>, ParseError> {
    let mut program = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        if let Some(inst) = decode_line(idx + 1, line)? {
            program.push(inst);
        }
    }
    Ok(program)
}

/// Decodes a single line. Returns `Ok(None)` for blank or comment-only lines.
///
/// # Errors
///
/// Returns a `ParseError` tagged with `line` if the text is malformed.
pub fn decode_line(line: usize, text: &str) -> Result<Option<Instruction>, ParseError> {
    let code = text
        .split(['#', ';'])
        .next()
        .unwrap_or_default()
        .trim();
    if code.is_empty() {
        return Ok(None);
    }

    let normalized = code.replace(',', " ");
    let mut tokens = normalized.split_whitespace();
    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };
    let op: Opcode = mnemonic.parse().map_err(|()| ParseError::UnknownOpcode {
        line,
        opcode: mnemonic.to_string(),
    })?;
    let operands: Vec<&str> = tokens.collect();

    let arity_error = |expected: usize| ParseError::OperandCount {
        line,
        opcode: op.mnemonic().to_string(),
        expected,
        found: operands.len(),
    };

    let mut inst = match op {
        Opcode::Load | Opcode::Store => {
            let [reg, mem] = operands[..] else {
                return Err(arity_error(2));
            };
            let reg = parse_register(line, reg)?;
            let (imm, base) = parse_memory_operand(line, mem)?;
            if op == Opcode::Load {
                Instruction::load(reg, imm, base)
            } else {
                Instruction::store(reg, imm, base)
            }
        }
        _ => match operands[..] {
            [rd, rs1, rs2] => Instruction::arith(
                op,
                parse_register(line, rd)?,
                parse_register(line, rs1)?,
                parse_register(line, rs2)?,
            ),
            [rd, rs1] => {
                let rs1 = parse_register(line, rs1)?;
                let mut inst = Instruction::arith(op, parse_register(line, rd)?, rs1, rs1);
                inst.rs2 = None;
                inst
            }
            _ => return Err(arity_error(3)),
        },
    };
    inst.text = code.to_string();
    Ok(Some(inst))
}

fn parse_register(line: usize, token: &str) -> Result<Register, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidRegister {
        line,
        token: token.to_string(),
    })
}

/// Parses `imm(reg)`. An empty displacement means zero, as in `(x2)`.
fn parse_memory_operand(line: usize, token: &str) -> Result<(i64, Register), ParseError> {
    let malformed = || ParseError::InvalidMemoryOperand {
        line,
        token: token.to_string(),
    };
    let (imm, rest) = token.split_once('(').ok_or_else(malformed)?;
    let base = rest.strip_suffix(')').ok_or_else(malformed)?;
    let imm = if imm.is_empty() {
        0
    } else {
        imm.parse().map_err(|_| ParseError::InvalidImmediate {
            line,
            token: imm.to_string(),
        })?
    };
    Ok((imm, parse_register(line, base)?))
}
