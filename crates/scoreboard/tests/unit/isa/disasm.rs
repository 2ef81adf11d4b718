//! # Rendering Tests
//!
//! Canonical assembly text and the `explain` descriptions.

use sbsim_core::isa::decode::decode_line;
use sbsim_core::isa::disasm::describe;

fn decode(text: &str) -> sbsim_core::isa::Instruction {
    decode_line(1, text).unwrap().unwrap()
}

#[test]
fn test_canonical_text_normalizes_spacing() {
    assert_eq!(decode("FLD   F6,34(X2)").to_string(), "fld f6, 34(x2)");
    assert_eq!(decode("fmul f0 f2 f4").to_string(), "fmul f0, f2, f4");
    assert_eq!(decode("fsd f4, (x1)").to_string(), "fsd f4, 0(x1)");
}

#[test]
fn test_source_text_is_preserved() {
    assert_eq!(decode("fmul f0 f2 f4 # scale").text, "fmul f0 f2 f4");
}

#[test]
fn test_describe_memory_operations() {
    assert_eq!(
        describe(&decode("fld f6, 34(x2)")),
        "fld loads a value into register f6 from the memory address 34 + x2"
    );
    assert_eq!(
        describe(&decode("fsd f4, 8(x1)")),
        "fsd stores the value from register f4 into the memory address 8 + x1"
    );
}

#[test]
fn test_describe_arithmetic_operators() {
    assert_eq!(
        describe(&decode("fadd f4, f2, f6")),
        "fadd stores the result of register f2 + register f6 in register f4"
    );
    assert_eq!(
        describe(&decode("fmul f0, f2, f4")),
        "fmul stores the result of register f2 * register f4 in register f0"
    );
    assert_eq!(
        describe(&decode("fdiv f10, f0, f6")),
        "fdiv stores the result of register f0 / register f6 in register f10"
    );
}
