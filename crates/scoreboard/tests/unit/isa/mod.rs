//! Unit tests for the instruction set: text decoding and rendering.

/// Decoder acceptance and error reporting.
pub mod decode;

/// Canonical text and plain-English descriptions.
pub mod disasm;
