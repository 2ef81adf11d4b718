//! Shared test infrastructure.

/// Fluent builders for programs and unit tables.
pub mod builder;

/// Logging setup and simulation helpers.
pub mod harness;
