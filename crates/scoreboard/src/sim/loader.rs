//! Input loading.
//!
//! Reads program and configuration files from disk. It performs:
//! 1. **Program loading:** Reads an assembly listing and decodes it.
//! 2. **Configuration loading:** Reads a `.json` file through serde, anything else
//!    as the plain `<class> <capacity> <latency>` table.

use std::fs;
use std::path::Path;

use crate::common::error::Error;
use crate::config::Config;
use crate::isa::{Instruction, decode_program};

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and decodes a program listing.
///
/// # Errors
///
/// `Error::Io` if the file cannot be read, `Error::Parse` for the first malformed
/// line.
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<Instruction>, Error> {
    let path = path.as_ref();
    let program = decode_program(&read(path)?)?;
    tracing::debug!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}

/// Reads and validates a functional-unit configuration.
///
/// # Errors
///
/// `Error::Io` if the file cannot be read, `Error::Config` if it is malformed or
/// invalid.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, Error> {
    let path = path.as_ref();
    let text = read(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        Config::from_json(&text)?
    } else {
        Config::from_table(&text)?
    };
    tracing::debug!(
        path = %path.display(),
        units = config.units.total_units(),
        "configuration loaded"
    );
    Ok(config)
}
