//! Logging setup and one-call simulation helpers.

use std::sync::Once;

use sbsim_core::config::Config;
use sbsim_core::isa::{Instruction, decode_program};
use sbsim_core::sim::{SimReport, Simulator};

static TRACING: Once = Once::new();

/// Routes engine logs to the test writer. Set `RUST_LOG=sbsim_core=trace` to see them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Runs `program` to completion, panicking on any error.
pub fn run(program: Vec<Instruction>, config: &Config) -> SimReport {
    init_tracing();
    let mut sim = Simulator::new(program, config).unwrap();
    sim.run().unwrap()
}

/// Decodes and runs `source` on `config`.
pub fn run_source(source: &str, config: &Config) -> SimReport {
    run(decode_program(source).unwrap(), config)
}

/// Stage timestamps of every row, in program order.
pub fn table(report: &SimReport) -> Vec<[Option<u64>; 4]> {
    report.rows.iter().map(|r| r.times.as_array()).collect()
}

/// Shorthand for a fully completed row.
pub const fn done(issue: u64, read: u64, exec: u64, write: u64) -> [Option<u64>; 4] {
    [Some(issue), Some(read), Some(exec), Some(write)]
}
