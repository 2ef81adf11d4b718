//! Scoreboard simulator CLI.
//!
//! This binary provides the command-line entry point. It performs:
//! 1. **Run:** Decode a program, simulate it on a configured machine and print the
//!    stage table (or JSON), optionally with statistics and a per-cycle trace.
//! 2. **Explain:** Print a plain-English description of every instruction.
//!
//! Exit status is 0 on success and 1 on any parse, configuration, I/O or
//! simulation error. A simulation error still prints the partial stage table.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sbsim_core::common::error::Error;
use sbsim_core::config::Config;
use sbsim_core::isa::disasm::describe;
use sbsim_core::sim::loader::{load_config, load_program};
use sbsim_core::sim::{CycleTrace, SimReport, Simulator};
use sbsim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "sbsim",
    author,
    version,
    about = "Cycle-level scoreboard dynamic scheduling simulator",
    long_about = "Simulate a floating-point program on a CDC 6600 style scoreboard and print\nthe cycle at which every instruction issues, reads its operands, completes\nexecution and writes its result.\n\nExamples:\n  sbsim run -p demos/example.s\n  sbsim run -p demos/example.s -c demos/conf.s --stats\n  sbsim run -p demos/example.s --json\n  sbsim explain -p demos/example.s"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a program and print its stage table.
    Run {
        /// Program listing (one instruction per line).
        #[arg(short, long)]
        program: PathBuf,

        /// Unit configuration: `.json`, or a `<class> <capacity> <latency>` table.
        /// Defaults to one unit per class with latencies 1/2/10/20.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON instead of tables.
        #[arg(long)]
        json: bool,

        /// Print run statistics after the stage table.
        #[arg(long)]
        stats: bool,

        /// Statistics sections to print (summary, stalls, units). Implies --stats.
        #[arg(long, value_delimiter = ',', value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        sections: Vec<String>,

        /// Record and print what happened in every cycle.
        #[arg(long)]
        trace: bool,

        /// Stop after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,
    },

    /// Describe every instruction of a program in plain English.
    Explain {
        /// Program listing.
        #[arg(short, long)]
        program: PathBuf,
    },
}

/// Options of the `run` subcommand after parsing.
#[derive(Debug)]
struct RunOptions {
    program: PathBuf,
    config: Option<PathBuf>,
    json: bool,
    stats: bool,
    sections: Vec<String>,
    trace: bool,
    max_cycles: Option<u64>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a SimReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "<[CycleTrace]>::is_empty")]
    trace: &'a [CycleTrace],
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            program,
            config,
            json,
            stats,
            sections,
            trace,
            max_cycles,
        } => cmd_run(&RunOptions {
            program,
            config,
            json,
            stats,
            sections,
            trace,
            max_cycles,
        }),
        Commands::Explain { program } => cmd_explain(&program),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Filter used when `RUST_LOG` is unset. `-v` raises only the engine's level; the
/// binary's own warnings and errors stay visible at every verbosity.
const fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,sbsim_core=debug",
        _ => "warn,sbsim_core=trace",
    }
}

fn init_logging(verbose: u8) {
    let default = default_filter(verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads inputs, runs the simulation and prints the outcome.
///
/// On a simulation error the partial report is printed before the error is
/// returned, so the caller only has to set the exit status.
fn cmd_run(opts: &RunOptions) -> Result<(), Error> {
    let program = load_program(&opts.program)?;
    let mut config = match &opts.config {
        Some(path) => load_config(path)?,
        None => {
            tracing::info!("no configuration given, using the default machine");
            Config::default()
        }
    };
    config.general.trace_cycles |= opts.trace;
    if let Some(limit) = opts.max_cycles {
        config.general.max_cycles = Some(limit);
    }

    let mut sim = Simulator::new(program, &config)?;
    let outcome = sim.run();
    let report = match &outcome {
        Ok(report) => report,
        Err(e) => e.report(),
    };

    if opts.json {
        let output = JsonOutput {
            report,
            error: outcome.as_ref().err().map(ToString::to_string),
            trace: sim.trace(),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => tracing::error!(error = %e, "could not serialize report"),
        }
    } else {
        if opts.trace {
            print_trace(&sim);
        }
        println!("{report}");
        if opts.stats || !opts.sections.is_empty() {
            println!();
            report.stats.print_sections(&opts.sections);
        }
    }

    outcome.map(|_| ()).map_err(Error::from)
}

fn print_trace(sim: &Simulator) {
    let text = |i: usize| sim.engine().program()[i].text.as_str();
    for entry in sim.trace() {
        let ev = &entry.events;
        let mut parts = Vec::new();
        if let Some(i) = ev.written {
            parts.push(format!("write {}", text(i)));
        }
        for &i in &ev.completed {
            parts.push(format!("complete {}", text(i)));
        }
        for &i in &ev.read {
            parts.push(format!("read {}", text(i)));
        }
        if let Some(i) = ev.issued {
            parts.push(format!("issue {}", text(i)));
        }
        if let Some((i, reason)) = ev.issue_stall {
            parts.push(format!("stall {} ({reason:?})", text(i)));
        }
        if parts.is_empty() {
            parts.push(String::from("idle"));
        }
        println!("cycle {:>4}: {}", entry.cycle, parts.join("; "));
    }
    println!();
}

fn cmd_explain(path: &Path) -> Result<(), Error> {
    let program = load_program(path)?;
    for (i, inst) in program.iter().enumerate() {
        println!("{:>3}  {:<24} {}", i + 1, inst.text, describe(inst));
    }
    Ok(())
}
