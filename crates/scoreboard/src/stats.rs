//! Simulation statistics collection and reporting.
//!
//! This module tracks scheduling metrics for a scoreboard run. It provides:
//! 1. **Cycles and CPI:** Total cycles, completed instructions and derived metrics.
//! 2. **Stalls:** Stall counts by cause (structural, WAW, RAW, WAR, write bus).
//! 3. **Unit utilization:** Busy unit-cycles per functional-unit class.
//!
//! Stall counters are per instruction-cycle: an instruction that waits three
//! cycles for an operand adds three to `stalls_raw`. Issue stalls are counted once
//! per cycle since only the head instruction attempts issue.

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::units::{FunctionalUnitPool, UnitClass};

/// Busy-cycle accounting for one unit class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitUsage {
    /// Unit class.
    pub class: UnitClass,
    /// Configured number of units.
    pub capacity: usize,
    /// Sum over cycles of the number of busy units of this class.
    pub busy_cycles: u64,
    /// Highest number of simultaneously busy units observed.
    pub peak_busy: usize,
}

impl UnitUsage {
    /// Fraction of available unit-cycles that were busy, in percent.
    pub fn utilization(&self, cycles: u64) -> f64 {
        let available = cycles * self.capacity as u64;
        if available == 0 {
            0.0
        } else {
            100.0 * self.busy_cycles as f64 / available as f64
        }
    }
}

/// Simulation statistics structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Instructions in the program.
    pub instructions: u64,
    /// Instructions that completed Write-Result.
    pub completed: u64,

    /// Cycles the head instruction could not issue: no free unit of its class.
    pub stalls_structural: u64,
    /// Cycles the head instruction could not issue: destination still pending.
    pub stalls_waw: u64,
    /// Instruction-cycles spent issued but waiting for operands.
    pub stalls_raw: u64,
    /// Instruction-cycles a finished result waited for an older reader (WAR).
    pub stalls_war: u64,
    /// Instruction-cycles a finished result waited for the write-result bus.
    pub stalls_write_bus: u64,

    /// Per-class unit usage, in class order.
    pub units: Vec<UnitUsage>,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"stalls"`, `"units"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "units"];

impl SimStats {
    /// Empty statistics for a program of `instructions` running on `pool`.
    pub fn new(instructions: usize, pool: &FunctionalUnitPool) -> Self {
        let units = UnitClass::ALL
            .into_iter()
            .filter(|&class| pool.has_class(class))
            .map(|class| UnitUsage {
                class,
                capacity: pool.capacity(class),
                busy_cycles: 0,
                peak_busy: 0,
            })
            .collect();
        Self {
            instructions: instructions as u64,
            units,
            ..Self::default()
        }
    }

    /// Samples unit occupancy at the end of a cycle.
    pub fn sample_units(&mut self, pool: &FunctionalUnitPool) {
        for usage in &mut self.units {
            let busy = pool.busy_count(usage.class);
            usage.busy_cycles += busy as u64;
            usage.peak_busy = usage.peak_busy.max(busy);
        }
    }

    /// Cycles per completed instruction, or `None` before anything completes.
    pub fn cpi(&self) -> Option<f64> {
        (self.completed > 0).then(|| self.cycles as f64 / self.completed as f64)
    }

    /// Total stall events across every cause.
    pub const fn total_stalls(&self) -> u64 {
        self.stalls_structural
            + self.stalls_waw
            + self.stalls_raw
            + self.stalls_war
            + self.stalls_write_bus
    }

    /// Renders the requested sections. Pass an empty slice for all of them.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1);
        let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;
        let mut out = String::new();

        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "SCOREBOARD SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions);
            let _ = writeln!(out, "sim_completed            {}", self.completed);
            match self.cpi() {
                Some(cpi) => {
                    let _ = writeln!(out, "sim_cpi                  {cpi:.4}");
                }
                None => {
                    let _ = writeln!(out, "sim_cpi                  n/a");
                }
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("stalls") {
            let _ = writeln!(out, "STALL BREAKDOWN");
            for (name, n) in [
                ("stalls.structural", self.stalls_structural),
                ("stalls.waw", self.stalls_waw),
                ("stalls.raw", self.stalls_raw),
                ("stalls.war", self.stalls_war),
                ("stalls.write_bus", self.stalls_write_bus),
            ] {
                let _ = writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("units") {
            let _ = writeln!(out, "FUNCTIONAL UNITS");
            for usage in &self.units {
                let _ = writeln!(
                    out,
                    "  {:<10} units: {:<3} | busy: {:<8} | peak: {:<3} | util: {:.2}%",
                    usage.class.name(),
                    usage.capacity,
                    usage.busy_cycles,
                    usage.peak_busy,
                    usage.utilization(self.cycles)
                );
            }
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
