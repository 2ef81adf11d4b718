//! Scoreboard engine: hazard detection and stage advancement.
//!
//! The engine owns one row per instruction, the register status table and the
//! functional-unit pool. Each call to [`ScoreboardEngine::step`] evaluates one
//! cycle in a fixed phase order:
//!
//! 1. **Write-Result:** The oldest finished instruction whose destination no
//!    occupied unit still has to read (WAR) takes the single result bus.
//! 2. **Execute:** Every executing unit counts down; reaching zero records
//!    execute-complete. A result is never written in its completion cycle.
//! 3. **Read-Operands:** Every issued instruction whose producers have all
//!    written reads its operands and starts executing.
//! 4. **Issue:** The oldest unissued instruction issues if a unit of its class is
//!    free and its destination has no pending producer (WAW). A stall at the head
//!    blocks every younger instruction for the cycle.
//!
//! Running the phases in this order makes a unit or register freed in Write-Result
//! visible to Read-Operands and Issue in the same cycle.

use serde::Serialize;

use crate::common::error::ConfigError;
use crate::config::UnitsConfig;
use crate::core::pipeline::row::{ScoreboardRow, Stage};
use crate::core::pipeline::scoreboard::RegisterStatusTable;
use crate::core::units::{FunctionalUnitPool, UnitId};
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Why the head instruction did not issue this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStall {
    /// Every unit of the required class is busy.
    Structural,
    /// An in-flight instruction still has to write the same destination.
    Waw,
}

/// Everything that happened in one cycle, by program-order index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleEvents {
    /// Instruction that wrote its result.
    pub written: Option<usize>,
    /// Instructions that recorded execute-complete.
    pub completed: Vec<usize>,
    /// Instructions that read their operands.
    pub read: Vec<usize>,
    /// Instruction that issued.
    pub issued: Option<usize>,
    /// Head instruction and the reason it could not issue.
    pub issue_stall: Option<(usize, IssueStall)>,
    /// Number of units whose execution countdown advanced.
    pub executing: usize,
}

impl CycleEvents {
    /// Whether any instruction changed state this cycle.
    ///
    /// An execution countdown counts as progress, so long-latency units never look
    /// idle to the deadlock detector.
    pub fn made_progress(&self) -> bool {
        self.written.is_some()
            || self.issued.is_some()
            || !self.completed.is_empty()
            || !self.read.is_empty()
            || self.executing > 0
    }
}

/// Hazard-aware scoreboard state machine for one program.
#[derive(Debug, Clone)]
pub struct ScoreboardEngine {
    program: Vec<Instruction>,
    rows: Vec<ScoreboardRow>,
    regs: RegisterStatusTable,
    pool: FunctionalUnitPool,
    /// Program-order index of the next instruction to issue.
    next_issue: usize,
    stats: SimStats,
}

impl ScoreboardEngine {
    /// Loads `program` onto a machine built from `units`.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the table has a zero capacity or latency, if an instruction
    /// names a register outside the register files, or if any opcode in the
    /// program needs a class the table does not configure. Nothing is simulated in
    /// that case.
    pub fn load(program: Vec<Instruction>, units: &UnitsConfig) -> Result<Self, ConfigError> {
        units.validate()?;
        for (index, inst) in program.iter().enumerate() {
            let mut operands = inst.rd.into_iter().chain(inst.sources());
            if let Some(register) = operands.find(|r| !r.in_range()) {
                return Err(ConfigError::RegisterOutOfRange {
                    index,
                    text: inst.text.clone(),
                    register,
                });
            }
        }
        let pool = FunctionalUnitPool::new(units);
        if let Some(inst) = program.iter().find(|i| !pool.has_class(i.op.unit_class())) {
            return Err(ConfigError::MissingClass {
                class: inst.op.unit_class(),
                opcode: inst.op.mnemonic().to_string(),
            });
        }

        let rows = (0..program.len()).map(ScoreboardRow::new).collect();
        let stats = SimStats::new(program.len(), &pool);
        tracing::debug!(
            instructions = program.len(),
            units = pool.units().len(),
            "scoreboard loaded"
        );
        Ok(Self {
            program,
            rows,
            regs: RegisterStatusTable::new(),
            pool,
            next_issue: 0,
            stats,
        })
    }

    /// Evaluates one cycle. `cycle` is the 1-based cycle number being simulated.
    pub fn step(&mut self, cycle: u64) -> CycleEvents {
        let mut events = CycleEvents::default();
        self.write_result(cycle, &mut events);
        self.execute(cycle, &mut events);
        self.read_operands(cycle, &mut events);
        self.issue(cycle, &mut events);

        self.stats.cycles = cycle;
        self.stats.sample_units(&self.pool);
        events
    }

    /// Phase 1: at most one result per cycle on the shared bus.
    fn write_result(&mut self, cycle: u64, events: &mut CycleEvents) {
        let mut winner = None;
        for row in self.rows.iter().filter(|r| r.ready_to_write(cycle)) {
            let war_blocked = self.program[row.index]
                .effective_rd()
                .is_some_and(|rd| self.pool.has_pending_reader(rd));
            if war_blocked {
                self.stats.stalls_war += 1;
                tracing::trace!(cycle, index = row.index, "write-result stalled: WAR");
            } else if winner.is_none() {
                winner = Some(row.index);
            } else {
                self.stats.stalls_write_bus += 1;
                tracing::trace!(cycle, index = row.index, "write-result stalled: bus busy");
            }
        }

        let Some(index) = winner else {
            return;
        };
        let row = &mut self.rows[index];
        let Some(unit) = row.unit else {
            return;
        };
        row.record_write_result(cycle);
        if let Some(rd) = self.program[index].effective_rd() {
            if !self.regs.clear_if(rd, unit) {
                tracing::error!(
                    cycle,
                    index,
                    %rd,
                    "register status out of sync with write-result"
                );
            }
        }
        self.pool.broadcast(unit);
        self.pool.release(unit);
        self.stats.completed += 1;
        events.written = Some(index);
        tracing::debug!(cycle, index, unit = %self.pool.unit(unit).name, "write result");
    }

    /// Phase 2: count down every executing unit.
    fn execute(&mut self, cycle: u64, events: &mut CycleEvents) {
        for row in &mut self.rows {
            if row.stage != Stage::Executing || row.times.execute_complete.is_some() {
                continue;
            }
            let Some(unit) = row.unit else {
                continue;
            };
            events.executing += 1;
            if self.pool.tick_execute(unit) {
                row.record_execute_complete(cycle);
                events.completed.push(row.index);
                tracing::debug!(cycle, index = row.index, "execute complete");
            }
        }
    }

    /// Phase 3: read operands for every issued instruction whose producers wrote.
    fn read_operands(&mut self, cycle: u64, events: &mut CycleEvents) {
        for row in &mut self.rows {
            if row.stage != Stage::Issued {
                continue;
            }
            let Some(unit) = row.unit else {
                continue;
            };
            if self.pool.unit(unit).operands_ready() {
                row.record_read_operands(cycle);
                self.pool.begin_execute(unit);
                events.read.push(row.index);
                tracing::debug!(cycle, index = row.index, "read operands");
            } else {
                self.stats.stalls_raw += 1;
                tracing::trace!(cycle, index = row.index, "read-operands stalled: RAW");
            }
        }
    }

    /// Phase 4: in-order issue of at most one instruction.
    fn issue(&mut self, cycle: u64, events: &mut CycleEvents) {
        let index = self.next_issue;
        let Some(inst) = self.program.get(index) else {
            return;
        };
        let class = inst.op.unit_class();
        let rd = inst.effective_rd();

        if self.pool.busy_count(class) >= self.pool.capacity(class) {
            self.stats.stalls_structural += 1;
            events.issue_stall = Some((index, IssueStall::Structural));
            tracing::trace!(cycle, index, %class, "issue stalled: no free unit");
            return;
        }
        if rd.is_some_and(|rd| self.regs.producer_of(rd).is_some()) {
            self.stats.stalls_waw += 1;
            events.issue_stall = Some((index, IssueStall::Waw));
            tracing::trace!(cycle, index, "issue stalled: WAW");
            return;
        }
        let Some(unit) = self.pool.allocate(class, index) else {
            tracing::error!(cycle, index, %class, "unit pool out of sync with issue check");
            return;
        };

        // Operand producers are captured before the destination is reserved, so an
        // instruction that reads its own destination waits for the previous writer.
        let qj = inst.rs1.and_then(|r| self.regs.producer_of(r));
        let qk = inst.rs2.and_then(|r| self.regs.producer_of(r));
        self.pool.assign(unit, inst, qj, qk);
        if let Some(rd) = rd {
            if let Err(conflict) = self.regs.reserve(rd, unit) {
                tracing::error!(%conflict, "register status out of sync with issue check");
            }
        }

        self.rows[index].record_issue(cycle, unit);
        self.next_issue += 1;
        events.issued = Some(index);
        tracing::debug!(cycle, index, unit = %self.pool.unit(unit).name, "issue");
    }

    /// Every instruction has written its result.
    pub fn is_done(&self) -> bool {
        self.rows.iter().all(ScoreboardRow::is_done)
    }

    /// The loaded program.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// Per-instruction rows in program order.
    pub fn rows(&self) -> &[ScoreboardRow] {
        &self.rows
    }

    /// Functional-unit pool.
    pub const fn pool(&self) -> &FunctionalUnitPool {
        &self.pool
    }

    /// Register status table.
    pub const fn registers(&self) -> &RegisterStatusTable {
        &self.regs
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Display name of a unit.
    pub fn unit_name(&self, id: UnitId) -> &str {
        &self.pool.unit(id).name
    }

    #[cfg(test)]
    pub(crate) const fn pool_mut(&mut self) -> &mut FunctionalUnitPool {
        &mut self.pool
    }

    #[cfg(test)]
    pub(crate) const fn registers_mut(&mut self) -> &mut RegisterStatusTable {
        &mut self.regs
    }
}
