//! Functional-unit pool.
//!
//! Holds every functional unit of the machine, grouped by class, together with the
//! classic scoreboard status fields of the instruction each unit currently holds:
//!
//! | field | meaning                                                     |
//! |-------|-------------------------------------------------------------|
//! | `fi`  | destination register                                        |
//! | `fj`  | first source register                                       |
//! | `fk`  | second source register                                      |
//! | `qj`  | unit producing `fj`, if it has not written yet              |
//! | `qk`  | unit producing `fk`, if it has not written yet              |
//! | `rj`  | `fj` is available and has not been read yet                 |
//! | `rk`  | `fk` is available and has not been read yet                 |
//!
//! Unit ids are dense and assigned in class order, so "lowest free id" is both the
//! allocation tie-break and a stable display order.

use std::fmt;

use serde::Serialize;

use crate::common::reg::Register;
use crate::config::UnitsConfig;
use crate::core::units::UnitClass;
use crate::isa::{Instruction, Opcode};

/// Stable identifier of a functional unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UnitId(pub usize);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One functional unit and the status of its occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionalUnit {
    /// Stable id.
    pub id: UnitId,
    /// Display name, e.g. `adder_1`.
    pub name: String,
    /// Class of the unit.
    pub class: UnitClass,
    /// Execution latency in cycles (fixed per class).
    pub latency: u64,
    /// Whether an instruction occupies the unit.
    pub busy: bool,
    /// Program-order index of the occupant.
    pub occupant: Option<usize>,
    /// Operation being performed.
    pub op: Option<Opcode>,
    /// Destination register.
    pub fi: Option<Register>,
    /// First source register.
    pub fj: Option<Register>,
    /// Second source register.
    pub fk: Option<Register>,
    /// Pending producer of `fj`.
    pub qj: Option<UnitId>,
    /// Pending producer of `fk`.
    pub qk: Option<UnitId>,
    /// `fj` available and not yet read.
    pub rj: bool,
    /// `fk` available and not yet read.
    pub rk: bool,
    /// Cycles left until execute-complete; `None` until operands are read.
    pub remaining: Option<u64>,
}

impl FunctionalUnit {
    fn new(id: UnitId, class: UnitClass, ordinal: usize, latency: u64) -> Self {
        Self {
            id,
            name: format!("{class}_{ordinal}"),
            class,
            latency,
            busy: false,
            occupant: None,
            op: None,
            fi: None,
            fj: None,
            fk: None,
            qj: None,
            qk: None,
            rj: false,
            rk: false,
            remaining: None,
        }
    }

    fn clear(&mut self) {
        self.busy = false;
        self.occupant = None;
        self.op = None;
        self.fi = None;
        self.fj = None;
        self.fk = None;
        self.qj = None;
        self.qk = None;
        self.rj = false;
        self.rk = false;
        self.remaining = None;
    }

    /// Both operands have been produced (no pending `qj`/`qk`).
    pub const fn operands_ready(&self) -> bool {
        self.qj.is_none() && self.qk.is_none()
    }

    /// True if the occupant still has to read `reg` (available but unread).
    ///
    /// A writer of `reg` must not publish its result while any unit reports this.
    pub fn still_reads(&self, reg: Register) -> bool {
        self.busy && ((self.fj == Some(reg) && self.rj) || (self.fk == Some(reg) && self.rk))
    }
}

/// Per-class bookkeeping.
#[derive(Debug, Clone)]
struct ClassSlot {
    class: UnitClass,
    /// First unit id of the class.
    first: usize,
    capacity: usize,
}

/// All functional units of the machine.
#[derive(Debug, Clone)]
pub struct FunctionalUnitPool {
    units: Vec<FunctionalUnit>,
    classes: Vec<ClassSlot>,
}

impl FunctionalUnitPool {
    /// Builds the pool described by `config`. Classes absent from the
    /// configuration simply have no units.
    pub fn new(config: &UnitsConfig) -> Self {
        let mut units = Vec::with_capacity(config.total_units());
        let mut classes = Vec::new();
        for (class, cfg) in config.iter() {
            classes.push(ClassSlot {
                class,
                first: units.len(),
                capacity: cfg.capacity,
            });
            for ordinal in 1..=cfg.capacity {
                let id = UnitId(units.len());
                units.push(FunctionalUnit::new(id, class, ordinal, cfg.latency));
            }
        }
        Self { units, classes }
    }

    fn slot(&self, class: UnitClass) -> Option<&ClassSlot> {
        self.classes.iter().find(|s| s.class == class)
    }

    /// Whether at least one unit of `class` exists.
    pub fn has_class(&self, class: UnitClass) -> bool {
        self.slot(class).is_some_and(|s| s.capacity > 0)
    }

    /// Configured number of units of `class` (zero if absent).
    pub fn capacity(&self, class: UnitClass) -> usize {
        self.slot(class).map_or(0, |s| s.capacity)
    }

    /// Number of busy units of `class`.
    pub fn busy_count(&self, class: UnitClass) -> usize {
        self.class_units(class).iter().filter(|u| u.busy).count()
    }

    fn class_units(&self, class: UnitClass) -> &[FunctionalUnit] {
        self.slot(class)
            .map_or(&[][..], |s| &self.units[s.first..s.first + s.capacity])
    }

    /// Returns the lowest-id free unit of `class` and marks it busy for `occupant`.
    ///
    /// `None` means every unit of the class is busy (structural hazard).
    pub fn allocate(&mut self, class: UnitClass, occupant: usize) -> Option<UnitId> {
        let slot = self.slot(class)?;
        let range = slot.first..slot.first + slot.capacity;
        let unit = self.units[range].iter_mut().find(|u| !u.busy)?;
        unit.busy = true;
        unit.occupant = Some(occupant);
        Some(unit.id)
    }

    /// Fills the status fields of a freshly allocated unit from its instruction.
    ///
    /// `qj`/`qk` are the producers of `rs1`/`rs2` at issue time, captured before the
    /// instruction reserves its own destination.
    pub fn assign(
        &mut self,
        id: UnitId,
        inst: &Instruction,
        qj: Option<UnitId>,
        qk: Option<UnitId>,
    ) {
        let unit = &mut self.units[id.0];
        unit.op = Some(inst.op);
        unit.fi = inst.rd;
        unit.fj = inst.rs1;
        unit.fk = inst.rs2;
        unit.qj = qj;
        unit.qk = qk;
        unit.rj = qj.is_none();
        unit.rk = qk.is_none();
    }

    /// Operands read: starts the execution countdown at the class latency.
    pub fn begin_execute(&mut self, id: UnitId) {
        let unit = &mut self.units[id.0];
        unit.rj = false;
        unit.rk = false;
        unit.remaining = Some(unit.latency);
    }

    /// Advances execution by one cycle. Returns true when the countdown reaches
    /// zero on this call.
    pub fn tick_execute(&mut self, id: UnitId) -> bool {
        let unit = &mut self.units[id.0];
        match unit.remaining {
            Some(n) if n > 0 => {
                unit.remaining = Some(n - 1);
                n == 1
            }
            _ => false,
        }
    }

    /// Result of `producer` was written: operands waiting on it become available.
    pub fn broadcast(&mut self, producer: UnitId) {
        for unit in self.units.iter_mut().filter(|u| u.busy) {
            if unit.qj == Some(producer) {
                unit.qj = None;
                unit.rj = true;
            }
            if unit.qk == Some(producer) {
                unit.qk = None;
                unit.rk = true;
            }
        }
    }

    /// Whether some occupant still has to read `reg` (WAR hazard for a writer of `reg`).
    pub fn has_pending_reader(&self, reg: Register) -> bool {
        self.units.iter().any(|u| u.still_reads(reg))
    }

    /// Frees the unit; it can be allocated again by any later phase.
    pub fn release(&mut self, id: UnitId) {
        self.units[id.0].clear();
    }

    /// Unit by id.
    pub fn unit(&self, id: UnitId) -> &FunctionalUnit {
        &self.units[id.0]
    }

    /// All units in id order.
    pub fn units(&self) -> &[FunctionalUnit] {
        &self.units
    }

    /// Whether every unit is free.
    pub fn all_free(&self) -> bool {
        self.units.iter().all(|u| !u.busy)
    }

    /// Copy of every unit's current status.
    pub fn snapshot(&self) -> Vec<FunctionalUnit> {
        self.units.clone()
    }
}
