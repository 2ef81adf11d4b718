//! Register status table.
//!
//! Maps each architectural register to the functional unit that will next write
//! it, or `None` if the register's value is stable. The issue stage consults it to
//! detect WAW hazards and to capture the producers of an instruction's operands;
//! the write-result stage clears the entry of the register it publishes.

use thiserror::Error;

use crate::common::reg::{NUM_REGS, RegKind, Register};
use crate::core::units::UnitId;

/// Attempted to reserve a register that already has a pending producer.
///
/// Issue checks for WAW hazards before reserving, so this indicates a bug in the
/// caller rather than a property of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("register {register} already reserved by unit {holder}, cannot reserve for unit {requester}")]
pub struct ReservationConflict {
    /// Register being reserved.
    pub register: Register,
    /// Unit that currently holds the reservation.
    pub holder: UnitId,
    /// Unit that asked for it.
    pub requester: UnitId,
}

/// Register result status: pending producer per register.
#[derive(Debug, Clone)]
pub struct RegisterStatusTable {
    /// Integer registers (`x0` always `None`, hardwired zero).
    gpr: [Option<UnitId>; NUM_REGS],
    /// Floating-point registers.
    fpr: [Option<UnitId>; NUM_REGS],
}

impl Default for RegisterStatusTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterStatusTable {
    /// Create a table with every register stable (no pending producers).
    pub const fn new() -> Self {
        Self {
            gpr: [None; NUM_REGS],
            fpr: [None; NUM_REGS],
        }
    }

    fn slot(&self, reg: Register) -> &Option<UnitId> {
        match reg.kind {
            RegKind::Int => &self.gpr[reg.index as usize],
            RegKind::Float => &self.fpr[reg.index as usize],
        }
    }

    fn slot_mut(&mut self, reg: Register) -> &mut Option<UnitId> {
        match reg.kind {
            RegKind::Int => &mut self.gpr[reg.index as usize],
            RegKind::Float => &mut self.fpr[reg.index as usize],
        }
    }

    /// Unit that will next write `reg`, or `None` if its value is stable.
    pub fn producer_of(&self, reg: Register) -> Option<UnitId> {
        *self.slot(reg)
    }

    /// Records `unit` as the pending producer of `reg`. No-op for `x0`.
    ///
    /// # Errors
    ///
    /// `ReservationConflict` if another producer is already pending.
    pub fn reserve(&mut self, reg: Register, unit: UnitId) -> Result<(), ReservationConflict> {
        if reg.is_zero() {
            return Ok(());
        }
        let slot = self.slot_mut(reg);
        match *slot {
            Some(holder) => Err(ReservationConflict {
                register: reg,
                holder,
                requester: unit,
            }),
            None => {
                *slot = Some(unit);
                Ok(())
            }
        }
    }

    /// Clears `reg`'s pending producer, but ONLY if it is still `unit`.
    ///
    /// Returns whether the entry was cleared.
    pub fn clear_if(&mut self, reg: Register, unit: UnitId) -> bool {
        let slot = self.slot_mut(reg);
        if *slot == Some(unit) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Registers with a pending producer, integer file first.
    pub fn pending(&self) -> impl Iterator<Item = (Register, UnitId)> + '_ {
        let gpr = self
            .gpr
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|u| (Register::int(i as u8), u)));
        let fpr = self
            .fpr
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|u| (Register::float(i as u8), u)));
        gpr.chain(fpr)
    }
}
