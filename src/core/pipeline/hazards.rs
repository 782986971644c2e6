//! Register scoreboard consultation and the operand-forwarding network.
//!
//! Decode/Register-Read calls [`resolve_source`] once per source register a
//! given opcode needs (see the table in spec §4.3). It expresses the single
//! rule the pipeline applies uniformly: a valid register is read directly;
//! an invalid one is read from the forwarding table only if a result has
//! been published and the producer is not still sitting in Execute-1 this
//! cycle; otherwise the caller must stall.

use crate::core::arch::gpr::{Gpr, Scoreboard};

/// Per-register shadow of the most recently computed result, plus a single
/// flag gating whether any of it is currently usable.
///
/// `forwarding_available` is cleared whenever a `LOAD`/`LDR` reaches
/// Execute-2 or Memory-1 (its value is not ready until Memory-2), and is
/// otherwise true — APEX has only one producer in flight past Execute-1 at
/// a time, so a single flag is sufficient (unlike a per-register ready bit).
pub struct ForwardingTable {
    forwarded: [i32; 16],
    forwarding_available: bool,
}

impl ForwardingTable {
    pub fn new() -> Self {
        Self {
            forwarded: [0; 16],
            forwarding_available: false,
        }
    }

    /// Publishes a result for register `rd`, or does nothing if `rd < 0`
    /// (ops with no destination, e.g. STORE/STR, set `rd = -1`).
    pub fn publish(&mut self, rd: i32, value: i32) {
        if rd >= 0 {
            self.forwarded[rd as usize] = value;
        }
        self.forwarding_available = true;
    }

    /// Clears availability; called when a LOAD/LDR reaches EX2 or MEM1.
    pub fn clear_available(&mut self) {
        self.forwarding_available = false;
    }
}

/// The outcome of trying to resolve one source register in Decode/Register-Read.
pub enum Resolution {
    Ready(i32),
    Stall,
}

/// Resolves a single source register, per spec §4.3.
///
/// `producer_rd` is the destination register of whatever instruction
/// currently occupies Execute-1 (or `-1` if EX1 is empty) — forwarding is
/// unavailable for a value whose producer hasn't reached Execute-2 yet.
pub fn resolve_source(
    reg: i32,
    regs: &Gpr,
    scoreboard: &Scoreboard,
    fwd: &ForwardingTable,
    producer_rd: i32,
) -> Resolution {
    let idx = reg as usize;
    if scoreboard.is_valid(idx) {
        Resolution::Ready(regs.read(idx))
    } else if fwd.forwarding_available && producer_rd != reg {
        Resolution::Ready(fwd.forwarded[idx])
    } else {
        Resolution::Stall
    }
}
