//! Writeback (WB)
//!
//! Commits the instruction's result to the register file, releases its
//! scoreboard claim (unless a later write to the same register is still in
//! flight), and decides whether the run has ended.

use crate::core::cpu::{Cpu, Status};
use crate::core::isa::Opcode;

pub fn wb_stage(cpu: &mut Cpu) {
    if let Some(op) = cpu.wb.opcode {
        if op.writes_rd() && cpu.wb.rd >= 0 {
            let rd = cpu.wb.rd as usize;
            cpu.regs.write(rd, cpu.wb.buffer);
            if !later_write_pending(cpu, cpu.wb.rd) {
                cpu.scoreboard.mark_valid(rd);
            }
        }
        cpu.instructions_completed += 1;
    }

    if cpu.trace {
        crate::trace::print_stage("Writeback", &cpu.wb);
    }

    check_termination(cpu);
}

/// True if some instruction still ahead of Writeback also targets `rd` — in
/// that case the scoreboard entry must stay pending on its behalf.
fn later_write_pending(cpu: &Cpu, rd: i32) -> bool {
    [&cpu.ex1, &cpu.ex2, &cpu.mem1, &cpu.mem2]
        .into_iter()
        .any(|l| l.opcode.map(|op| op.writes_rd() && l.rd == rd).unwrap_or(false))
}

/// Whether this run has ended. `HALT` retiring always ends the run, cap or
/// no cap. Beyond that, `cycles_cap > 0` is a pure clock cutoff — it must
/// fire on cycle `cycles_cap - 1` regardless of whether WB happens to hold a
/// real instruction yet, since the pipeline's fill latency (six cycles
/// before the first instruction even reaches WB) would otherwise let a small
/// cap slip by unenforced. `cycles_cap == 0` runs to completion instead: the
/// retiring instruction's own `pc` reaching the last one in the program ends
/// the run.
fn check_termination(cpu: &mut Cpu) {
    let halted = matches!(cpu.wb.opcode, Some(Opcode::Halt));

    if cpu.cycles_cap > 0 {
        if halted || cpu.clock == cpu.cycles_cap - 1 {
            cpu.status = if halted { Status::Halted } else { Status::CycleBudgetReached };
        }
    } else if halted || cpu.wb.pc == cpu.last_pc() {
        cpu.status = Status::Halted;
    }
}
