//! Fetch (F)
//!
//! Reads the next instruction from code memory and advances the program
//! counter, unless a squash is in effect (a branch/jump just resolved, or
//! `HALT` has permanently flushed this stage) or Fetch is stalled behind a
//! Decode/Register-Read hazard.

use crate::core::cpu::{Cpu, CODE_BASE};
use crate::core::pipeline::latches::Latch;

pub fn fetch_stage(cpu: &mut Cpu) {
    let end = CODE_BASE + 4 * cpu.code_memory_size();

    if cpu.halt_flushed || cpu.branch_or_jump_taken {
        // F was already cleared this cycle (by Decode's HALT handling, or by
        // Execute-2's squash); propagate the bubble into DRF without fetching.
        cpu.drf = cpu.f.clone();
    } else if cpu.pc >= end {
        // Nothing left to fetch; let the tail of the program drain downstream.
        cpu.f = Latch::bubble();
        cpu.drf = Latch::bubble();
    } else if !cpu.f.stalled {
        let index = ((cpu.pc - CODE_BASE) / 4) as usize;
        let inst = cpu.code_memory[index];

        cpu.f = Latch {
            pc: cpu.pc,
            opcode: Some(inst.opcode),
            rd: inst.rd,
            rs1: inst.rs1,
            rs2: inst.rs2,
            rs3: inst.rs3,
            imm: inst.imm,
            ..Latch::bubble()
        };

        cpu.pc += 4;
        cpu.drf = cpu.f.clone();
    }
    // else: Fetch is stalled — it holds its latch in place and does not
    // advance into DRF this cycle (DRF is retrying the same instruction).

    if cpu.trace && cpu.full_diagram {
        crate::trace::print_stage("Fetch", &cpu.f);
    }
}
