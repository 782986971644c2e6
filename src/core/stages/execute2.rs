//! Execute-2 (EX2)
//!
//! Where the condition flag becomes visible, where BZ/BNZ/JUMP are
//! resolved and squashes are issued, and where a non-load result first
//! becomes available to the forwarding network. LOAD/LDR instead clear
//! forwarding availability here, since their value isn't known until
//! Memory-2 — this is what produces the load-use stall.

use crate::core::arch::gpr::Scoreboard;
use crate::core::cpu::{Cpu, Status, CODE_BASE};
use crate::core::isa::Opcode;
use crate::core::pipeline::latches::Latch;
use crate::core::pipeline::traits::PipelineLatch;

pub fn execute2_stage(cpu: &mut Cpu) {
    if let Some(op) = cpu.ex2.opcode {
        if op.sets_flags() {
            cpu.z_flag = cpu.ex2.buffer == 0;
        }

        match op {
            Opcode::Bz if cpu.z_flag => take_branch(cpu, cpu.ex2.pc + cpu.ex2.imm),
            Opcode::Bnz if !cpu.z_flag => take_branch(cpu, cpu.ex2.pc + cpu.ex2.imm),
            Opcode::Jump => {
                let target = cpu.ex2.buffer;
                if target < CODE_BASE || target >= CODE_BASE + 4 * cpu.code_memory_size() {
                    cpu.status = Status::InvalidJump {
                        pc: cpu.ex2.pc,
                        target,
                    };
                } else {
                    take_branch(cpu, target);
                }
            }
            _ => {}
        }

        if op.is_memory_load() {
            // The loaded value isn't known until Memory-2; any consumer whose
            // source is still pending will see forwarding unavailable and
            // stall in Decode/Register-Read until then.
            cpu.fwd.clear_available();
        } else if op.writes_rd() {
            cpu.fwd.publish(cpu.ex2.rd, cpu.ex2.buffer);
        }
    }

    if cpu.trace && cpu.full_diagram {
        crate::trace::print_stage("Execute 2", &cpu.ex2);
    }

    cpu.mem1 = cpu.ex2.clone();
}

/// A taken branch or valid jump squashes everything fetched behind it and
/// redirects the PC at the start of the next cycle (§4.8).
fn take_branch(cpu: &mut Cpu, target: i32) {
    cpu.branch_or_jump_taken = true;
    cpu.branch_pc = target;
    squash_latch(&mut cpu.scoreboard, &mut cpu.f);
    squash_latch(&mut cpu.scoreboard, &mut cpu.drf);
    squash_latch(&mut cpu.scoreboard, &mut cpu.ex1);
}

/// Un-claims the destination register a squashed instruction had reserved,
/// then empties the latch.
fn squash_latch(scoreboard: &mut Scoreboard, latch: &mut Latch) {
    if let Some(op) = latch.opcode {
        if op.writes_rd() && latch.rd >= 0 {
            scoreboard.mark_valid(latch.rd as usize);
        }
    }
    latch.flush();
}
