//! Execute-1 (EX1)
//!
//! Performs the ALU operation (or effective-address computation for
//! memory ops) and, independently of whatever instruction currently
//! occupies this latch, counts down the single-cycle BZ/BNZ stall that
//! Decode armed when it saw a flag-setting ALU op sitting here.

use crate::core::cpu::Cpu;
use crate::core::isa::Opcode;

pub fn execute1_stage(cpu: &mut Cpu) {
    tick_branch_stall_counters(cpu);

    if let Some(op) = cpu.ex1.opcode {
        let l = &mut cpu.ex1;
        match op {
            Opcode::Movc => {}
            Opcode::Add => l.buffer = l.rs1_value + l.rs2_value,
            Opcode::Sub => l.buffer = l.rs1_value - l.rs2_value,
            Opcode::Mul => l.buffer = l.rs1_value * l.rs2_value,
            Opcode::And => l.buffer = l.rs1_value & l.rs2_value,
            Opcode::Or => l.buffer = l.rs1_value | l.rs2_value,
            Opcode::ExOr => l.buffer = l.rs1_value ^ l.rs2_value,
            Opcode::Addl => l.buffer = l.rs1_value + l.imm,
            Opcode::Subl => l.buffer = l.rs1_value - l.imm,
            Opcode::Load => l.mem_address = l.rs1_value + l.imm,
            Opcode::Ldr => l.mem_address = l.rs1_value + l.rs2_value,
            Opcode::Store => {
                l.mem_address = l.rs2_value + l.imm;
                l.rd = -1;
            }
            Opcode::Str => {
                l.mem_address = l.rs2_value + l.rs3_value;
                l.rd = -1;
            }
            Opcode::Jump => l.buffer = l.rs1_value + l.imm,
            Opcode::Bz | Opcode::Bnz | Opcode::Halt => {}
        }
    }

    if cpu.trace && cpu.full_diagram {
        crate::trace::print_stage("Execute 1", &cpu.ex1);
    }

    cpu.ex2 = cpu.ex1.clone();
}

fn tick_branch_stall_counters(cpu: &mut Cpu) {
    if cpu.z_counter > 0 {
        cpu.z_counter -= 1;
        if cpu.z_counter == 0 {
            cpu.f.stalled = false;
            cpu.drf.stalled = false;
        }
    }
    if cpu.bnz_counter > 0 {
        cpu.bnz_counter -= 1;
        if cpu.bnz_counter == 0 {
            cpu.f.stalled = false;
            cpu.drf.stalled = false;
        }
    }
}
