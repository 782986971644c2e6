//! Memory-2 (MEM2)
//!
//! Where the data-memory array is actually touched: STORE/STR write,
//! LOAD/LDR read and land their result in `buffer`. This is also where a
//! LOAD/LDR's value first becomes available to the forwarding network,
//! ending the load-use stall.

use crate::core::cpu::Cpu;
use crate::core::isa::Opcode;

pub fn mem2_stage(cpu: &mut Cpu) {
    if let Some(op) = cpu.mem2.opcode {
        match op {
            Opcode::Store | Opcode::Str => {
                let addr = cpu.mem2.mem_address as usize;
                cpu.data_memory[addr] = cpu.mem2.rs1_value;
            }
            Opcode::Load | Opcode::Ldr => {
                let addr = cpu.mem2.mem_address as usize;
                cpu.mem2.buffer = cpu.data_memory[addr];
            }
            _ => {}
        }

        if op.writes_rd() {
            cpu.fwd.publish(cpu.mem2.rd, cpu.mem2.buffer);
        }
    }

    if cpu.trace && cpu.full_diagram {
        crate::trace::print_stage("Memory 2", &cpu.mem2);
    }

    cpu.wb = cpu.mem2.clone();
}
