//! Memory-1 (MEM1)
//!
//! APEX splits the data-memory access across two cycles; MEM1 itself does
//! no addressing work, but it must keep re-asserting (or continuing to
//! withhold) forwarding availability for whatever is passing through, since
//! a LOAD/LDR sitting here still hasn't produced its value.

use crate::core::cpu::Cpu;

pub fn mem1_stage(cpu: &mut Cpu) {
    if let Some(op) = cpu.mem1.opcode {
        if op.is_memory_load() {
            cpu.fwd.clear_available();
        } else if op.writes_rd() {
            cpu.fwd.publish(cpu.mem1.rd, cpu.mem1.buffer);
        }
    }

    if cpu.trace && cpu.full_diagram {
        crate::trace::print_stage("Memory 1", &cpu.mem1);
    }

    cpu.mem2 = cpu.mem1.clone();
}
