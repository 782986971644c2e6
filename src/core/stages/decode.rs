//! Decode / Register-Read (DRF)
//!
//! Classifies the instruction by opcode, resolves each source register it
//! needs (register file read, forwarded value, or stall), and claims its
//! destination register in the scoreboard. Unlike the other stages, DRF
//! re-evaluates its occupant every cycle it is stalled — the moment a
//! producer publishes a value it needs, it proceeds that same cycle.

use crate::core::cpu::Cpu;
use crate::core::isa::Opcode;
use crate::core::pipeline::hazards::{resolve_source, Resolution};
use crate::core::pipeline::latches::Latch;
use crate::core::pipeline::traits::PipelineLatch;

pub fn decode_stage(cpu: &mut Cpu) {
    match cpu.drf.opcode {
        None => {
            cpu.ex1 = Latch::bubble();
        }
        Some(op) => {
            decode_opcode(cpu, op);
            cpu.ex1 = if cpu.drf.stalled {
                Latch::bubble()
            } else {
                cpu.drf.clone()
            };
        }
    }

    if cpu.trace && cpu.full_diagram {
        crate::trace::print_stage("Decode/RF", &cpu.drf);
    }
}

/// Destination register of whatever currently occupies Execute-1, or `-1`
/// if Execute-1 is empty. Forwarding is unavailable for a value whose
/// producer hasn't reached Execute-2 yet.
fn producer_rd(cpu: &Cpu) -> i32 {
    if cpu.ex1.is_empty() {
        -1
    } else {
        cpu.ex1.rd
    }
}

/// Tries to resolve every register in `sources`, in order. On success
/// returns their values (aligned with `sources`); on the first stall,
/// returns `None` without partially updating anything.
fn try_resolve(cpu: &Cpu, sources: &[i32]) -> Option<Vec<i32>> {
    let producer = producer_rd(cpu);
    let mut values = Vec::with_capacity(sources.len());
    for &reg in sources {
        match resolve_source(reg, &cpu.regs, &cpu.scoreboard, &cpu.fwd, producer) {
            Resolution::Ready(v) => values.push(v),
            Resolution::Stall => return None,
        }
    }
    Some(values)
}

fn set_stalled(cpu: &mut Cpu, stalled: bool) {
    cpu.f.stalled = stalled;
    cpu.drf.stalled = stalled;
}

fn decode_opcode(cpu: &mut Cpu, op: Opcode) {
    match op {
        Opcode::Movc => {
            cpu.drf.buffer = cpu.drf.imm;
            cpu.scoreboard.mark_pending(cpu.drf.rd as usize);
            set_stalled(cpu, false);
        }

        Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::And | Opcode::Or | Opcode::ExOr | Opcode::Ldr => {
            let rs1 = cpu.drf.rs1;
            let rs2 = cpu.drf.rs2;
            match try_resolve(cpu, &[rs1, rs2]) {
                Some(values) => {
                    cpu.drf.rs1_value = values[0];
                    cpu.drf.rs2_value = values[1];
                    cpu.scoreboard.mark_pending(cpu.drf.rd as usize);
                    set_stalled(cpu, false);
                }
                None => set_stalled(cpu, true),
            }
        }

        Opcode::Addl | Opcode::Subl | Opcode::Load => {
            let rs1 = cpu.drf.rs1;
            match try_resolve(cpu, &[rs1]) {
                Some(values) => {
                    cpu.drf.rs1_value = values[0];
                    cpu.scoreboard.mark_pending(cpu.drf.rd as usize);
                    set_stalled(cpu, false);
                }
                None => set_stalled(cpu, true),
            }
        }

        Opcode::Store => {
            let rs1 = cpu.drf.rs1;
            let rs2 = cpu.drf.rs2;
            match try_resolve(cpu, &[rs1, rs2]) {
                Some(values) => {
                    cpu.drf.rs1_value = values[0];
                    cpu.drf.rs2_value = values[1];
                    set_stalled(cpu, false);
                }
                None => set_stalled(cpu, true),
            }
        }

        Opcode::Str => {
            let rs1 = cpu.drf.rs1;
            let rs2 = cpu.drf.rs2;
            let rs3 = cpu.drf.rs3;
            match try_resolve(cpu, &[rs1, rs2, rs3]) {
                Some(values) => {
                    cpu.drf.rs1_value = values[0];
                    cpu.drf.rs2_value = values[1];
                    cpu.drf.rs3_value = values[2];
                    set_stalled(cpu, false);
                }
                None => set_stalled(cpu, true),
            }
        }

        Opcode::Jump => {
            let rs1 = cpu.drf.rs1;
            match try_resolve(cpu, &[rs1]) {
                Some(values) => {
                    cpu.drf.rs1_value = values[0];
                    set_stalled(cpu, false);
                }
                None => set_stalled(cpu, true),
            }
        }

        Opcode::Bz | Opcode::Bnz => {
            let blocked_on_flags = cpu.ex1.opcode.map(Opcode::sets_flags).unwrap_or(false);
            if blocked_on_flags {
                set_stalled(cpu, true);
                match op {
                    Opcode::Bz => cpu.z_counter = 1,
                    Opcode::Bnz => cpu.bnz_counter = 1,
                    _ => unreachable!(),
                }
            } else {
                set_stalled(cpu, false);
            }
        }

        Opcode::Halt => {
            cpu.f = Latch::bubble();
            cpu.halt_flushed = true;
        }
    }
}
