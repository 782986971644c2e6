//! Per-cycle pipeline trace formatting.
//!
//! Turns a stage latch into the `<StageName>: pc(<pc>) <opcode>,<operands>`
//! line used by `--mode display`. The format itself is not normative (only
//! the core's state is), but this shape matches the operand table laid out
//! alongside it.

use crate::core::isa::Opcode;
use crate::core::pipeline::latches::Latch;

pub fn print_stage(name: &str, latch: &Latch) {
    println!("{name}: {}", format_latch(latch));
}

fn format_latch(latch: &Latch) -> String {
    let Some(op) = latch.opcode else {
        return "EMPTY".to_string();
    };

    let operands = match op {
        Opcode::Store => format!("STORE,R{},R{},#{}", latch.rs1, latch.rs2, latch.imm),
        Opcode::Str => format!("STR,R{},R{},R{}", latch.rs1, latch.rs2, latch.rs3),
        Opcode::Add => format!("ADD,R{},R{},R{}", latch.rd, latch.rs1, latch.rs2),
        Opcode::Sub => format!("SUB,R{},R{},R{}", latch.rd, latch.rs1, latch.rs2),
        Opcode::Mul => format!("MUL,R{},R{},R{}", latch.rd, latch.rs1, latch.rs2),
        Opcode::And => format!("AND,R{},R{},R{}", latch.rd, latch.rs1, latch.rs2),
        Opcode::Or => format!("OR,R{},R{},R{}", latch.rd, latch.rs1, latch.rs2),
        Opcode::ExOr => format!("EX-OR,R{},R{},R{}", latch.rd, latch.rs1, latch.rs2),
        Opcode::Ldr => format!("LDR,R{},R{},R{}", latch.rd, latch.rs1, latch.rs2),
        Opcode::Addl => format!("ADDL,R{},R{},#{}", latch.rd, latch.rs1, latch.imm),
        Opcode::Subl => format!("SUBL,R{},R{},#{}", latch.rd, latch.rs1, latch.imm),
        Opcode::Load => format!("LOAD,R{},R{},#{}", latch.rd, latch.rs1, latch.imm),
        Opcode::Movc => format!("MOVC,R{},#{}", latch.rd, latch.imm),
        Opcode::Bz => format!("BZ,#{}", latch.imm),
        Opcode::Bnz => format!("BNZ,#{}", latch.imm),
        Opcode::Jump => format!("JUMP,R{},#{}", latch.rs1, latch.imm),
        Opcode::Halt => "HALT".to_string(),
    };

    format!("pc({}) {operands}", latch.pc)
}
