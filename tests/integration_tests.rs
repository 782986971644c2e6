//! End-to-end tests that run small programs through the full seven-stage
//! pipeline and check architectural results: register/memory contents,
//! run status, and squash behavior on taken branches and invalid jumps.

use apex_sim::common::SimError;
use apex_sim::core::cpu::{Cpu, Status};
use apex_sim::core::isa::{Instruction, Opcode};

fn instr(opcode: Opcode) -> Instruction {
    Instruction::new(opcode)
}

fn movc(rd: i32, imm: i32) -> Instruction {
    let mut i = instr(Opcode::Movc);
    i.rd = rd;
    i.imm = imm;
    i
}

fn alu(opcode: Opcode, rd: i32, rs1: i32, rs2: i32) -> Instruction {
    let mut i = instr(opcode);
    i.rd = rd;
    i.rs1 = rs1;
    i.rs2 = rs2;
    i
}

fn store(rs1: i32, rs2: i32, imm: i32) -> Instruction {
    let mut i = instr(Opcode::Store);
    i.rs1 = rs1;
    i.rs2 = rs2;
    i.imm = imm;
    i
}

fn load(rd: i32, rs1: i32, imm: i32) -> Instruction {
    let mut i = instr(Opcode::Load);
    i.rd = rd;
    i.rs1 = rs1;
    i.imm = imm;
    i
}

fn str_op(rs1: i32, rs2: i32, rs3: i32) -> Instruction {
    let mut i = instr(Opcode::Str);
    i.rs1 = rs1;
    i.rs2 = rs2;
    i.rs3 = rs3;
    i
}

fn ldr(rd: i32, rs1: i32, rs2: i32) -> Instruction {
    let mut i = instr(Opcode::Ldr);
    i.rd = rd;
    i.rs1 = rs1;
    i.rs2 = rs2;
    i
}

fn bz(imm: i32) -> Instruction {
    let mut i = instr(Opcode::Bz);
    i.imm = imm;
    i
}

fn jump(rs1: i32, imm: i32) -> Instruction {
    let mut i = instr(Opcode::Jump);
    i.rs1 = rs1;
    i.imm = imm;
    i
}

fn halt() -> Instruction {
    instr(Opcode::Halt)
}

/// Straight-line arithmetic with back-to-back forwarding: no loads, so no
/// source register should ever need to wait past Execute-1's result.
#[test]
fn straight_line_arithmetic_forwards_correctly() {
    let program = vec![
        movc(1, 5),
        movc(2, 10),
        alu(Opcode::Add, 3, 1, 2),
        halt(),
    ];
    let mut cpu = Cpu::new(program, 0, false, true);
    let result = cpu.run();

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(cpu.status, Status::Halted);
    assert_eq!(cpu.regs.read(1), 5);
    assert_eq!(cpu.regs.read(2), 10);
    assert_eq!(cpu.regs.read(3), 15);
}

/// A register written by LOAD and consumed by the very next instruction
/// must stall Decode until Memory-2 produces the value; the final result
/// should still be correct once it does.
#[test]
fn load_use_hazard_resolves_to_correct_value() {
    let program = vec![
        movc(1, 7),
        store(1, 0, 50), // mem[R0 + 50] = R1 = 7 (R0 starts at 0)
        load(2, 0, 50),  // R2 = mem[50] = 7
        alu(Opcode::Add, 3, 2, 2),
        halt(),
    ];
    let mut cpu = Cpu::new(program, 0, false, true);
    let result = cpu.run();

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(cpu.status, Status::Halted);
    assert_eq!(cpu.data_memory[50], 7);
    assert_eq!(cpu.regs.read(2), 7);
    assert_eq!(cpu.regs.read(3), 14);
}

/// STR/LDR exercise the three-register addressing forms.
#[test]
fn str_and_ldr_use_register_plus_register_addressing() {
    let program = vec![
        movc(1, 9),   // value to store
        movc(2, 0),   // base
        movc(3, 60),  // offset register
        str_op(1, 2, 3), // mem[R2 + R3] = R1
        ldr(4, 2, 3),    // R4 = mem[R2 + R3]
        halt(),
    ];
    let mut cpu = Cpu::new(program, 0, false, true);
    let result = cpu.run();

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(cpu.data_memory[60], 9);
    assert_eq!(cpu.regs.read(4), 9);
}

/// A taken BZ must squash whatever Fetch/Decode/Execute-1 had already
/// pulled in behind it, so the skipped instruction's destination register
/// never gets written.
#[test]
fn taken_branch_squashes_fetched_instructions() {
    let program = vec![
        movc(1, 0),                    // 4000
        alu(Opcode::Sub, 2, 1, 1),      // 4004: R2 = 0, Z = 1
        bz(12),                        // 4008: branch to 4008 + 12 = 4020
        movc(4, 99),                   // 4012: skipped
        movc(5, 55),                   // 4016: skipped
        movc(6, 77),                   // 4020: landed on
        halt(),                        // 4024
    ];
    let mut cpu = Cpu::new(program, 0, false, true);
    let result = cpu.run();

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(cpu.status, Status::Halted);
    assert_eq!(cpu.regs.read(4), 0);
    assert_eq!(cpu.regs.read(5), 0);
    assert_eq!(cpu.regs.read(6), 77);
}

/// JUMP outside the code-memory range reports `InvalidJump` instead of
/// letting the pipeline run off into undefined territory.
#[test]
fn jump_outside_code_memory_is_rejected() {
    let program = vec![jump(0, 99_999), halt()];
    let mut cpu = Cpu::new(program, 0, false, true);
    let result = cpu.run();

    match result {
        Err(SimError::InvalidJump { target, .. }) => assert_eq!(target, 99_999),
        other => panic!("expected InvalidJump, got {other:?}"),
    }
    assert!(matches!(cpu.status, Status::InvalidJump { .. }));
}

/// A cycle cap below what the program needs to retire HALT ends the run
/// with `CycleBudgetReached` rather than running to completion.
#[test]
fn cycle_budget_truncates_the_run() {
    let program = vec![
        movc(1, 1),
        movc(2, 2),
        movc(3, 3),
        movc(4, 4),
        halt(),
    ];
    let mut cpu = Cpu::new(program, 2, false, true);
    let result = cpu.run();

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(cpu.status, Status::CycleBudgetReached);
    assert_eq!(cpu.clock, 2);
}

/// Every general-purpose register starts valid and zeroed, and the
/// scoreboard reports no pending destinations before anything runs.
#[test]
fn fresh_cpu_has_zeroed_valid_registers() {
    let cpu = Cpu::new(vec![halt()], 0, false, true);
    for i in 0..16 {
        assert_eq!(cpu.regs.read(i), 0);
        assert!(cpu.scoreboard.is_valid(i));
    }
}
