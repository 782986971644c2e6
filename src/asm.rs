//! Assembly-text program loader.
//!
//! Turns a `.txt` program (one instruction per line, comma- and
//! whitespace-delimited operands) into the decoded [`Instruction`] array
//! the pipeline core consumes. Register operands are written `R<n>`,
//! immediates as `#<n>` or a bare integer. A line whose first non-blank
//! character is `;` is a comment.
//!
//! Grounded on `original_source/cpu.h`'s `create_code_memory(filename,
//! &size)` interface: one instruction per line, opcode plus operands.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;
use crate::core::isa::{Instruction, Opcode};

pub fn load_program(path: &Path) -> Result<Vec<Instruction>, SimError> {
    let text = fs::read_to_string(path).map_err(SimError::Setup)?;
    let mut program = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let instruction = parse_line(line).map_err(|reason| SimError::Parse {
            line: line_no + 1,
            reason,
        })?;
        program.push(instruction);
    }

    if program.is_empty() {
        return Err(SimError::Setup(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "program contains no instructions",
        )));
    }

    Ok(program)
}

fn parse_line(line: &str) -> Result<Instruction, String> {
    let tokens: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let (mnemonic, operands) = tokens.split_first().ok_or("empty instruction")?;
    let opcode = parse_opcode(mnemonic)?;
    let mut inst = Instruction::new(opcode);

    match opcode {
        Opcode::Movc => {
            let [rd, imm] = operand_slice(operands, "MOVC")?;
            inst.rd = parse_register(rd)?;
            inst.imm = parse_immediate(imm)?;
        }
        Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::And | Opcode::Or | Opcode::ExOr | Opcode::Ldr => {
            let [rd, rs1, rs2] = operand_slice(operands, mnemonic)?;
            inst.rd = parse_register(rd)?;
            inst.rs1 = parse_register(rs1)?;
            inst.rs2 = parse_register(rs2)?;
        }
        Opcode::Addl | Opcode::Subl | Opcode::Load => {
            let [rd, rs1, imm] = operand_slice(operands, mnemonic)?;
            inst.rd = parse_register(rd)?;
            inst.rs1 = parse_register(rs1)?;
            inst.imm = parse_immediate(imm)?;
        }
        Opcode::Store => {
            let [rs1, rs2, imm] = operand_slice(operands, "STORE")?;
            inst.rs1 = parse_register(rs1)?;
            inst.rs2 = parse_register(rs2)?;
            inst.imm = parse_immediate(imm)?;
        }
        Opcode::Str => {
            let [rs1, rs2, rs3] = operand_slice(operands, "STR")?;
            inst.rs1 = parse_register(rs1)?;
            inst.rs2 = parse_register(rs2)?;
            inst.rs3 = parse_register(rs3)?;
        }
        Opcode::Bz | Opcode::Bnz => {
            let [imm] = operand_slice(operands, mnemonic)?;
            inst.imm = parse_immediate(imm)?;
        }
        Opcode::Jump => {
            let [rs1, imm] = operand_slice(operands, "JUMP")?;
            inst.rs1 = parse_register(rs1)?;
            inst.imm = parse_immediate(imm)?;
        }
        Opcode::Halt => {
            if !operands.is_empty() {
                return Err("HALT takes no operands".to_string());
            }
        }
    }

    Ok(inst)
}

fn parse_opcode(mnemonic: &str) -> Result<Opcode, String> {
    match mnemonic.to_ascii_uppercase().as_str() {
        "MOVC" => Ok(Opcode::Movc),
        "ADD" => Ok(Opcode::Add),
        "SUB" => Ok(Opcode::Sub),
        "MUL" => Ok(Opcode::Mul),
        "ADDL" => Ok(Opcode::Addl),
        "SUBL" => Ok(Opcode::Subl),
        "AND" => Ok(Opcode::And),
        "OR" => Ok(Opcode::Or),
        "EX-OR" | "EXOR" => Ok(Opcode::ExOr),
        "LOAD" => Ok(Opcode::Load),
        "LDR" => Ok(Opcode::Ldr),
        "STORE" => Ok(Opcode::Store),
        "STR" => Ok(Opcode::Str),
        "BZ" => Ok(Opcode::Bz),
        "BNZ" => Ok(Opcode::Bnz),
        "JUMP" => Ok(Opcode::Jump),
        "HALT" => Ok(Opcode::Halt),
        other => Err(format!("unrecognized opcode '{other}'")),
    }
}

fn parse_register(tok: &str) -> Result<i32, String> {
    let digits = tok
        .strip_prefix(['R', 'r'])
        .ok_or_else(|| format!("expected register operand, got '{tok}'"))?;
    digits
        .parse::<i32>()
        .map_err(|_| format!("invalid register '{tok}'"))
        .and_then(|r| {
            if (0..16).contains(&r) {
                Ok(r)
            } else {
                Err(format!("register '{tok}' out of range"))
            }
        })
}

fn parse_immediate(tok: &str) -> Result<i32, String> {
    let digits = tok.strip_prefix('#').unwrap_or(tok);
    digits
        .parse::<i32>()
        .map_err(|_| format!("invalid immediate '{tok}'"))
}

/// Fails with a descriptive message unless `operands` has exactly `N` items.
fn operand_slice<const N: usize>(operands: &[&str], mnemonic: &str) -> Result<[&str; N], String> {
    operands
        .try_into()
        .map_err(|_| format!("{mnemonic} expects {N} operand(s), got {}", operands.len()))
}
