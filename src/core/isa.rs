//! Instruction set definition for the APEX pipeline.
//!
//! APEX instructions carry a closed opcode, up to three source register
//! indices, a destination register index, and a signed immediate. Unused
//! fields are simply ignored by whichever stage does not need them — there
//! is no variant-specific struct, matching the flat `APEX_Instruction`
//! layout the parser and the stage latches both work with.

/// The closed set of opcodes the pipeline understands.
///
/// Any opcode outside this set cannot reach the core: the parser rejects it
/// at load time (see `crate::asm`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Movc,
    Add,
    Sub,
    Mul,
    Addl,
    Subl,
    And,
    Or,
    ExOr,
    Load,
    Ldr,
    Store,
    Str,
    Bz,
    Bnz,
    Jump,
    Halt,
}

impl Opcode {
    /// True for the ALU ops that update the Z flag in Execute-2.
    pub fn sets_flags(self) -> bool {
        matches!(
            self,
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Addl | Opcode::Subl
        )
    }

    /// True for opcodes whose result is not available until Memory-2.
    pub fn is_memory_load(self) -> bool {
        matches!(self, Opcode::Load | Opcode::Ldr)
    }

    /// True for opcodes that write a destination register.
    pub fn writes_rd(self) -> bool {
        !matches!(
            self,
            Opcode::Store | Opcode::Str | Opcode::Bz | Opcode::Bnz | Opcode::Jump | Opcode::Halt
        )
    }
}

/// A decoded APEX instruction, as produced by the assembly-text parser and
/// consumed by the pipeline engine.
#[derive(Clone, Copy, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub rd: i32,
    pub rs1: i32,
    pub rs2: i32,
    pub rs3: i32,
    pub imm: i32,
}

impl Instruction {
    /// An instruction with no operands, used only to build test fixtures.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            rd: -1,
            rs1: -1,
            rs2: -1,
            rs3: -1,
            imm: 0,
        }
    }
}
