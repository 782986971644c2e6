//! The `Cpu` struct: architectural state plus the seven stage latches, and
//! the per-cycle driver that ties the pipeline engine together.

use crate::common::error::SimError;
use crate::core::arch::gpr::{Gpr, Scoreboard};
use crate::core::isa::Instruction;
use crate::core::pipeline::hazards::ForwardingTable;
use crate::core::pipeline::latches::Latch;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::stages;
use crate::stats::SimStats;

/// Data memory is a flat, integer-addressable array of 4000 cells.
pub const DATA_MEMORY_SIZE: usize = 4000;

/// Code memory begins at this program-counter value.
pub const CODE_BASE: i32 = 4000;

/// How a simulation run ended, or that it hasn't yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// `HALT` retired, or the last instruction in the program retired.
    Halted,
    /// The cycle budget (`cycles > 0` mode) was reached.
    CycleBudgetReached,
    /// `JUMP` resolved outside the valid code range.
    InvalidJump { pc: i32, target: i32 },
}

/// The complete architectural and micro-architectural state of one APEX run.
pub struct Cpu {
    pub clock: i32,
    pub pc: i32,

    pub regs: Gpr,
    pub scoreboard: Scoreboard,

    pub code_memory: Vec<Instruction>,
    pub data_memory: Vec<i32>,

    pub f: Latch,
    pub drf: Latch,
    pub ex1: Latch,
    pub ex2: Latch,
    pub mem1: Latch,
    pub mem2: Latch,
    pub wb: Latch,

    pub fwd: ForwardingTable,

    /// Condition code set by the most recently completed flag-setting ALU op.
    pub z_flag: bool,

    /// Counts down the single-cycle BZ-after-flag-setting-ALU stall.
    /// `-1` means no such stall is in progress.
    pub z_counter: i32,
    pub bnz_counter: i32,

    /// Set by Execute-2 at the end of a cycle in which a branch/jump was
    /// taken; consumed at the *start* of the next cycle, per the
    /// resolve-end/redirect-start contract (§4.8).
    pub branch_or_jump_taken: bool,
    pub branch_pc: i32,

    /// Set once `HALT` reaches Decode/Register-Read; Fetch stops producing
    /// new instructions for the rest of the run (§4.3).
    pub halt_flushed: bool,

    pub instructions_completed: i32,

    /// `0` = run to completion; otherwise stop after exactly this many cycles.
    pub cycles_cap: i32,

    pub trace: bool,

    /// Print every stage's latch each cycle, rather than only the
    /// instruction retiring in Writeback. Non-normative (§6 [AMBIENT]).
    pub full_diagram: bool,

    pub status: Status,

    pub stats: SimStats,
}

impl Cpu {
    pub fn new(code_memory: Vec<Instruction>, cycles_cap: i32, trace: bool, full_diagram: bool) -> Self {
        Self {
            clock: 0,
            pc: CODE_BASE,
            regs: Gpr::new(),
            scoreboard: Scoreboard::new(),
            code_memory,
            data_memory: vec![0; DATA_MEMORY_SIZE],
            f: Latch::bubble(),
            drf: Latch::bubble(),
            ex1: Latch::bubble(),
            ex2: Latch::bubble(),
            mem1: Latch::bubble(),
            mem2: Latch::bubble(),
            wb: Latch::bubble(),
            fwd: ForwardingTable::new(),
            z_flag: false,
            z_counter: -1,
            bnz_counter: -1,
            branch_or_jump_taken: false,
            branch_pc: 0,
            halt_flushed: false,
            instructions_completed: 0,
            cycles_cap,
            trace,
            full_diagram,
            status: Status::Running,
            stats: SimStats::default(),
        }
    }

    pub fn code_memory_size(&self) -> i32 {
        self.code_memory.len() as i32
    }

    /// Last valid program-counter value, `4000 + 4*(N-1)`.
    pub fn last_pc(&self) -> i32 {
        CODE_BASE + 4 * (self.code_memory_size() - 1)
    }

    /// Runs the pipeline to whatever its configured termination condition is.
    pub fn run(&mut self) -> Result<(), SimError> {
        loop {
            self.tick();
            if self.status != Status::Running {
                return match self.status {
                    Status::InvalidJump { pc, target } => {
                        Err(SimError::InvalidJump { pc, target })
                    }
                    _ => Ok(()),
                };
            }
        }
    }

    /// Advances the pipeline by exactly one cycle.
    ///
    /// Stages are invoked in reverse order (WB, MEM2, MEM1, EX2, EX1, DRF,
    /// F) so that each stage's output latch has already been drained this
    /// cycle before an upstream stage writes into it (§4.1, §5).
    pub fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }

        if self.branch_or_jump_taken {
            self.branch_or_jump_taken = false;
            self.pc = self.branch_pc;
        }

        if self.trace {
            self.print_cycle_header();
        }

        stages::write_back::wb_stage(self);
        stages::memory2::mem2_stage(self);
        stages::memory1::mem1_stage(self);
        stages::execute2::execute2_stage(self);
        stages::execute1::execute1_stage(self);
        stages::decode::decode_stage(self);
        stages::fetch::fetch_stage(self);

        self.clock += 1;
    }

    fn print_cycle_header(&self) {
        println!("--------------------------------");
        println!("Clock Cycle #: {}", self.clock);
        println!("--------------------------------");
    }
}
