//! APEX architectural state.
//!
//! Contains the register file and the scoreboard that tracks which
//! registers are claimed by in-flight instructions.

/// General-purpose register file and scoreboard.
pub mod gpr;
