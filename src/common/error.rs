//! Top-level error type for the simulator.

use thiserror::Error;

/// Errors that can terminate a simulation run before or during execution.
#[derive(Error, Debug)]
pub enum SimError {
    /// The instruction file could not be read, or produced no instructions.
    #[error("Unable to initialize CPU")]
    Setup(#[source] std::io::Error),

    /// A line of the assembly-text program could not be decoded.
    #[error("malformed instruction at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// `JUMP` resolved to a target outside the code memory range.
    #[error("Invalid Jump")]
    InvalidJump { pc: i32, target: i32 },
}
