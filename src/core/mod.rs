//! The APEX pipeline core: architectural state, the instruction set, the
//! seven-stage engine, and its hazard/forwarding logic.

/// Architectural state: the general-purpose register file and scoreboard.
pub mod arch;

/// The `Cpu` struct and its per-cycle driver.
pub mod cpu;

/// The closed instruction set the pipeline understands.
pub mod isa;

/// The pipeline engine: latches, hazards/forwarding, and stage modules.
pub mod pipeline;

/// The seven pipeline stages.
pub mod stages;
