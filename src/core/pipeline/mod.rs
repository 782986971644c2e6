//! The seven-stage pipeline engine: latches, hazard/forwarding logic, and
//! the latch trait the squash mechanism relies on.

/// Register scoreboard consultation and the operand-forwarding network.
pub mod hazards;

/// The per-stage latch type shared by all seven stages.
pub mod latches;

/// The `PipelineLatch` trait (flush / is_empty).
pub mod traits;
