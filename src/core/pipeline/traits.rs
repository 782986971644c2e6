//! Pipeline latch interface.
//!
//! A single trait is enough for APEX: every stage holds exactly one
//! in-flight instruction (no superscalar bundling), so the latch only
//! needs to support being turned into a bubble and being queried for
//! emptiness — the operations the squash mechanism (§4.8) performs.

/// Behavior common to the seven stage latches (F, DRF, EX1, EX2, MEM1,
/// MEM2, WB).
pub trait PipelineLatch {
    /// Turns this latch into an empty bubble, as a squash does.
    fn flush(&mut self);

    /// True if the latch holds no in-flight instruction.
    fn is_empty(&self) -> bool;
}
