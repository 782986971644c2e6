//! APEX pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator for the seven-stage
//! in-order APEX processor pipeline (Fetch, Decode/Register-Read, Execute-1,
//! Execute-2, Memory-1, Memory-2, Writeback).
//!
//! # Architecture
//!
//! * **Core**: seven-stage in-order pipeline with a register scoreboard and
//!   an operand-forwarding network.
//! * **Memory**: a flat, integer-addressable 4000-cell data memory.
//!
//! # Modules
//!
//! * `common`: shared types and error handling.
//! * `config`: configuration loading and parsing.
//! * `core`: CPU core implementation (pipeline stages, latches, hazards).
//! * `asm`: assembly-text loader that produces the decoded instruction array.
//! * `trace`: per-cycle trace formatting.
//! * `stats`: performance statistics collection.

/// Shared types and error handling used throughout the simulator.
pub mod common;

/// Configuration system for trace and output formatting.
pub mod config;

/// CPU core implementation: pipeline stages, latches, hazards, register file.
pub mod core;

/// Assembly-text program loader.
pub mod asm;

/// Per-cycle pipeline trace formatting.
pub mod trace;

/// Performance statistics collection and reporting.
pub mod stats;
