//! The seven APEX pipeline stages. Each module exposes a single
//! `*_stage(cpu: &mut Cpu)` function; `Cpu::tick` invokes them in reverse
//! pipeline order.

pub mod decode;
pub mod execute1;
pub mod execute2;
pub mod fetch;
pub mod memory1;
pub mod memory2;
pub mod write_back;
