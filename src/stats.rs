//! Simulation statistics collection and reporting.
//!
//! Tracks the handful of metrics the pipeline core actually reports:
//! retired-instruction count, clock count, and wall-clock run time.

use std::time::Instant;

pub struct SimStats {
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
        }
    }
}

impl SimStats {
    pub fn finish(&mut self, cycles: i32, instructions_retired: i32) {
        self.cycles = cycles as u64;
        self.instructions_retired = instructions_retired as u64;
    }

    pub fn print(&self) {
        println!("Total Cycles: {}", self.cycles);
        println!("Instructions Retired: {}", self.instructions_retired);
        println!("Wall Time: {:.3?}", self.start_time.elapsed());
    }
}
