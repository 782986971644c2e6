//! APEX pipeline simulator CLI.
//!
//! Usage: `apex-sim <program> <simulate|display> [--cycles N] [--config FILE]`,
//! matching `original_source/main.c`'s `<file> <mode> <cycles>` contract.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use apex_sim::asm;
use apex_sim::common::SimError;
use apex_sim::config::{Config, OutputFormat};
use apex_sim::core::cpu::{Cpu, Status};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run silently to completion (or the cycle cap), then print final state.
    Simulate,
    /// Print the seven-stage trace every cycle.
    Display,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "APEX cycle-accurate pipeline simulator")]
struct Args {
    /// Assembly-text program to load.
    program: PathBuf,

    /// `simulate` (silent) or `display` (verbose per-cycle trace).
    mode: Mode,

    /// Stop after exactly this many cycles; `0` runs to completion.
    #[arg(long, default_value_t = 0)]
    cycles: i32,

    /// Optional TOML config file for trace/output formatting.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref());

    if let Err(err) = run(&args, &config) {
        eprintln!("APEX_Error : {err}");
        process::exit(1);
    }
}

fn run(args: &Args, config: &Config) -> Result<(), SimError> {
    let program = asm::load_program(&args.program).map_err(|err| {
        tracing::error!(%err, path = %args.program.display(), "setup failed");
        err
    })?;

    let trace = args.mode == Mode::Display;
    let mut cpu = Cpu::new(program, args.cycles, trace, config.trace.full_diagram);

    let result = cpu.run();
    cpu.stats.finish(cpu.clock, cpu.instructions_completed);

    match result {
        Ok(()) => match cpu.status {
            Status::InvalidJump { .. } => unreachable!("InvalidJump surfaces as Err"),
            _ => {
                println!("Simulation Complete");
                print_final_state(&cpu, config);
                Ok(())
            }
        },
        Err(SimError::InvalidJump { pc, target }) => {
            tracing::error!(pc, target, "invalid jump target");
            println!("Invalid Jump");
            print_final_state(&cpu, config);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn print_final_state(cpu: &Cpu, config: &Config) {
    match config.output.format {
        OutputFormat::Json => print_json_state(cpu),
        OutputFormat::Text => {
            cpu.regs.dump(&cpu.scoreboard);
            println!("Data Memory (first 100 cells):");
            for (i, cell) in cpu.data_memory.iter().take(100).enumerate() {
                println!("|    MEM[{i}]\t     |    Data Value = {cell}\t    |");
            }
            cpu.stats.print();
        }
    }
}

fn print_json_state(cpu: &Cpu) {
    let registers: Vec<i32> = (0..16).map(|i| cpu.regs.read(i)).collect();
    let memory: Vec<i32> = cpu.data_memory.iter().take(100).copied().collect();
    let report = serde_json::json!({
        "registers": registers,
        "data_memory": memory,
        "cycles": cpu.clock,
        "instructions_retired": cpu.instructions_completed,
    });
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
