use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chip8_core::constants::{CLOCK_HZ, TIMER_HZ};
use chip8_core::{Chip8, Quirks};

#[cfg(feature = "sdl")]
mod keymap;
mod run;

/// Chip-8 interpreter
#[derive(Parser, Debug)]
#[command(name = "chip8")]
#[command(about = "Runs or disassembles a Chip-8 ROM", long_about = None)]
struct Args {
    /// Path to the ROM file
    rom: PathBuf,

    /// Print the disassembled program and exit
    #[arg(short, long)]
    decompile: bool,

    /// Print each instruction as it executes
    #[arg(short, long)]
    trace: bool,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_HZ)]
    clock_hz: u32,

    /// Timer decrements per second
    #[arg(long, default_value_t = TIMER_HZ)]
    timer_hz: u32,

    /// Stop after this many instructions
    #[arg(short, long)]
    max_cycles: Option<u64>,

    /// Keep keys down after SKP/SKNP reads them
    #[arg(long)]
    sticky_keys: bool,

    /// Window size multiplier
    #[cfg(feature = "sdl")]
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Run without opening a window
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut chip8 = Chip8::with_quirks(Quirks {
        consume_keys: !args.sticky_keys,
    });

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    let loaded = chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    println!("loaded {} bytes from {}", loaded, args.rom.display());

    if args.decompile {
        for trace in chip8.decompile() {
            println!("{}", trace);
        }
        return Ok(());
    }

    let options = run::Options {
        trace: args.trace,
        clock_hz: args.clock_hz,
        timer_hz: args.timer_hz,
        max_cycles: args.max_cycles,
        #[cfg(feature = "sdl")]
        scale: args.scale,
        headless: args.headless,
    };
    run::run(chip8, &options)
}
