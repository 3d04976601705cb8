mod elf;
mod hex;

use colored::*;
use rv16k_core::constants::{DATA_RAM_SIZE, INST_ROM_SIZE};
use rv16k_core::cpu::Cpu;
use rv16k_core::trace::Tracer;
use std::fmt::Write;
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "rv16k-sim",
    about = "Cycle-stepped simulator for the RV16K 16-bit ISA."
)]
struct CliOptions {
    /// Suppress the per-cycle execution trace
    #[structopt(short = "q", long = "quiet")]
    quiet: bool,

    /// Dump the full data RAM after every cycle
    #[structopt(short = "m", long = "mem-dump")]
    mem_dump: bool,

    /// Also load ELF sections whose flags include the executable bit
    #[structopt(short = "x", long = "load-exec")]
    load_exec: bool,

    /// Seed instruction ROM from space-separated hex bytes, skipping the ELF loader
    #[structopt(short = "t", long = "text", value_name = "ROM_HEX")]
    rom_hex: Option<String>,

    /// Seed data RAM from space-separated hex bytes, skipping the ELF loader
    #[structopt(short = "d", long = "data", value_name = "RAM_HEX")]
    ram_hex: Option<String>,

    /// Path to an ELF32 image, read when neither -t nor -d is given
    #[structopt(value_name = "FILENAME", parse(from_os_str))]
    filename: Option<PathBuf>,

    /// Number of cycles to execute
    #[structopt(value_name = "NCYCLES")]
    ncycles: Option<String>,
}

fn main() {
    let mut options = CliOptions::from_args();

    let ncycles = match take_cycle_count(&mut options) {
        Ok(ncycles) => ncycles,
        Err(message) => fail(&message),
    };

    let mut cpu = Cpu::new();
    match seed_memories(&mut cpu, &options) {
        Ok(()) => {}
        Err(message) => fail(&message),
    }

    let mut trace = if options.quiet {
        Tracer::quiet()
    } else {
        Tracer::stdout()
    };

    for _ in 0..ncycles {
        if !cpu.step(&mut trace) {
            // Decode failure ends the run; the register dump still prints.
            break;
        }
        if options.mem_dump {
            print!("{}", format_ram(&cpu));
        }
    }

    print!("{}", format_registers(&cpu));
}

/// NCYCLES is the last positional argument, so when the ELF filename is
/// omitted (hex seeding) the count arrives in the FILENAME slot.
fn take_cycle_count(options: &mut CliOptions) -> Result<u64, String> {
    let raw = match options.ncycles.take() {
        Some(raw) => raw,
        None => match options.filename.take() {
            Some(path) => path.to_string_lossy().into_owned(),
            None => return Err("NCYCLES is required".into()),
        },
    };
    match raw.parse::<u64>() {
        Ok(ncycles) if ncycles > 0 => Ok(ncycles),
        _ => Err(format!(
            "NCYCLES must be a positive decimal integer, got {:?}",
            raw
        )),
    }
}

fn seed_memories(cpu: &mut Cpu, options: &CliOptions) -> Result<(), String> {
    if options.rom_hex.is_none() && options.ram_hex.is_none() {
        let filename = match &options.filename {
            Some(filename) => filename,
            None => return Err("either FILENAME or a -t/-d seed string is required".into()),
        };
        let rom = elf::load_rom_image(filename, options.load_exec)
            .map_err(|error| format!("{}: {}", filename.display(), error))?;
        cpu.load_rom(&rom);
        return Ok(());
    }

    if let Some(text) = &options.rom_hex {
        let bytes = hex::parse_hex_bytes(text)?;
        if bytes.len() > INST_ROM_SIZE {
            return Err("ROM seed is longer than the instruction ROM".into());
        }
        cpu.load_rom(&bytes);
    }
    if let Some(text) = &options.ram_hex {
        let bytes = hex::parse_hex_bytes(text)?;
        if bytes.len() > DATA_RAM_SIZE {
            return Err("RAM seed is longer than the data RAM".into());
        }
        cpu.load_ram(&bytes);
    }
    Ok(())
}

/// The post-run register dump, printed regardless of -q.
fn format_registers(cpu: &Cpu) -> String {
    let mut out = String::new();
    for (index, value) in cpu.reg.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "x{}={}\t", index, value);
    }
    out
}

/// The -m dump: the whole data RAM as 2-digit hex bytes, 16 per line.
fn format_ram(cpu: &Cpu) -> String {
    let mut out = String::new();
    for row in cpu.data_ram.chunks(16) {
        let bytes: Vec<String> = row.iter().map(|byte| format!("{:02X}", byte)).collect();
        let _ = writeln!(out, "{}", bytes.join(" "));
    }
    out
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", "error:".red().bold(), message);
    process::exit(1);
}
