//! Quantis RNG CLI — `qrng` command.
//!
//! Roll dice, flip coins, draw scaled integers/doubles and random hex
//! strings from a hardware RNG, or list the devices that are attached.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quantis_rng::{BackendKind, Command, CommandOutput, DeviceClass, RngConfig, Sampler};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// Range-scaled draws from a hardware random number generator.
#[derive(Parser, Debug)]
#[command(
    name = "qrng",
    about = "Quantis RNG CLI",
    version,
    long_about = "qrng — Quantis RNG CLI\n\nDraw dice rolls, coin flips, scaled numbers and random hex strings\nfrom a Quantis PCI/USB random number generator."
)]
struct Cli {
    /// Device class to draw from (pci or usb)
    #[arg(long, global = true)]
    device: Option<DeviceClass>,

    /// Device index within the class
    #[arg(long, global = true)]
    index: Option<u32>,

    /// Backend (simulated or devnode)
    #[arg(long, global = true)]
    backend: Option<BackendKind>,

    /// Directory holding qrandomN device nodes (devnode backend)
    #[arg(long, global = true)]
    dev_dir: Option<PathBuf>,

    /// Seed for the simulated backend
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Load settings from a JSON config file (flags take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail random-string when the device reports an error status
    #[arg(long, global = true)]
    strict: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Display information about attached devices
    Info,

    /// Roll a die (1-100)
    Roll,

    /// Draw a jackpot amount (0.01-100.00)
    Jackpot,

    /// Flip a coin (1 or 2)
    Coinflip,

    /// Spin the wheel (1.00-25.99)
    Wheel,

    /// Draw integers in [min, max]
    RandomInt {
        /// Lower bound (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        min: i32,

        /// Upper bound (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        max: i32,

        /// Number of values to draw (default: a single value)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Draw a double in [min, max], rounded to 2 decimals
    RandomDouble {
        /// Lower bound (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        min: f64,

        /// Upper bound (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        max: f64,
    },

    /// Draw random byte strings, hex-encoded
    RandomString {
        /// Number of strings
        #[arg(long, default_value = "1")]
        count: usize,

        /// Length of each string in bytes
        #[arg(long, default_value = "16")]
        length: usize,
    },
}

impl Commands {
    fn to_command(&self) -> Command {
        match *self {
            Commands::Info => Command::Info,
            Commands::Roll => Command::Roll,
            Commands::Jackpot => Command::Jackpot,
            Commands::Coinflip => Command::Coinflip,
            Commands::Wheel => Command::Wheel,
            Commands::RandomInt { min, max, count } => Command::RandomInt { min, max, count },
            Commands::RandomDouble { min, max } => Command::RandomDouble { min, max },
            Commands::RandomString { count, length } => Command::RandomString { count, length },
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn resolve_config(cli: &Cli) -> Result<RngConfig> {
    let mut cfg = match &cli.config {
        Some(path) => RngConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RngConfig::default(),
    };

    if let Some(device) = cli.device {
        cfg.device = device;
    }
    if let Some(index) = cli.index {
        cfg.index = index;
    }
    if let Some(backend) = cli.backend {
        cfg.backend = backend;
    }
    if let Some(dir) = &cli.dev_dir {
        cfg.dev_dir = dir.clone();
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    Ok(cfg)
}

// ── Command handlers ──────────────────────────────────────────────────────────

fn cmd_run(cli: &Cli) -> Result<()> {
    let cfg = resolve_config(cli)?;
    let command = cli.command.to_command();
    log::debug!(
        "{} via {:?} backend on {}",
        command.name(),
        cfg.backend,
        cfg.selector()
    );

    let sampler = Sampler::open(cfg.open_device(), cfg.selector()).strict_status(cli.strict);
    let output = command
        .run(&sampler)
        .with_context(|| format!("{} failed", command.name()))?;

    print_output(&output, cli.json)
}

fn print_output(output: &CommandOutput, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(output).context("failed to serialize output")?;
        println!("{text}");
        return Ok(());
    }

    if let CommandOutput::Report(_) = output {
        println!(" Quantis RNG CLI - Displaying devices info:");
        println!();
    }
    print!("{output}");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = cmd_run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
