//! SigGen CLI - Command-line interface for test-waveform synthesis
//!
//! This binary provides commands for generating, validating and analyzing
//! waveform configs, and for looking up coherent test frequencies.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use siggen_cli::commands;

/// SigGen - Deterministic Test-Waveform Synthesizer
#[derive(Parser)]
#[command(name = "siggen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a waveform from a config file
    Generate {
        /// Path to the JSON config file
        #[arg(short, long)]
        config: String,

        /// Output format
        #[arg(long, default_value = "csv", value_parser = ["csv", "json"])]
        format: String,

        /// Seed overriding the config's seed
        #[arg(long)]
        seed: Option<u32>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Resolve a frequency to a prime-cycle coherent frequency
    Coherent {
        /// Sample rate in Hz
        #[arg(long)]
        fs: f64,

        /// Requested tone frequency in Hz
        #[arg(long)]
        fin: f64,

        /// Record length in samples
        #[arg(long)]
        nsamp: usize,
    },

    /// Validate a config file without generating
    Validate {
        /// Path to the JSON config file
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate a sine config and estimate tone amplitudes and SNR
    Analyze {
        /// Path to the JSON config file
        #[arg(short, long)]
        config: String,

        /// Bins on each side of a tone excluded from the noise floor
        #[arg(long, default_value = "0")]
        guard_bins: usize,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so generated CSV/JSON on stdout stays clean.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            config,
            format,
            seed,
            output,
        } => commands::generate::run(&config, &format, seed, output.as_deref()),
        Commands::Coherent { fs, fin, nsamp } => commands::coherent::run(fs, fin, nsamp),
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Analyze {
            config,
            guard_bins,
            json,
        } => commands::analyze::run(&config, guard_bins, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
