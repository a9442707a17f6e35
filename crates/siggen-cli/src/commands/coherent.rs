//! Coherent command implementation
//!
//! Resolves a requested tone frequency to the nearest prime-cycle coherent
//! frequency for a given sample rate and record length.

use anyhow::{Context, Result};
use colored::Colorize;
use siggen_backend::coherent_frequency;
use std::process::ExitCode;

/// Outcome of a coherent frequency lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoherentLookup {
    pub frequency: f64,
    pub cycles: u64,
}

/// Resolve `fin` and report the cycle count it lands on.
pub fn resolve(fs: f64, fin: f64, nsamp: usize) -> Result<CoherentLookup> {
    let frequency = coherent_frequency(fs, fin, nsamp).with_context(|| {
        format!(
            "Failed to resolve coherent frequency for {} Hz at {} Hz over {} samples",
            fin, fs, nsamp
        )
    })?;
    let cycles = (nsamp as f64 * frequency / fs).round() as u64;
    Ok(CoherentLookup { frequency, cycles })
}

/// Run the coherent command
///
/// # Arguments
/// * `fs` - Sample rate in Hz
/// * `fin` - Requested tone frequency in Hz
/// * `nsamp` - Record length in samples
pub fn run(fs: f64, fin: f64, nsamp: usize) -> Result<ExitCode> {
    let lookup = resolve(fs, fin, nsamp)?;

    println!("{} {} Hz", "Requested:".dimmed(), fin);
    println!(
        "{} {} Hz",
        "Coherent:".cyan().bold(),
        lookup.frequency
    );
    println!(
        "{} {} in {} samples",
        "Cycles:".dimmed(),
        lookup.cycles,
        nsamp
    );

    Ok(ExitCode::SUCCESS)
}
