//! Analyze command implementation
//!
//! Generates a sine config and estimates the level of each tone and the
//! overall SNR from the record's spectrum.

use anyhow::{Context, Result};
use colored::Colorize;
use siggen_backend::analysis::{analyze_tones, SpectrumReport};
use siggen_spec::{SignalType, SynthesisConfig};
use std::path::Path;
use std::process::ExitCode;

use super::reporting;
use crate::input::{load_config, LoadResult};

/// Generate `config` and analyze the resulting record.
///
/// Only continuous sine configs are accepted since the other signal types
/// have no tone list to measure against.
pub fn analyze_config(config: &SynthesisConfig, guard_bins: usize) -> Result<SpectrumReport> {
    if config.sigtype != SignalType::Sine {
        anyhow::bail!(
            "analyze supports only 'sine' configs, got '{}'",
            config.sigtype
        );
    }

    let result = siggen_backend::generate(config).context("Failed to generate waveform")?;
    let sample_rate = config.fs * config.effective_osr() as f64;
    let frequencies: Vec<f64> = result.tones.iter().map(|t| t.frequency).collect();

    Ok(analyze_tones(
        result.matrix.values(),
        sample_rate,
        &frequencies,
        guard_bins,
    ))
}

/// Run the analyze command
///
/// # Arguments
/// * `config_path` - Path to the JSON config file
/// * `guard_bins` - Bins on each side of a tone excluded from the noise floor
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(config_path: &str, guard_bins: usize, json_output: bool) -> Result<ExitCode> {
    let LoadResult { config, .. } = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;

    let report = match analyze_config(&config, guard_bins) {
        Ok(report) => report,
        Err(e) => {
            if let Some(synth) = e.downcast_ref::<siggen_backend::SynthError>() {
                reporting::print_synth_error(synth);
                return Ok(ExitCode::from(1));
            }
            return Err(e);
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Analyzing:".cyan().bold(), config_path);
    if !config.coherent {
        println!(
            "  {} {}",
            "!".yellow(),
            "coherent is off; tone energy will leak into neighboring bins".dimmed()
        );
    }
    println!();
    for (i, tone) in report.tones.iter().enumerate() {
        println!(
            "  tone {}: {:.6e} Hz  bin {:>6}  amplitude {:.6}",
            i, tone.frequency, tone.bin, tone.amplitude
        );
    }
    println!("\n{} {:.2} dB", "SNR:".bold(), report.snr_db);

    Ok(ExitCode::SUCCESS)
}
