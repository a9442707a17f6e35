//! Generate command implementation
//!
//! Synthesizes the waveform described by a config file and writes the sample
//! matrix as CSV or JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use siggen_backend::{GenerateResult, ResolvedTone};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::reporting;
use crate::input::{load_config, LoadResult};

/// JSON document written by `--format json`.
#[derive(Debug, Serialize)]
pub struct GenerateOutput<'a> {
    pub sigtype: String,
    pub config_hash: &'a str,
    pub matrix_hash: &'a str,
    pub rows: usize,
    pub tones: &'a [ResolvedTone],
    pub time: &'a [f64],
    pub value: &'a [f64],
}

/// Run the generate command
///
/// # Arguments
/// * `config_path` - Path to the JSON config file
/// * `format` - Output format (csv, json)
/// * `seed` - Optional seed overriding the config's seed
/// * `output` - Output file path (default: stdout)
///
/// # Returns
/// Exit code: 0 on success, 1 if synthesis failed
pub fn run(
    config_path: &str,
    format: &str,
    seed: Option<u32>,
    output: Option<&str>,
) -> Result<ExitCode> {
    let LoadResult {
        mut config,
        source_hash,
    } = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;

    if let Some(seed) = seed {
        config.seed = seed;
    }

    eprintln!(
        "{} {} ({} signal, seed {}, source {})",
        "Generating:".cyan().bold(),
        config_path,
        config.sigtype,
        config.seed,
        &source_hash[..16]
    );

    let result = match siggen_backend::generate(&config) {
        Ok(result) => result,
        Err(e) => {
            reporting::print_synth_error(&e);
            return Ok(ExitCode::from(1));
        }
    };

    for warning in &result.warnings {
        eprintln!("  {} {}", "!".yellow(), warning);
    }

    let rendered = render(&result, config.sigtype.as_str(), format)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {}", path))?;
            eprintln!(
                "{} {} rows to {}",
                "Wrote".green().bold(),
                result.matrix.len(),
                path
            );
        }
        None => print!("{}", rendered),
    }

    Ok(ExitCode::SUCCESS)
}

/// Render a generate result in the requested format.
pub fn render(result: &GenerateResult, sigtype: &str, format: &str) -> Result<String> {
    match format {
        "csv" => Ok(result.matrix.to_csv()),
        "json" => {
            let output = GenerateOutput {
                sigtype: sigtype.to_string(),
                config_hash: &result.config_hash,
                matrix_hash: &result.matrix_hash,
                rows: result.matrix.len(),
                tones: &result.tones,
                time: result.matrix.times(),
                value: result.matrix.values(),
            };
            let mut json = serde_json::to_string_pretty(&output)?;
            json.push('\n');
            Ok(json)
        }
        other => anyhow::bail!("unknown output format: {} (expected csv or json)", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use siggen_spec::SynthesisConfig;

    fn small_sine() -> GenerateResult {
        siggen_backend::generate(&SynthesisConfig {
            nsamp: 4,
            ..SynthesisConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_render_csv() {
        let result = small_sine();
        let csv = render(&result, "sine", "csv").unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "time,value");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_render_json() {
        let result = small_sine();
        let json = render(&result, "sine", "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"], serde_json::json!(4));
        assert_eq!(value["sigtype"], serde_json::json!("sine"));
        assert_eq!(value["time"].as_array().unwrap().len(), 4);
        assert_eq!(value["matrix_hash"], serde_json::json!(result.matrix_hash));
    }

    #[test]
    fn test_render_unknown_format() {
        let result = small_sine();
        let err = render(&result, "sine", "xml").unwrap_err();
        assert!(err.to_string().contains("unknown output format"));
    }
}
