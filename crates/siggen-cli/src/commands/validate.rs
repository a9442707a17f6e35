//! Validate command implementation
//!
//! Validates a config file and reports errors and warnings.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use siggen_spec::{canonical_config_hash, validate_config, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::reporting;
use crate::input::{load_config, LoadResult};

/// Machine-readable validate output.
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub ok: bool,
    pub sigtype: String,
    pub config_hash: String,
    pub source_hash: String,
    pub expected_rows: usize,
    pub errors: Vec<JsonIssue>,
    pub warnings: Vec<JsonIssue>,
}

/// A single error or warning in JSON output.
#[derive(Debug, Serialize)]
pub struct JsonIssue {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Run the validate command
///
/// # Arguments
/// * `config_path` - Path to the JSON config file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    let LoadResult {
        config,
        source_hash,
    } = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;

    let config_hash =
        canonical_config_hash(&config).context("Failed to hash config")?;
    let result = validate_config(&config);

    if json_output {
        let output = to_output(&result, &config, config_hash, source_hash);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), config_path);
        println!("{} {}", "Signal:".dimmed(), config.sigtype);
        println!("{} {}", "Config hash:".dimmed(), &config_hash[..16]);
        println!("{} {}", "Rows:".dimmed(), config.expected_rows());

        reporting::print_errors(&result.errors);
        reporting::print_warnings(&result.warnings);

        if result.is_ok() {
            println!("\n{}", "SUCCESS".green().bold());
        } else {
            println!(
                "\n{} {} error(s)",
                "FAILED".red().bold(),
                result.errors.len()
            );
        }
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn to_output(
    result: &ValidationResult,
    config: &siggen_spec::SynthesisConfig,
    config_hash: String,
    source_hash: String,
) -> ValidateOutput {
    ValidateOutput {
        ok: result.is_ok(),
        sigtype: config.sigtype.to_string(),
        config_hash,
        source_hash,
        expected_rows: config.expected_rows(),
        errors: result
            .errors
            .iter()
            .map(|e| JsonIssue {
                code: e.code.code().to_string(),
                message: e.message.clone(),
                path: e.path.clone(),
            })
            .collect(),
        warnings: result
            .warnings
            .iter()
            .map(|w| JsonIssue {
                code: w.code.code().to_string(),
                message: w.message.clone(),
                path: w.path.clone(),
            })
            .collect(),
    }
}
