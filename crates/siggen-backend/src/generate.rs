//! Main entry point for waveform synthesis.
//!
//! This module validates a config, dispatches on its signal type and returns
//! the sample matrix together with the tones that were actually synthesized.

use siggen_spec::{
    canonical_config_hash, validate_config, SignalType, SpecError, SynthesisConfig,
    ValidationWarning,
};
use tracing::{error, info, warn};

use crate::error::{SynthError, SynthResult};
use crate::matrix::{ResolvedTone, SampleMatrix};
use crate::synthesis::bpnoise::BandNoiseSynth;
use crate::synthesis::pulse::PulseSynth;
use crate::synthesis::sampled::SampledSineSynth;
use crate::synthesis::sawtooth::SawtoothSynth;
use crate::synthesis::sine::SineSynth;
use crate::synthesis::Synthesizer;

/// Result of waveform synthesis.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Synthesized (time, value) rows.
    pub matrix: SampleMatrix,
    /// Tones after coherent resolution and phase-from-delay.
    pub tones: Vec<ResolvedTone>,
    /// BLAKE3 hash of the (time, value) rows.
    pub matrix_hash: String,
    /// BLAKE3 hash of the canonical config.
    pub config_hash: String,
    /// Validation warnings raised by the config.
    pub warnings: Vec<ValidationWarning>,
}

/// Generates a waveform from a config.
///
/// # Arguments
/// * `config` - The synthesis config
///
/// # Returns
/// The sample matrix and resolved tones, or the validation errors that
/// prevented synthesis
pub fn generate(config: &SynthesisConfig) -> SynthResult<GenerateResult> {
    let warnings = match validate_config(config).into_result() {
        Ok(warnings) => warnings,
        Err(errors) => {
            error!(
                "Config for '{}' signal failed validation with {} error(s)",
                config.sigtype,
                errors.len()
            );
            return Err(SynthError::ValidationFailed(errors));
        }
    };
    for warning in &warnings {
        warn!("{}", warning);
    }

    info!(
        "Initializing {} signal: {} samples + {} extra, osr {}, seed {}",
        config.sigtype,
        config.nsamp,
        config.extra_sampl,
        config.effective_osr(),
        config.seed
    );

    let (matrix, tones) = synthesize(config)?;
    if matrix.len() != config.expected_rows() {
        return Err(SynthError::synthesis(format!(
            "{} signal produced {} rows, expected {}",
            config.sigtype,
            matrix.len(),
            config.expected_rows()
        )));
    }
    let matrix_hash = matrix.content_hash();
    let config_hash = canonical_config_hash(config)?;

    Ok(GenerateResult {
        matrix,
        tones,
        matrix_hash,
        config_hash,
        warnings,
    })
}

/// Parses a JSON config and generates its waveform.
///
/// An unknown signal type is logged at error level and returned as
/// [`SynthError::UnsupportedSignalType`].
pub fn generate_from_json(json: &str) -> SynthResult<GenerateResult> {
    let config = SynthesisConfig::from_json(json).map_err(|e| {
        if let SpecError::UnsupportedSignalType(ref name) = e {
            error!("Signal type '{}' not supported.", name);
        }
        SynthError::from(e)
    })?;
    generate(&config)
}

/// Dispatches on the signal type without validating.
fn synthesize(config: &SynthesisConfig) -> SynthResult<(SampleMatrix, Vec<ResolvedTone>)> {
    match config.sigtype {
        SignalType::Sine => {
            let synth = SineSynth::from_config(config)?;
            Ok((synth.synthesize(config.seed)?, synth.tones))
        }
        SignalType::SineSampled => {
            let synth = SampledSineSynth::from_config(config)?;
            Ok((synth.synthesize(config.seed)?, synth.sine.tones))
        }
        SignalType::Pulse => {
            let synth = PulseSynth::from_config(config)?;
            Ok((synth.synthesize(config.seed)?, primary_tone(config)))
        }
        SignalType::Sawtooth => {
            let synth = SawtoothSynth::from_config(config)?;
            Ok((synth.synthesize(config.seed)?, primary_tone(config)))
        }
        SignalType::BandpassNoise => {
            let synth = BandNoiseSynth::from_config(config)?;
            Ok((synth.synthesize(config.seed)?, primary_tone(config)))
        }
    }
}

/// Single-tone signal types use the first tone as configured.
fn primary_tone(config: &SynthesisConfig) -> Vec<ResolvedTone> {
    let tone = config.primary_tone();
    vec![ResolvedTone {
        requested_frequency: tone.frequency,
        frequency: tone.frequency,
        amplitude: tone.amplitude,
        common_mode: tone.common_mode,
        phase_deg: 0.0,
    }]
}
