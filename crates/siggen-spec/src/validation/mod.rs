//! Config validation logic.

pub mod common;

#[cfg(test)]
mod tests;

use crate::config::{SignalType, SynthesisConfig};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};

pub use common::{
    validate_finite, validate_non_negative, validate_positive, validate_range,
    validate_unit_interval, CommonValidationError,
};

/// Upper bound on output rows for a single synthesis call.
pub const MAX_OUTPUT_ROWS: usize = 1 << 26;

/// Relative slack when comparing edge times against the pulse width.
const EDGE_FIT_TOLERANCE: f64 = 1e-12;

/// Validates a config and returns a validation result.
///
/// Errors make synthesis impossible; warnings describe inputs that are
/// recovered locally (broadcast tone lists, ignored oversampling, ...).
///
/// # Example
/// ```
/// use siggen_spec::{validate_config, SynthesisConfig};
///
/// let result = validate_config(&SynthesisConfig::default());
/// assert!(result.is_ok());
/// ```
pub fn validate_config(config: &SynthesisConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_sampling(config, &mut result);
    validate_tone_lists(config, &mut result);
    validate_timing(config, &mut result);
    validate_snr(config, &mut result);

    match config.sigtype {
        SignalType::Sine => {}
        SignalType::SineSampled => validate_sampled(config, &mut result),
        SignalType::Pulse => validate_pulse(config, &mut result),
        SignalType::Sawtooth | SignalType::BandpassNoise => {}
    }

    if config.expected_rows() > MAX_OUTPUT_ROWS {
        result.add_error(ValidationError::with_path(
            ErrorCode::TooManySamples,
            format!(
                "config produces too many rows ({} > max {})",
                config.expected_rows(),
                MAX_OUTPUT_ROWS
            ),
            "nsamp",
        ));
    }

    result
}

fn push_common(
    result: &mut ValidationResult,
    code: ErrorCode,
    path: &str,
    outcome: Result<(), CommonValidationError>,
) {
    if let Err(e) = outcome {
        result.add_error(ValidationError::with_path(code, e.message, path));
    }
}

fn validate_sampling(config: &SynthesisConfig, result: &mut ValidationResult) {
    if config.sigtype != SignalType::Pulse {
        push_common(
            result,
            ErrorCode::InvalidSampleRate,
            "fs",
            validate_positive("fs", config.fs),
        );
    }

    if config.total_samples() == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleCount,
            "nsamp + extra_sampl must be at least 1",
            "nsamp",
        ));
    } else if config.coherent && config.nsamp == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleCount,
            "coherent frequency resolution requires nsamp >= 1",
            "nsamp",
        ));
    }

    if config.sigtype.is_continuous() && config.sig_osr == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidOversampling,
            "sig_osr must be at least 1",
            "sig_osr",
        ));
    }
}

fn validate_tone_lists(config: &SynthesisConfig, result: &mut ValidationResult) {
    let lists = [
        ("sig_freq", &config.sig_freq),
        ("sig_amp", &config.sig_amp),
        ("sig_cm", &config.sig_cm),
    ];
    for (name, values) in lists {
        if values.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyToneList,
                format!("{} must contain at least one value", name),
                name,
            ));
        }
    }

    let needs_positive_freq = matches!(config.sigtype, SignalType::Pulse | SignalType::Sawtooth);
    for (i, &f) in config.sig_freq.iter().enumerate() {
        let path = format!("sig_freq[{}]", i);
        let outcome = if needs_positive_freq {
            validate_positive("sig_freq", f)
        } else {
            validate_non_negative("sig_freq", f)
        };
        push_common(result, ErrorCode::InvalidFrequency, &path, outcome);
    }
    for (name, values) in [("sig_amp", &config.sig_amp), ("sig_cm", &config.sig_cm)] {
        for (i, &v) in values.iter().enumerate() {
            let path = format!("{}[{}]", name, i);
            push_common(result, ErrorCode::InvalidLevel, &path, validate_finite(name, v));
        }
    }

    match config.sigtype {
        SignalType::Sine | SignalType::SineSampled => {
            if !config.sig_freq.is_empty() {
                let (_, warnings) = config.broadcast_tones();
                for warning in warnings {
                    result.add_warning(warning);
                }
            }
        }
        SignalType::Pulse | SignalType::Sawtooth | SignalType::BandpassNoise => {
            let multi = config.sig_freq.len() > 1
                || config.sig_amp.len() > 1
                || config.sig_cm.len() > 1;
            if multi {
                result.add_warning(ValidationWarning::new(
                    WarningCode::ExtraTonesIgnored,
                    format!(
                        "signal type '{}' uses only the first tone; remaining entries are ignored",
                        config.sigtype
                    ),
                ));
            }
        }
    }
}

fn validate_timing(config: &SynthesisConfig, result: &mut ValidationResult) {
    for (name, value) in [
        ("sig_phase", config.sig_phase),
        ("tau", config.tau),
        ("after", config.after),
    ] {
        push_common(result, ErrorCode::InvalidTiming, name, validate_finite(name, value));
    }
}

fn validate_snr(config: &SynthesisConfig, result: &mut ValidationResult) {
    if let Err(e) = validate_finite("snr", config.snr) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSnr,
            e.message,
            "snr",
        ));
        return;
    }
    if config.snr < 0.0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::NegativeSnrIgnored,
            format!("snr {} dB is negative; no noise will be added", config.snr),
            "snr",
        ));
    }
}

fn validate_sampled(config: &SynthesisConfig, result: &mut ValidationResult) {
    if config.sig_osr != 1 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::OversamplingIgnored,
            format!(
                "oversampling is not supported for sampled sine; sig_osr {} forced to 1",
                config.sig_osr
            ),
            "sig_osr",
        ));
    }

    push_common(
        result,
        ErrorCode::InvalidEdgeTime,
        "trise",
        validate_non_negative("trise", config.trise),
    );
    if config.fs > 0.0 && config.trise >= 1.0 / config.fs {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::RiseTimeExceedsSamplePeriod,
            format!(
                "trise {} s is not shorter than the sample period {} s; held samples will overlap",
                config.trise,
                1.0 / config.fs
            ),
            "trise",
        ));
    }
}

fn validate_pulse(config: &SynthesisConfig, result: &mut ValidationResult) {
    for (name, value) in [("high", config.high), ("low", config.low)] {
        push_common(result, ErrorCode::InvalidLevel, name, validate_finite(name, value));
    }
    push_common(
        result,
        ErrorCode::InvalidDutyCycle,
        "duty",
        validate_unit_interval("duty", config.duty),
    );

    let rise_ok = validate_non_negative("trise", config.trise);
    let fall_ok = validate_non_negative("tfall", config.tfall);
    let edges_valid = rise_ok.is_ok() && fall_ok.is_ok();
    push_common(result, ErrorCode::InvalidEdgeTime, "trise", rise_ok);
    push_common(result, ErrorCode::InvalidEdgeTime, "tfall", fall_ok);

    if let Some(sd) = config.jitter_sd {
        push_common(
            result,
            ErrorCode::InvalidJitter,
            "jitter_sd",
            validate_non_negative("jitter_sd", sd),
        );
    }

    let freq = config.sig_freq.first().copied().unwrap_or(0.0);
    if !edges_valid || !(freq > 0.0 && freq.is_finite()) || !(0.0..=1.0).contains(&config.duty) {
        return;
    }

    let high_time = config.duty / freq;
    let low_time = (1.0 - config.duty) / freq;
    if config.trise > high_time * (1.0 + EDGE_FIT_TOLERANCE) {
        result.add_error(ValidationError::with_path(
            ErrorCode::EdgeExceedsPulseWidth,
            format!(
                "trise {} s exceeds the high time duty/freq = {} s",
                config.trise, high_time
            ),
            "trise",
        ));
    }
    if config.tfall > low_time * (1.0 + EDGE_FIT_TOLERANCE) {
        result.add_error(ValidationError::with_path(
            ErrorCode::EdgeExceedsPulseWidth,
            format!(
                "tfall {} s exceeds the low time (1 - duty)/freq = {} s",
                config.tfall, low_time
            ),
            "tfall",
        ));
    }
}
