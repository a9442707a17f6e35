use super::*;
use crate::config::SlopeType;

fn pulse_config() -> SynthesisConfig {
    SynthesisConfig {
        sigtype: SignalType::Pulse,
        sig_freq: vec![1e9],
        nsamp: 4,
        ..SynthesisConfig::default()
    }
}

#[test]
fn test_default_config_is_valid() {
    let result = validate_config(&SynthesisConfig::default());
    assert!(result.is_ok());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_every_signal_type_default_is_valid() {
    for sigtype in SignalType::ALL {
        let result = validate_config(&SynthesisConfig::new(sigtype));
        assert!(result.is_ok(), "{} should validate: {:?}", sigtype, result.errors);
    }
}

#[test]
fn test_zero_sample_rate() {
    let config = SynthesisConfig {
        fs: 0.0,
        ..SynthesisConfig::default()
    };
    let result = validate_config(&config);
    assert!(result.has_error(ErrorCode::InvalidSampleRate));
}

#[test]
fn test_pulse_ignores_sample_rate() {
    let config = SynthesisConfig {
        fs: 0.0,
        ..pulse_config()
    };
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_zero_samples() {
    let config = SynthesisConfig {
        nsamp: 0,
        extra_sampl: 0,
        ..SynthesisConfig::default()
    };
    assert!(validate_config(&config).has_error(ErrorCode::InvalidSampleCount));
}

#[test]
fn test_coherent_needs_nominal_samples() {
    let config = SynthesisConfig {
        nsamp: 0,
        extra_sampl: 8,
        coherent: true,
        ..SynthesisConfig::default()
    };
    assert!(validate_config(&config).has_error(ErrorCode::InvalidSampleCount));
}

#[test]
fn test_zero_oversampling() {
    let config = SynthesisConfig {
        sig_osr: 0,
        ..SynthesisConfig::default()
    };
    assert!(validate_config(&config).has_error(ErrorCode::InvalidOversampling));
}

#[test]
fn test_empty_frequency_list() {
    let config = SynthesisConfig {
        sig_freq: vec![],
        ..SynthesisConfig::default()
    };
    let result = validate_config(&config);
    assert!(result.has_error(ErrorCode::EmptyToneList));
}

#[test]
fn test_negative_frequency() {
    let config = SynthesisConfig {
        sig_freq: vec![1e6, -2e6],
        sig_amp: vec![0.5, 0.5],
        sig_cm: vec![0.0, 0.0],
        ..SynthesisConfig::default()
    };
    let result = validate_config(&config);
    let err = result
        .errors
        .iter()
        .find(|e| e.code == ErrorCode::InvalidFrequency)
        .expect("frequency error");
    assert_eq!(err.path.as_deref(), Some("sig_freq[1]"));
}

#[test]
fn test_tone_mismatch_is_a_warning() {
    let config = SynthesisConfig {
        sig_freq: vec![1e6, 2e6],
        sig_amp: vec![0.5],
        sig_cm: vec![0.0],
        ..SynthesisConfig::default()
    };
    let result = validate_config(&config);
    assert!(result.is_ok());
    assert_eq!(
        result
            .warnings
            .iter()
            .filter(|w| w.code == WarningCode::ToneLengthMismatch)
            .count(),
        2
    );
}

#[test]
fn test_non_finite_amplitude() {
    let config = SynthesisConfig {
        sig_amp: vec![f64::NAN],
        ..SynthesisConfig::default()
    };
    assert!(validate_config(&config).has_error(ErrorCode::InvalidLevel));
}

#[test]
fn test_non_finite_delay() {
    let config = SynthesisConfig {
        tau: f64::INFINITY,
        ..SynthesisConfig::default()
    };
    assert!(validate_config(&config).has_error(ErrorCode::InvalidTiming));
}

#[test]
fn test_negative_snr_warns() {
    let config = SynthesisConfig {
        snr: -10.0,
        ..SynthesisConfig::default()
    };
    let result = validate_config(&config);
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::NegativeSnrIgnored));
}

#[test]
fn test_sampled_sine_oversampling_warns() {
    let config = SynthesisConfig {
        sigtype: SignalType::SineSampled,
        sig_osr: 8,
        ..SynthesisConfig::default()
    };
    let result = validate_config(&config);
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::OversamplingIgnored));
}

#[test]
fn test_sampled_sine_guard_longer_than_period() {
    let config = SynthesisConfig {
        sigtype: SignalType::SineSampled,
        fs: 1e12,
        trise: 2e-12,
        ..SynthesisConfig::default()
    };
    let result = validate_config(&config);
    assert!(result.has_warning(WarningCode::RiseTimeExceedsSamplePeriod));
}

#[test]
fn test_pulse_duty_out_of_range() {
    let config = SynthesisConfig {
        duty: 1.2,
        ..pulse_config()
    };
    assert!(validate_config(&config).has_error(ErrorCode::InvalidDutyCycle));
}

#[test]
fn test_pulse_rise_exceeds_high_time() {
    let config = SynthesisConfig {
        duty: 0.25,
        trise: 3e-10,
        ..pulse_config()
    };
    let result = validate_config(&config);
    let err = result
        .errors
        .iter()
        .find(|e| e.code == ErrorCode::EdgeExceedsPulseWidth)
        .expect("edge error");
    assert_eq!(err.path.as_deref(), Some("trise"));
}

#[test]
fn test_pulse_fall_exceeds_low_time() {
    let config = SynthesisConfig {
        duty: 0.9,
        tfall: 2e-10,
        ..pulse_config()
    };
    let result = validate_config(&config);
    assert!(result.has_error(ErrorCode::EdgeExceedsPulseWidth));
}

#[test]
fn test_pulse_edges_exactly_fill_width() {
    let config = SynthesisConfig {
        duty: 0.5,
        trise: 5e-10,
        tfall: 5e-10,
        ..pulse_config()
    };
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_negative_jitter() {
    let config = SynthesisConfig {
        jitter_sd: Some(-1e-12),
        ..pulse_config()
    };
    assert!(validate_config(&config).has_error(ErrorCode::InvalidJitter));
}

#[test]
fn test_pulse_zero_frequency() {
    let config = SynthesisConfig {
        sig_freq: vec![0.0],
        ..pulse_config()
    };
    assert!(validate_config(&config).has_error(ErrorCode::InvalidFrequency));
}

#[test]
fn test_sawtooth_extra_tones_warn() {
    let config = SynthesisConfig {
        sigtype: SignalType::Sawtooth,
        sig_freq: vec![1e6, 2e6],
        slopetype: SlopeType::Falling,
        ..SynthesisConfig::default()
    };
    let result = validate_config(&config);
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::ExtraTonesIgnored));
}

#[test]
fn test_row_limit() {
    let config = SynthesisConfig {
        nsamp: MAX_OUTPUT_ROWS,
        sig_osr: 2,
        ..SynthesisConfig::default()
    };
    assert!(validate_config(&config).has_error(ErrorCode::TooManySamples));
}
