//! Sine and sampled-sine integration tests.

use std::f64::consts::PI;

use pretty_assertions::assert_eq;
use siggen_backend::analysis::{analyze_tones, estimate_snr_db, frequency_bin, tone_amplitude};
use siggen_backend::coherent::is_prime;
use siggen_backend::generate;
use siggen_spec::{SignalType, SynthesisConfig};

// ============================================================================
// Continuous Sine
// ============================================================================

#[test]
fn test_sine_end_to_end() {
    let config = SynthesisConfig {
        sigtype: SignalType::Sine,
        sig_freq: vec![1e6],
        sig_amp: vec![0.5],
        sig_cm: vec![0.0],
        sig_phase: 0.0,
        fs: 2e9,
        nsamp: 4,
        extra_sampl: 0,
        sig_osr: 1,
        ..SynthesisConfig::default()
    };
    let result = generate(&config).unwrap();
    assert_eq!(result.matrix.len(), 4);

    let expected_times = [0.0, 0.5e-9, 1e-9, 1.5e-9];
    for ((t, v), e) in result.matrix.rows().zip(expected_times) {
        assert!((t - e).abs() < 1e-21);
        assert!((v - 0.5 * (2.0 * PI * 1e6 * e).sin()).abs() < 1e-15);
    }
}

#[test]
fn test_first_value_is_phase_sum() {
    let config = SynthesisConfig {
        sig_freq: vec![1e6, 5e6, 7e6],
        sig_amp: vec![0.5, 0.2, 0.1],
        sig_cm: vec![0.1, 0.0, -0.05],
        sig_phase: 60.0,
        nsamp: 64,
        ..SynthesisConfig::default()
    };
    let result = generate(&config).unwrap();
    let phase = 60.0 * PI / 180.0;
    let expected = (0.5 + 0.2 + 0.1) * phase.sin() + 0.1 - 0.05;
    assert!((result.matrix.values()[0] - expected).abs() < 1e-12);
}

#[test]
fn test_extra_samples_and_oversampling() {
    let config = SynthesisConfig {
        nsamp: 100,
        extra_sampl: 28,
        sig_osr: 8,
        fs: 1e9,
        ..SynthesisConfig::default()
    };
    let result = generate(&config).unwrap();
    assert_eq!(result.matrix.len(), 1024);
    let step = result.matrix.times()[1] - result.matrix.times()[0];
    assert!((step - 1.0 / 8e9).abs() < 1e-21);
    assert!(*result.matrix.times().last().unwrap() < 128e-9);
}

#[test]
fn test_delay_equals_shifted_signal() {
    let tau = 3e-9;
    let delayed = generate(&SynthesisConfig {
        sig_freq: vec![20e6],
        fs: 1e9,
        nsamp: 64,
        tau,
        ..SynthesisConfig::default()
    })
    .unwrap();
    assert!((delayed.tones[0].phase_deg - (-360.0 * 20e6 * tau)).abs() < 1e-9);

    // x(t - tau) sampled at t = 3 ns equals x(0) = 0.
    assert!(delayed.matrix.values()[3].abs() < 1e-12);
}

// ============================================================================
// Coherent Resolution
// ============================================================================

#[test]
fn test_coherent_cycle_count_is_prime() {
    for fin in [1e6, 9.7e6, 33.3e6, 101e6, 250e6] {
        let config = SynthesisConfig {
            sig_freq: vec![fin],
            fs: 1e9,
            nsamp: 4096,
            coherent: true,
            ..SynthesisConfig::default()
        };
        let result = generate(&config).unwrap();
        let f = result.tones[0].frequency;
        let cycles = (4096.0 * f / 1e9).round() as u64;
        assert!(is_prime(cycles), "{} cycles for {} Hz", cycles, fin);
        assert!(cycles >= (4096.0 * fin / 1e9).floor() as u64);
    }
}

#[test]
fn test_coherent_round_trip_recovers_amplitude() {
    let config = SynthesisConfig {
        sig_freq: vec![10.3e6],
        sig_amp: vec![0.7],
        fs: 1e9,
        nsamp: 4096,
        coherent: true,
        ..SynthesisConfig::default()
    };
    let result = generate(&config).unwrap();
    let bin = frequency_bin(result.tones[0].frequency, 4096, 1e9);
    assert_eq!(bin, 43);
    let amplitude = tone_amplitude(result.matrix.values(), bin);
    assert!((amplitude - 0.7).abs() < 1e-9, "amplitude {}", amplitude);
}

#[test]
fn test_coherent_multi_tone_analysis() {
    let config = SynthesisConfig {
        sig_freq: vec![10e6, 40e6],
        sig_amp: vec![0.4, 0.1],
        sig_cm: vec![0.0, 0.0],
        fs: 1e9,
        nsamp: 2048,
        coherent: true,
        ..SynthesisConfig::default()
    };
    let result = generate(&config).unwrap();
    let frequencies: Vec<f64> = result.tones.iter().map(|t| t.frequency).collect();
    let report = analyze_tones(result.matrix.values(), 1e9, &frequencies, 0);
    assert!((report.tones[0].amplitude - 0.4).abs() < 1e-9);
    assert!((report.tones[1].amplitude - 0.1).abs() < 1e-9);
}

// ============================================================================
// Noise Injection
// ============================================================================

#[test]
fn test_snr_injection_matches_target() {
    for snr in [20.0, 40.0, 60.0] {
        let config = SynthesisConfig {
            sig_freq: vec![10e6],
            sig_amp: vec![0.5],
            fs: 1e9,
            nsamp: 4096,
            coherent: true,
            snr,
            seed: 1234,
            ..SynthesisConfig::default()
        };
        let result = generate(&config).unwrap();
        let bin = frequency_bin(result.tones[0].frequency, 4096, 1e9);
        let measured = estimate_snr_db(result.matrix.values(), bin, 0);
        // Noise is referenced to peak amplitude, so measured SNR is ~3.01 dB lower.
        let expected = snr - 10.0 * 2f64.log10();
        assert!(
            (measured - expected).abs() < 1.5,
            "target {} dB, measured {} dB",
            snr,
            measured
        );
    }
}

#[test]
fn test_zero_snr_adds_no_noise() {
    let config = SynthesisConfig {
        sig_freq: vec![10e6],
        fs: 1e9,
        nsamp: 1024,
        coherent: true,
        ..SynthesisConfig::default()
    };
    let a = generate(&SynthesisConfig { seed: 1, ..config.clone() }).unwrap();
    let b = generate(&SynthesisConfig { seed: 2, ..config }).unwrap();
    assert_eq!(a.matrix, b.matrix);
}

// ============================================================================
// Sampled Sine
// ============================================================================

#[test]
fn test_sampled_sine_holds_continuous_samples() {
    let base = SynthesisConfig {
        sig_freq: vec![13e6],
        fs: 1e9,
        nsamp: 50,
        extra_sampl: 6,
        trise: 20e-12,
        ..SynthesisConfig::default()
    };
    let continuous = generate(&base).unwrap();
    let sampled = generate(&SynthesisConfig {
        sigtype: SignalType::SineSampled,
        ..base
    })
    .unwrap();

    assert_eq!(sampled.matrix.len(), 112);
    for i in 0..56 {
        assert_eq!(sampled.matrix.values()[2 * i], continuous.matrix.values()[i]);
        let dt = sampled.matrix.times()[2 * i + 1] - sampled.matrix.times()[2 * i];
        assert!((dt - (1e-9 - 20e-12)).abs() < 1e-18);
    }
    assert!(sampled.matrix.is_time_monotonic());
}

#[test]
fn test_sampled_sine_ignores_oversampling() {
    let config = SynthesisConfig {
        sigtype: SignalType::SineSampled,
        sig_osr: 4,
        nsamp: 32,
        after: 1e-9,
        ..SynthesisConfig::default()
    };
    let result = generate(&config).unwrap();
    assert_eq!(result.matrix.len(), 65);
    assert_eq!(result.matrix.row(0), Some((0.0, result.matrix.values()[1])));
    assert_eq!(result.warnings.len(), 1);
}
