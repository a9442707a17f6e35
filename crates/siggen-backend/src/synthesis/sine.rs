//! Multi-tone sine synthesis.
//!
//! Every tone is `amp * sin(2 pi f t + phase) + cm`; the output is the sum
//! over tones on an oversampled uniform time base, with optional additive
//! Gaussian noise at a target SNR.

use std::f64::consts::PI;

use siggen_spec::SynthesisConfig;

use crate::coherent::coherent_frequency;
use crate::error::SynthResult;
use crate::matrix::{ResolvedTone, SampleMatrix};
use crate::noise::{add_gaussian_noise, noise_sd_for_snr};
use crate::rng::{create_component_rng, SNR_NOISE_STREAM};

use super::{time_vector, Synthesizer};

/// Phase in degrees equivalent to delaying a tone of `frequency` by `tau`.
pub fn phase_from_delay(frequency: f64, tau: f64) -> f64 {
    -360.0 * frequency * tau
}

/// Resolves the configured tones.
///
/// With `coherent` set, each frequency is snapped to a prime number of
/// cycles in `nsamp` samples first. The phase is then taken from the delay
/// `tau` (using the resolved frequency) when it is nonzero, otherwise from
/// `sig_phase`. The config itself is left untouched.
pub fn resolve_tones(config: &SynthesisConfig) -> SynthResult<Vec<ResolvedTone>> {
    config
        .tones()
        .into_iter()
        .map(|tone| {
            let frequency = if config.coherent {
                coherent_frequency(config.fs, tone.frequency, config.nsamp)?
            } else {
                tone.frequency
            };
            let phase_deg = if config.tau != 0.0 {
                phase_from_delay(frequency, config.tau)
            } else {
                config.sig_phase
            };
            Ok(ResolvedTone {
                requested_frequency: tone.frequency,
                frequency,
                amplitude: tone.amplitude,
                common_mode: tone.common_mode,
                phase_deg,
            })
        })
        .collect()
}

/// Multi-tone sine synthesizer.
#[derive(Debug, Clone)]
pub struct SineSynth {
    /// Resolved tones, summed in order.
    pub tones: Vec<ResolvedTone>,
    /// Number of base-rate samples.
    pub samples: usize,
    /// Oversampling ratio.
    pub osr: usize,
    /// Sample rate in Hz.
    pub fs: f64,
    /// Target SNR in dB; zero or less disables noise.
    pub snr: f64,
    /// Time offset added to every timestamp.
    pub after: f64,
}

impl SineSynth {
    /// Creates a noiseless synthesizer with no time offset.
    pub fn new(tones: Vec<ResolvedTone>, samples: usize, osr: usize, fs: f64) -> Self {
        Self {
            tones,
            samples,
            osr,
            fs,
            snr: 0.0,
            after: 0.0,
        }
    }

    /// Builds the synthesizer for a sine config, resolving its tones.
    pub fn from_config(config: &SynthesisConfig) -> SynthResult<Self> {
        Ok(Self::new(
            resolve_tones(config)?,
            config.total_samples(),
            config.sig_osr,
            config.fs,
        )
        .with_snr(config.snr)
        .with_offset(config.after))
    }

    /// Sets the target SNR in dB.
    pub fn with_snr(mut self, snr: f64) -> Self {
        self.snr = snr;
        self
    }

    /// Sets the time offset in seconds.
    pub fn with_offset(mut self, after: f64) -> Self {
        self.after = after;
        self
    }

    /// Noiseless sum of all tones at the given times.
    pub fn tone_sum(&self, times: &[f64]) -> Vec<f64> {
        let mut values = vec![0.0; times.len()];
        for tone in &self.tones {
            let w = 2.0 * PI * tone.frequency;
            let phase = tone.phase_deg * PI / 180.0;
            for (v, &t) in values.iter_mut().zip(times) {
                *v += tone.amplitude * (w * t + phase).sin() + tone.common_mode;
            }
        }
        values
    }
}

impl Synthesizer for SineSynth {
    fn synthesize(&self, seed: u32) -> SynthResult<SampleMatrix> {
        let mut times = time_vector(self.samples, self.osr, self.fs);
        let mut values = self.tone_sum(&times);

        if self.snr > 0.0 {
            let amplitude = self.tones.first().map_or(0.0, |t| t.amplitude);
            let sd = noise_sd_for_snr(amplitude, self.snr);
            let mut rng = create_component_rng(seed, SNR_NOISE_STREAM);
            add_gaussian_noise(&mut values, sd, &mut rng);
        }

        for t in times.iter_mut() {
            *t += self.after;
        }
        Ok(SampleMatrix::from_columns(times, values))
    }
}
