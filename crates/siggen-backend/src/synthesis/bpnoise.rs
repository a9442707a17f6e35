//! Band-limited noise synthesis.
//!
//! White Gaussian noise is scaled so that its peak excursions stay near the
//! configured amplitude, offset by the common-mode level, and passed through
//! a fixed 1000-tap equiripple FIR. The filter passes the lowest 5% of the
//! Nyquist band and stops everything above 6%.

use std::sync::OnceLock;

use siggen_spec::SynthesisConfig;
use tracing::debug;

use crate::error::SynthResult;
use crate::filter::{remez, FilterDesignError, FirFilter};
use crate::matrix::SampleMatrix;
use crate::noise::gaussian_noise;
use crate::rng::{create_component_rng, BPNOISE_STREAM};

use super::{time_vector, Synthesizer};

/// Length of the noise-shaping filter.
pub const NOISE_FILTER_TAPS: usize = 1000;

/// Band edges of the noise-shaping filter in cycles/sample.
pub const NOISE_FILTER_BANDS: [f64; 4] = [0.0, 0.025, 0.03, 0.5];

/// Desired gain per band.
pub const NOISE_FILTER_GAINS: [f64; 2] = [1.0, 0.0];

/// Ratio of amplitude to the standard deviation of the unfiltered noise.
pub const PEAK_TO_SD: f64 = 6.6;

static NOISE_FILTER: OnceLock<Result<Vec<f64>, FilterDesignError>> = OnceLock::new();

/// Taps of the noise-shaping filter, designed on first use.
pub fn noise_filter_taps() -> Result<&'static [f64], FilterDesignError> {
    NOISE_FILTER
        .get_or_init(|| {
            debug!("Designing {}-tap noise filter", NOISE_FILTER_TAPS);
            remez(
                NOISE_FILTER_TAPS,
                &NOISE_FILTER_BANDS,
                &NOISE_FILTER_GAINS,
                &[1.0, 1.0],
            )
            .map(|design| design.taps)
        })
        .as_ref()
        .map(Vec::as_slice)
        .map_err(Clone::clone)
}

/// Band-limited noise synthesizer.
#[derive(Debug, Clone)]
pub struct BandNoiseSynth {
    /// Peak amplitude before filtering.
    pub amplitude: f64,
    /// Common-mode level added before filtering.
    pub common_mode: f64,
    /// Number of base-rate samples.
    pub samples: usize,
    /// Oversampling ratio.
    pub osr: usize,
    /// Sample rate in Hz.
    pub fs: f64,
    /// Time offset added to every timestamp.
    pub after: f64,
}

impl BandNoiseSynth {
    /// Builds the synthesizer for a band-limited noise config.
    pub fn from_config(config: &SynthesisConfig) -> SynthResult<Self> {
        let tone = config.primary_tone();
        Ok(Self {
            amplitude: tone.amplitude,
            common_mode: tone.common_mode,
            samples: config.total_samples(),
            osr: config.sig_osr,
            fs: config.fs,
            after: config.after,
        })
    }
}

impl Synthesizer for BandNoiseSynth {
    fn synthesize(&self, seed: u32) -> SynthResult<SampleMatrix> {
        let times = time_vector(self.samples, self.osr, self.fs);

        let mut rng = create_component_rng(seed, BPNOISE_STREAM);
        let mut values = gaussian_noise(
            times.len(),
            self.amplitude / PEAK_TO_SD,
            self.common_mode,
            &mut rng,
        );
        let mut filter = FirFilter::new(noise_filter_taps()?.to_vec());
        filter.process_buffer(&mut values);

        let times = times.into_iter().map(|t| t + self.after).collect();
        Ok(SampleMatrix::from_columns(times, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_filter_shape() {
        let taps = noise_filter_taps().unwrap();
        assert_eq!(taps.len(), NOISE_FILTER_TAPS);
        assert!(taps.iter().all(|t| t.is_finite()));

        let filter = FirFilter::new(taps.to_vec());
        assert!((filter.frequency_response(0.0) - 1.0).abs() < 0.05);
        assert!((filter.frequency_response(0.01) - 1.0).abs() < 0.05);
        for f in [0.05, 0.1, 0.25, 0.4] {
            assert!(filter.frequency_response(f) < 0.05, "gain at {}", f);
        }
    }

    #[test]
    fn test_taps_are_cached() {
        let a = noise_filter_taps().unwrap();
        let b = noise_filter_taps().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_row_count_and_determinism() {
        let config = SynthesisConfig {
            nsamp: 256,
            sig_osr: 2,
            ..SynthesisConfig::new(siggen_spec::SignalType::BandpassNoise)
        };
        let synth = BandNoiseSynth::from_config(&config).unwrap();
        let a = synth.synthesize(9).unwrap();
        let b = synth.synthesize(9).unwrap();
        assert_eq!(a.len(), 512);
        assert_eq!(a, b);
    }
}
