//! Sample-and-hold sine synthesis.
//!
//! Each base-rate sample of the sine is held for one sample period minus a
//! guard interval: sample `i` becomes the pair `(t, v)` and
//! `(t + 1/fs - trise, v)` with `t = i/fs + after`. Oversampling is not
//! supported and is forced to 1.

use siggen_spec::SynthesisConfig;

use crate::error::SynthResult;
use crate::matrix::SampleMatrix;

use super::sine::SineSynth;
use super::Synthesizer;

/// Sample-and-hold sine synthesizer.
#[derive(Debug, Clone)]
pub struct SampledSineSynth {
    /// Underlying continuous sine at one sample per period.
    pub sine: SineSynth,
    /// Guard interval subtracted from each hold, in seconds.
    pub trise: f64,
}

impl SampledSineSynth {
    /// Wraps a sine synthesizer, forcing its oversampling ratio to 1.
    pub fn new(sine: SineSynth, trise: f64) -> Self {
        Self {
            sine: SineSynth { osr: 1, ..sine },
            trise,
        }
    }

    /// Builds the synthesizer for a sampled-sine config.
    ///
    /// A `sig_osr` other than 1 is reported by config validation.
    pub fn from_config(config: &SynthesisConfig) -> SynthResult<Self> {
        Ok(Self::new(SineSynth::from_config(config)?, config.trise))
    }
}

impl Synthesizer for SampledSineSynth {
    fn synthesize(&self, seed: u32) -> SynthResult<SampleMatrix> {
        let after = self.sine.after;
        let fs = self.sine.fs;
        let continuous = SineSynth {
            after: 0.0,
            ..self.sine.clone()
        }
        .synthesize(seed)?;

        let anchor = usize::from(after != 0.0);
        let mut rows = Vec::with_capacity(2 * continuous.len() + anchor);
        if after != 0.0 {
            if let Some(&first) = continuous.values().first() {
                rows.push((0.0, first));
            }
        }
        for (i, &v) in continuous.values().iter().enumerate() {
            let t = i as f64 / fs + after;
            rows.push((t, v));
            rows.push((t + 1.0 / fs - self.trise, v));
        }

        Ok(SampleMatrix::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siggen_spec::SignalType;

    fn config() -> SynthesisConfig {
        SynthesisConfig {
            sigtype: SignalType::SineSampled,
            sig_freq: vec![10e6],
            fs: 1e9,
            nsamp: 32,
            trise: 5e-12,
            ..SynthesisConfig::default()
        }
    }

    #[test]
    fn test_pairs_hold_each_sample() {
        let config = config();
        let matrix = SampledSineSynth::from_config(&config)
            .unwrap()
            .synthesize(0)
            .unwrap();
        assert_eq!(matrix.len(), 64);

        let continuous = SineSynth::from_config(&config)
            .unwrap()
            .synthesize(0)
            .unwrap();
        for i in 0..32 {
            assert_eq!(matrix.values()[2 * i], continuous.values()[i]);
            assert_eq!(matrix.values()[2 * i + 1], continuous.values()[i]);
            let delta = matrix.times()[2 * i + 1] - matrix.times()[2 * i];
            assert!((delta - (1e-9 - 5e-12)).abs() < 1e-18);
        }
    }

    #[test]
    fn test_oversampling_forced_to_one() {
        let config = SynthesisConfig {
            sig_osr: 8,
            ..config()
        };
        let synth = SampledSineSynth::from_config(&config).unwrap();
        assert_eq!(synth.sine.osr, 1);
        assert_eq!(synth.synthesize(0).unwrap().len(), 64);
    }

    #[test]
    fn test_offset_prepends_anchor() {
        let config = SynthesisConfig {
            after: 2e-9,
            sig_phase: 90.0,
            ..config()
        };
        let matrix = SampledSineSynth::from_config(&config)
            .unwrap()
            .synthesize(0)
            .unwrap();
        assert_eq!(matrix.len(), 65);
        assert_eq!(matrix.row(0), Some((0.0, matrix.values()[1])));
        assert!((matrix.values()[0] - 0.5).abs() < 1e-12);
        assert!((matrix.times()[1] - 2e-9).abs() < 1e-21);
        assert!(matrix.is_time_monotonic());
    }
}
