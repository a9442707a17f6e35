//! Sawtooth synthesis.

use siggen_spec::{SlopeType, SynthesisConfig};
use tracing::warn;

use crate::error::SynthResult;
use crate::matrix::SampleMatrix;

use super::{time_vector, Synthesizer};

/// Rising or falling ramp synthesizer.
///
/// The ramp position within each period is `(t mod 1/f) * f` in `[0, 1)`;
/// rising ramps output `ramp - 0.5` and falling ramps `0.5 - ramp`, then
/// scaled by the amplitude and shifted by the common-mode level.
#[derive(Debug, Clone)]
pub struct SawtoothSynth {
    /// Ramp repetition rate in Hz.
    pub frequency: f64,
    /// Peak-to-peak span of the ramp.
    pub amplitude: f64,
    /// Level of the ramp midpoint.
    pub common_mode: f64,
    /// Ramp direction.
    pub slope: SlopeType,
    /// Number of base-rate samples.
    pub samples: usize,
    /// Oversampling ratio.
    pub osr: usize,
    /// Sample rate in Hz.
    pub fs: f64,
    /// Time offset added to every timestamp.
    pub after: f64,
}

impl SawtoothSynth {
    /// Creates a unit-amplitude rising sawtooth.
    pub fn new(frequency: f64, samples: usize, osr: usize, fs: f64) -> Self {
        Self {
            frequency,
            amplitude: 1.0,
            common_mode: 0.0,
            slope: SlopeType::Rising,
            samples,
            osr,
            fs,
            after: 0.0,
        }
    }

    /// Builds the synthesizer for a sawtooth config from its first tone.
    ///
    /// The ramp covers `nsamp + extra_sampl` samples, the same window as the
    /// sine path.
    pub fn from_config(config: &SynthesisConfig) -> SynthResult<Self> {
        let tone = config.primary_tone();
        Ok(Self {
            amplitude: tone.amplitude,
            common_mode: tone.common_mode,
            slope: config.slopetype,
            after: config.after,
            ..Self::new(
                tone.frequency,
                config.total_samples(),
                config.sig_osr,
                config.fs,
            )
        })
    }

    /// Sets the ramp direction.
    pub fn with_slope(mut self, slope: SlopeType) -> Self {
        self.slope = slope;
        self
    }

    /// Sets the peak-to-peak span and midpoint level.
    pub fn with_level(mut self, amplitude: f64, common_mode: f64) -> Self {
        self.amplitude = amplitude;
        self.common_mode = common_mode;
        self
    }

    fn ramp(&self, t: f64) -> f64 {
        let period = 1.0 / self.frequency;
        let position = t.rem_euclid(period) * self.frequency;
        let centered = match self.slope {
            SlopeType::Rising => position - 0.5,
            SlopeType::Falling => 0.5 - position,
        };
        centered * self.amplitude + self.common_mode
    }
}

impl Synthesizer for SawtoothSynth {
    fn synthesize(&self, _seed: u32) -> SynthResult<SampleMatrix> {
        warn!("Sawtooth is currently experimental! Use with caution.");

        let times = time_vector(self.samples, self.osr, self.fs);
        let values = times.iter().map(|&t| self.ramp(t)).collect();
        let times = times.into_iter().map(|t| t + self.after).collect();
        Ok(SampleMatrix::from_columns(times, values))
    }
}
