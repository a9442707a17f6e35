//! Trapezoidal pulse train synthesis.
//!
//! Each period `k` contributes four vertices starting at
//! `base = k / freq + after`:
//!
//! ```text
//!   high          +-----------+
//!                /             \
//!   low  -------+               +-------
//!        base  +trise    +duty/f  +tfall
//! ```
//!
//! Edge jitter draws two Gaussian offsets per period. The first moves the
//! rising edge and the second the falling edge; both vertices of an edge
//! move together, so rise and fall times are preserved. Offsets do not
//! compound within a period: the rise-end and fall vertices are not shifted
//! again by earlier draws.

use rand_pcg::Pcg32;
use siggen_spec::SynthesisConfig;
use tracing::{info, warn};

use crate::error::{SynthError, SynthResult};
use crate::matrix::SampleMatrix;
use crate::noise::gaussian;
use crate::rng::{create_component_rng, JITTER_STREAM};

use super::Synthesizer;

/// Trapezoidal pulse synthesizer.
#[derive(Debug, Clone)]
pub struct PulseSynth {
    /// Repetition rate in Hz.
    pub frequency: f64,
    /// Number of periods.
    pub periods: usize,
    /// Fraction of the period spent from rise start to fall start.
    pub duty: f64,
    /// Rise time in seconds.
    pub trise: f64,
    /// Fall time in seconds.
    pub tfall: f64,
    /// High level.
    pub high: f64,
    /// Low level.
    pub low: f64,
    /// Time offset added to every timestamp.
    pub after: f64,
    /// Edge jitter standard deviation in seconds.
    pub jitter_sd: Option<f64>,
}

impl PulseSynth {
    /// Creates a 50% duty pulse train with instantaneous edges.
    pub fn new(frequency: f64, periods: usize) -> Self {
        Self {
            frequency,
            periods,
            duty: 0.5,
            trise: 0.0,
            tfall: 0.0,
            high: 1.0,
            low: 0.0,
            after: 0.0,
            jitter_sd: None,
        }
    }

    /// Builds the synthesizer for a pulse config.
    pub fn from_config(config: &SynthesisConfig) -> SynthResult<Self> {
        let synth = Self::new(config.primary_tone().frequency, config.total_samples())
            .with_duty(config.duty)
            .with_edges(config.trise, config.tfall)
            .with_levels(config.low, config.high)
            .with_offset(config.after);
        let synth = match config.jitter() {
            Some(sd) => synth.with_jitter(sd),
            None => synth,
        };
        synth.check_edges()?;
        Ok(synth)
    }

    /// Sets the duty cycle.
    pub fn with_duty(mut self, duty: f64) -> Self {
        self.duty = duty;
        self
    }

    /// Sets rise and fall times.
    pub fn with_edges(mut self, trise: f64, tfall: f64) -> Self {
        self.trise = trise;
        self.tfall = tfall;
        self
    }

    /// Sets low and high levels.
    pub fn with_levels(mut self, low: f64, high: f64) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    /// Sets the time offset.
    pub fn with_offset(mut self, after: f64) -> Self {
        self.after = after;
        self
    }

    /// Enables edge jitter with the given standard deviation.
    pub fn with_jitter(mut self, sd: f64) -> Self {
        self.jitter_sd = Some(sd);
        self
    }

    /// Rejects edge times that do not fit inside the pulse.
    fn check_edges(&self) -> SynthResult<()> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(SynthError::invalid_param(
                "sig_freq",
                format!("pulse frequency must be positive, got {}", self.frequency),
            ));
        }
        if !(0.0..=1.0).contains(&self.duty) {
            return Err(SynthError::invalid_param(
                "duty",
                format!("duty cycle {} outside [0, 1]", self.duty),
            ));
        }
        if self.trise < 0.0 || self.tfall < 0.0 {
            return Err(SynthError::invalid_param(
                "trise",
                "rise and fall times must be non-negative",
            ));
        }
        Ok(())
    }

    fn edge_jitter(&self, rng: &mut Pcg32) -> (f64, f64) {
        match self.jitter_sd {
            Some(sd) if sd > 0.0 => {
                let rise = sd * gaussian(rng);
                let fall = sd * gaussian(rng);
                (rise, fall)
            }
            _ => (0.0, 0.0),
        }
    }
}

impl Synthesizer for PulseSynth {
    fn synthesize(&self, seed: u32) -> SynthResult<SampleMatrix> {
        self.check_edges()?;

        if let Some(sd) = self.jitter_sd.filter(|&sd| sd > 0.0) {
            info!("Applying jitter with SD of {:.3e} s to the output signal", sd);
        }
        let mut rng = create_component_rng(seed, JITTER_STREAM);

        let period = 1.0 / self.frequency;
        let high_time = self.duty / self.frequency;
        let anchor = usize::from(self.after != 0.0);
        let mut rows = Vec::with_capacity(4 * self.periods + anchor);
        if self.after != 0.0 {
            rows.push((0.0, self.low));
        }

        for k in 0..self.periods {
            let base = k as f64 * period + self.after;
            let (rise_jitter, fall_jitter) = self.edge_jitter(&mut rng);
            if k == 0 && rise_jitter < 0.0 && rise_jitter.abs() > self.after {
                warn!("First jitter sample makes first timestamp of the signal negative");
            }

            let rise_start = base + rise_jitter;
            let fall_start = base + high_time + fall_jitter;
            rows.push((rise_start, self.low));
            rows.push((rise_start + self.trise, self.high));
            rows.push((fall_start, self.high));
            rows.push((fall_start + self.tfall, self.low));
        }

        Ok(SampleMatrix::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_period_vertices() {
        let matrix = PulseSynth::new(1e9, 1)
            .with_edges(5e-12, 5e-12)
            .synthesize(0)
            .unwrap();
        assert_eq!(matrix.values(), &[0.0, 1.0, 1.0, 0.0]);
        let expected = [0.0, 5e-12, 0.5e-9, 0.505e-9];
        for (t, e) in matrix.times().iter().zip(expected) {
            assert!((t - e).abs() < 1e-21, "{} != {}", t, e);
        }
    }

    #[test]
    fn test_periods_are_spaced_without_jitter() {
        let matrix = PulseSynth::new(250e6, 6)
            .with_duty(0.3)
            .with_edges(1e-10, 2e-10)
            .synthesize(0)
            .unwrap();
        assert_eq!(matrix.len(), 24);
        for k in 1..6 {
            for v in 0..4 {
                let dt = matrix.times()[4 * k + v] - matrix.times()[4 * (k - 1) + v];
                assert!((dt - 4e-9).abs() < 1e-18);
            }
        }
        assert!(matrix.is_time_monotonic());
    }

    #[test]
    fn test_levels_and_offset() {
        let matrix = PulseSynth::new(1e9, 2)
            .with_levels(-0.5, 0.8)
            .with_offset(1e-9)
            .synthesize(0)
            .unwrap();
        assert_eq!(matrix.len(), 9);
        assert_eq!(matrix.row(0), Some((0.0, -0.5)));
        assert_eq!(&matrix.values()[1..5], &[-0.5, 0.8, 0.8, -0.5]);
        assert_eq!(matrix.times()[1], 1e-9);
    }

    #[test]
    fn test_jitter_preserves_edge_durations() {
        let matrix = PulseSynth::new(1e9, 64)
            .with_edges(5e-12, 7e-12)
            .with_jitter(1e-12)
            .synthesize(11)
            .unwrap();
        for k in 0..64 {
            let t = &matrix.times()[4 * k..4 * k + 4];
            assert!((t[1] - t[0] - 5e-12).abs() < 1e-20);
            assert!((t[3] - t[2] - 7e-12).abs() < 1e-20);
        }
        let nominal: Vec<f64> = (0..64).map(|k| k as f64 * 1e-9).collect();
        let moved = nominal
            .iter()
            .zip(matrix.times().iter().step_by(4))
            .filter(|(n, t)| (*n - *t).abs() > 0.0)
            .count();
        assert!(moved > 60);
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let clean = PulseSynth::new(1e9, 8).synthesize(5).unwrap();
        let zero = PulseSynth::new(1e9, 8).with_jitter(0.0).synthesize(5).unwrap();
        assert_eq!(clean, zero);
    }

    #[test]
    fn test_negative_first_timestamp_is_kept() {
        // With no offset, any negative first rising draw pushes t[0] below 0.
        let negative = (0..64u32).find_map(|seed| {
            let matrix = PulseSynth::new(1e9, 2)
                .with_edges(5e-12, 5e-12)
                .with_jitter(1e-12)
                .synthesize(seed)
                .unwrap();
            (matrix.times()[0] < 0.0).then_some(matrix)
        });
        let matrix = negative.expect("no seed in 0..64 gave a negative first draw");
        assert_eq!(matrix.len(), 8);
        assert!(matrix.times()[0] < 0.0);
        assert!((matrix.times()[1] - matrix.times()[0] - 5e-12).abs() < 1e-20);
        assert_eq!(matrix.values()[0], 0.0);
    }

    #[test]
    fn test_rejects_bad_duty() {
        let err = PulseSynth::new(1e9, 1).with_duty(1.5).synthesize(0).unwrap_err();
        assert!(matches!(err, SynthError::InvalidParameter { .. }));
    }
}
