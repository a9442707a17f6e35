//! Waveform synthesizers.
//!
//! Each module implements one signal type:
//! - `sine` - Multi-tone sine with coherent resolution, delay and SNR noise
//! - `sampled` - Sine rendered as a sample-and-hold step sequence
//! - `pulse` - Trapezoidal pulse train with optional edge jitter
//! - `sawtooth` - Rising or falling ramp
//! - `bpnoise` - Gaussian noise through a fixed equiripple FIR

pub mod bpnoise;
pub mod pulse;
pub mod sampled;
pub mod sawtooth;
pub mod sine;

use crate::error::SynthResult;
use crate::matrix::SampleMatrix;

/// Common trait for all synthesizers.
pub trait Synthesizer {
    /// Generates the sample matrix.
    ///
    /// # Arguments
    /// * `seed` - Base seed for every random stream the synthesizer uses
    fn synthesize(&self, seed: u32) -> SynthResult<SampleMatrix>;
}

/// Uniform time vector of `samples * osr` points spanning `samples / fs`.
///
/// The span is left-closed and right-open: `t_i = i * (samples / fs) /
/// (samples * osr)`.
pub fn time_vector(samples: usize, osr: usize, fs: f64) -> Vec<f64> {
    let count = samples * osr;
    let span = samples as f64 / fs;
    (0..count)
        .map(|i| i as f64 * span / count as f64)
        .collect()
}
