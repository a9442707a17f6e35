//! Spectral checks for generated signals.
//!
//! These helpers assume coherent capture (an integer number of cycles per
//! record), so no window is applied and each tone lands in a single bin.

use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;

/// One-sided magnitude spectrum `|X_k|` for `k` in `0..=N/2`.
pub fn magnitude_spectrum(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f64>> = values.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buffer);

    buffer.iter().take(n / 2 + 1).map(|c| c.norm()).collect()
}

/// FFT bin closest to `frequency` in a record of `n` samples at `sample_rate`.
pub fn frequency_bin(frequency: f64, n: usize, sample_rate: f64) -> usize {
    (frequency * n as f64 / sample_rate).round().max(0.0) as usize
}

/// Peak amplitude of the tone in `bin`: `2 |X_k| / N` (`|X_0| / N` at DC).
pub fn tone_amplitude(values: &[f64], bin: usize) -> f64 {
    let n = values.len();
    let spectrum = magnitude_spectrum(values);
    match spectrum.get(bin) {
        Some(&m) if bin == 0 || (n % 2 == 0 && bin == n / 2) => m / n as f64,
        Some(&m) => 2.0 * m / n as f64,
        None => 0.0,
    }
}

/// Signal-to-noise ratio in dB of the tone in `signal_bin`.
///
/// Signal power is the power within `guard_bins` of `signal_bin`; noise is
/// every other bin except DC.
pub fn estimate_snr_db(values: &[f64], signal_bin: usize, guard_bins: usize) -> f64 {
    snr_db(&magnitude_spectrum(values), &[signal_bin], guard_bins)
}

fn snr_db(spectrum: &[f64], signal_bins: &[usize], guard_bins: usize) -> f64 {
    let is_signal = |k: usize| {
        signal_bins
            .iter()
            .any(|&b| k + guard_bins >= b && k <= b + guard_bins)
    };

    let (mut signal, mut noise) = (0.0, 0.0);
    for (k, m) in spectrum.iter().enumerate().skip(1) {
        if is_signal(k) {
            signal += m * m;
        } else {
            noise += m * m;
        }
    }

    if noise == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (signal / noise).log10()
}

/// Estimated level of one tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneEstimate {
    pub frequency: f64,
    pub bin: usize,
    pub amplitude: f64,
}

/// Tone levels and overall SNR of a multi-tone record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumReport {
    pub tones: Vec<ToneEstimate>,
    /// Power in all tone bins over power in all other non-DC bins, in dB.
    pub snr_db: f64,
}

/// Estimates the level of each tone in `frequencies` and the combined SNR.
pub fn analyze_tones(
    values: &[f64],
    sample_rate: f64,
    frequencies: &[f64],
    guard_bins: usize,
) -> SpectrumReport {
    let n = values.len();
    let spectrum = magnitude_spectrum(values);
    let bins: Vec<usize> = frequencies
        .iter()
        .map(|&f| frequency_bin(f, n, sample_rate))
        .collect();

    let tones = frequencies
        .iter()
        .zip(&bins)
        .map(|(&frequency, &bin)| {
            let m = spectrum.get(bin).copied().unwrap_or(0.0);
            let scale = if bin == 0 || 2 * bin == n { 1.0 } else { 2.0 };
            ToneEstimate {
                frequency,
                bin,
                amplitude: scale * m / n.max(1) as f64,
            }
        })
        .collect();

    SpectrumReport {
        tones,
        snr_db: snr_db(&spectrum, &bins, guard_bins),
    }
}
