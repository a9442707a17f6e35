//! Gaussian noise utilities.
//!
//! Normal deviates are drawn with the Box-Muller transform over uniform
//! PCG32 output, so every noise stream is reproducible from its seed.

use std::f64::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;

/// Draws one standard normal deviate.
pub fn gaussian(rng: &mut Pcg32) -> f64 {
    // u1 in (0, 1] keeps ln() finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Noise standard deviation that puts noise `snr_db` below `amplitude`.
///
/// The deviation is referenced to the peak amplitude, not the RMS of the
/// signal, so a measured SNR comes out about 3.01 dB lower than `snr_db`
/// for a single sine.
pub fn noise_sd_for_snr(amplitude: f64, snr_db: f64) -> f64 {
    amplitude / 10f64.powf(snr_db / 20.0)
}

/// Adds zero-mean Gaussian noise with deviation `sd` to every value.
pub fn add_gaussian_noise(values: &mut [f64], sd: f64, rng: &mut Pcg32) {
    for value in values.iter_mut() {
        *value += sd * gaussian(rng);
    }
}

/// Generates `n` Gaussian samples with the given deviation and mean.
pub fn gaussian_noise(n: usize, sd: f64, mean: f64, rng: &mut Pcg32) -> Vec<f64> {
    (0..n).map(|_| mean + sd * gaussian(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    fn mean_and_sd(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn test_gaussian_statistics() {
        let mut rng = create_rng(42);
        let samples: Vec<f64> = (0..50_000).map(|_| gaussian(&mut rng)).collect();
        let (mean, sd) = mean_and_sd(&samples);
        assert!(mean.abs() < 0.02, "mean {}", mean);
        assert!((sd - 1.0).abs() < 0.02, "sd {}", sd);
    }

    #[test]
    fn test_gaussian_is_finite() {
        let mut rng = create_rng(0);
        assert!((0..10_000).all(|_| gaussian(&mut rng).is_finite()));
    }

    #[test]
    fn test_noise_sd_for_snr() {
        assert!((noise_sd_for_snr(1.0, 20.0) - 0.1).abs() < 1e-12);
        assert!((noise_sd_for_snr(0.5, 40.0) - 0.005).abs() < 1e-12);
        assert_eq!(noise_sd_for_snr(0.5, 0.0), 0.5);
    }

    #[test]
    fn test_gaussian_noise_mean_and_sd() {
        let mut rng = create_rng(7);
        let noise = gaussian_noise(40_000, 0.25, 1.5, &mut rng);
        assert_eq!(noise.len(), 40_000);
        let (mean, sd) = mean_and_sd(&noise);
        assert!((mean - 1.5).abs() < 0.01);
        assert!((sd - 0.25).abs() < 0.01);
    }

    #[test]
    fn test_add_noise_zero_sd_is_identity() {
        let mut rng = create_rng(1);
        let mut values = vec![0.1, 0.2, 0.3];
        add_gaussian_noise(&mut values, 0.0, &mut rng);
        assert_eq!(values, vec![0.1, 0.2, 0.3]);
    }
}
