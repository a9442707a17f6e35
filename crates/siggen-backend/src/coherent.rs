//! Coherent frequency resolution.
//!
//! A tone is coherent with a capture window when an integer number of its
//! cycles fit exactly in `nsamp` samples. Choosing a prime cycle count also
//! keeps the sample phases from repeating inside the window, which is what
//! makes FFT-based test analysis leakage free.

use tracing::info;

use crate::error::{SynthError, SynthResult};

/// Initial ceiling of the prime search.
pub const INITIAL_SEARCH_CEILING: u64 = 32;

/// Maximum number of times the search ceiling is doubled.
pub const MAX_CEILING_DOUBLINGS: u32 = 58;

/// Returns true when `n` is prime.
///
/// # Example
/// ```
/// use siggen_backend::coherent::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(97));
/// assert!(!is_prime(1));
/// assert!(!is_prime(91));
/// ```
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d = 3u64;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest prime `>= window` and below a doubling search ceiling.
///
/// The search starts with a ceiling of [`INITIAL_SEARCH_CEILING`] and
/// doubles it until a prime is found, at most [`MAX_CEILING_DOUBLINGS`]
/// times.
pub fn coherent_cycles(window: u64) -> SynthResult<u64> {
    let start = window.max(2);
    let mut ceiling = INITIAL_SEARCH_CEILING;
    let mut doublings = 0u32;

    loop {
        if let Some(prime) = (start..ceiling).find(|&n| is_prime(n)) {
            return Ok(prime);
        }
        // Primes below the old ceiling were already rejected.
        let next = ceiling
            .checked_mul(2)
            .filter(|_| doublings < MAX_CEILING_DOUBLINGS);
        match next {
            Some(next) => {
                ceiling = next;
                doublings += 1;
            }
            None => return Err(SynthError::CoherentSearchExhausted { window, ceiling }),
        }
    }
}

/// Resolves `fin` to the nearest coherent frequency at or above it.
///
/// The number of cycles in the window is `floor(nsamp * fin / fs)`, raised
/// to the next prime. The result is `prime / nsamp * fs`.
///
/// # Example
/// ```
/// use siggen_backend::coherent::coherent_frequency;
///
/// // 1024 * 1e6 / 2e9 = 0.512 cycles, so the window resolves to 2 cycles.
/// let f = coherent_frequency(2e9, 1e6, 1024).unwrap();
/// assert!((f - 2.0 / 1024.0 * 2e9).abs() < 1e-6);
/// ```
pub fn coherent_frequency(fs: f64, fin: f64, nsamp: usize) -> SynthResult<f64> {
    if !(fs.is_finite() && fs > 0.0) {
        return Err(SynthError::invalid_param(
            "fs",
            format!("sample rate must be positive and finite, got {}", fs),
        ));
    }
    if nsamp == 0 {
        return Err(SynthError::invalid_param(
            "nsamp",
            "coherent resolution needs at least one sample",
        ));
    }
    if !(fin.is_finite() && fin >= 0.0) {
        return Err(SynthError::invalid_param(
            "sig_freq",
            format!("frequency must be non-negative and finite, got {}", fin),
        ));
    }

    let cycles = (nsamp as f64 * fin / fs).floor();
    if cycles >= u64::MAX as f64 {
        return Err(SynthError::CoherentSearchExhausted {
            window: u64::MAX,
            ceiling: INITIAL_SEARCH_CEILING,
        });
    }
    let prime = coherent_cycles(cycles as u64)?;
    let resolved = prime as f64 / nsamp as f64 * fs;

    info!("Coherence set as: {} Hz -> {} Hz", fin, resolved);
    Ok(resolved)
}
