//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the synthesizer flows through this module. Each random
//! component (SNR noise, pulse jitter, band-limited noise) draws from its
//! own stream, derived from the config seed by hashing, so enabling one
//! component never shifts the samples of another.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Stream key for additive SNR noise.
pub const SNR_NOISE_STREAM: &str = "snr_noise";
/// Stream key for pulse edge jitter.
pub const JITTER_STREAM: &str = "jitter";
/// Stream key for band-limited noise.
pub const BPNOISE_STREAM: &str = "bpnoise";

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for a named component from the base seed.
///
/// ```text
/// component_seed = truncate_u32(BLAKE3(base_seed_le || key))
/// ```
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);

    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.as_bytes()[0..4]);
    u32::from_le_bytes(bytes)
}

/// Creates an RNG for a named component.
pub fn create_component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(base_seed, key))
}
