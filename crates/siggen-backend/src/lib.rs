//! SigGen Synthesis Backend
//!
//! This crate turns a [`SynthesisConfig`](siggen_spec::SynthesisConfig) into a
//! two-column sample matrix of (timestamp, value) rows. Supported signal
//! types:
//!
//! - **Sine** - Multi-tone sine with coherent frequency resolution, phase or
//!   delay, oversampling and additive noise at a target SNR
//! - **Sampled sine** - Sample-and-hold rendering of the sine
//! - **Pulse** - Trapezoidal clock with duty cycle, edge times and jitter
//! - **Sawtooth** - Rising or falling ramp (experimental)
//! - **Band-limited noise** - Gaussian noise through a 1000-tap equiripple FIR
//!
//! # Determinism
//!
//! Every random stream is a PCG32 generator seeded from the config seed
//! through BLAKE3 derivation, one stream per component. The same config and
//! seed give a bit-identical matrix.
//!
//! # Example
//!
//! ```
//! use siggen_backend::generate;
//! use siggen_spec::SynthesisConfig;
//!
//! let config = SynthesisConfig {
//!     nsamp: 4,
//!     ..SynthesisConfig::default()
//! };
//! let result = generate(&config).unwrap();
//! assert_eq!(result.matrix.len(), 4);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Main entry point
//! - [`coherent`] - Prime-cycle coherent frequency resolution
//! - [`synthesis`] - Per-signal-type synthesizers
//! - [`filter`] - Parks-McClellan design and FIR filtering
//! - [`noise`] - Gaussian noise utilities
//! - [`analysis`] - FFT-based tone and SNR estimation
//! - [`rng`] - Deterministic RNG with seed derivation

pub mod analysis;
pub mod coherent;
pub mod error;
pub mod filter;
pub mod generate;
pub mod matrix;
pub mod noise;
pub mod rng;
pub mod synthesis;

// Re-export main types at crate root
pub use coherent::coherent_frequency;
pub use error::{SynthError, SynthResult};
pub use generate::{generate, generate_from_json, GenerateResult};
pub use matrix::{ResolvedTone, SampleMatrix};
