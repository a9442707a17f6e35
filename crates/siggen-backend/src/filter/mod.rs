//! FIR filter design and filtering.
//!
//! - `remez` - Parks-McClellan equiripple design of linear-phase FIR filters
//! - `fir` - Direct-form FIR filter with a circular delay line

pub mod fir;
pub mod remez;

use thiserror::Error;

pub use fir::FirFilter;
pub use remez::{remez, remez_with_options, RemezDesign, RemezOptions};

/// Errors returned by FIR filter design.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterDesignError {
    /// Filter length too short for an equiripple design.
    #[error("filter needs at least 3 taps, got {0}")]
    InvalidTapCount(usize),

    /// Band, gain and weight lists do not line up.
    #[error(
        "band layout mismatch: {bands} band edges for {desired} gains and {weights} weights"
    )]
    BandCountMismatch {
        /// Number of band edges.
        bands: usize,
        /// Number of desired gains.
        desired: usize,
        /// Number of weights.
        weights: usize,
    },

    /// A band edge, gain or weight is out of range.
    #[error("invalid band specification: {0}")]
    InvalidBands(String),

    /// The dense grid has fewer points than the approximation needs.
    #[error("dense grid has {grid} points but {required} are required")]
    GridTooCoarse {
        /// Grid points available.
        grid: usize,
        /// Extremal frequencies required.
        required: usize,
    },
}
