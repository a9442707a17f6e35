//! Sample matrix output type.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// A synthesized signal as ordered (timestamp, value) rows.
///
/// Timestamps are in seconds and non-decreasing. Pulse output repeats a
/// timestamp when an edge is instantaneous. The matrix is immutable once
/// built; callers read it through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleMatrix {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl SampleMatrix {
    /// Builds a matrix from equally long time and value columns.
    pub(crate) fn from_columns(times: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        Self { times, values }
    }

    /// Builds a matrix from rows.
    pub(crate) fn from_rows(rows: Vec<(f64, f64)>) -> Self {
        let (times, values) = rows.into_iter().unzip();
        Self { times, values }
    }

    /// Timestamp column.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Value column.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true when the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.times.get(index)?, *self.values.get(index)?))
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns true if timestamps never decrease.
    pub fn is_time_monotonic(&self) -> bool {
        self.times.windows(2).all(|w| w[0] <= w[1])
    }

    /// BLAKE3 hash of every row, fed as time then value in little-endian
    /// f64 bytes.
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (t, v) in self.rows() {
            hasher.update(&t.to_le_bytes());
            hasher.update(&v.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Renders the matrix as two-column CSV with a `time,value` header.
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(self.len() * 48 + 16);
        out.push_str("time,value\n");
        for (t, v) in self.rows() {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{:e},{:e}", t, v);
        }
        out
    }
}

/// A tone after coherent resolution and phase-from-delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTone {
    /// Frequency from the config, in Hz.
    pub requested_frequency: f64,
    /// Frequency used for synthesis, in Hz.
    pub frequency: f64,
    /// Peak amplitude.
    pub amplitude: f64,
    /// DC offset.
    pub common_mode: f64,
    /// Phase in degrees used for synthesis.
    pub phase_deg: f64,
}
