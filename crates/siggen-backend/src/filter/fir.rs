//! Direct-form FIR filter.

use std::f64::consts::PI;

/// Causal FIR filter with zero initial state.
///
/// `y[n] = sum_k taps[k] * x[n - k]`, with `x[n] = 0` for `n < 0`.
#[derive(Debug, Clone)]
pub struct FirFilter {
    taps: Vec<f64>,
    history: Vec<f64>,
    pos: usize,
}

impl FirFilter {
    /// Creates a filter from its impulse response.
    pub fn new(taps: Vec<f64>) -> Self {
        let history = vec![0.0; taps.len()];
        Self {
            taps,
            history,
            pos: 0,
        }
    }

    /// Impulse response.
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Clears the delay line.
    pub fn reset(&mut self) {
        self.history.iter_mut().for_each(|x| *x = 0.0);
        self.pos = 0;
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let n = self.taps.len();
        if n == 0 {
            return 0.0;
        }

        self.history[self.pos] = input;
        let mut acc = 0.0;
        let mut idx = self.pos;
        for &h in &self.taps {
            acc += h * self.history[idx];
            idx = if idx == 0 { n - 1 } else { idx - 1 };
        }
        self.pos = (self.pos + 1) % n;
        acc
    }

    /// Processes a buffer of samples in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Processes a buffer of samples, returning a new buffer.
    pub fn process_buffer_copy(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&s| self.process(s)).collect()
    }

    /// Magnitude response at normalized frequency `f` (cycles/sample).
    pub fn frequency_response(&self, f: f64) -> f64 {
        let (re, im) = self
            .taps
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(re, im), (n, &h)| {
                let w = 2.0 * PI * f * n as f64;
                (re + h * w.cos(), im - h * w.sin())
            });
        re.hypot(im)
    }
}
