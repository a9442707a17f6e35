//! Parks-McClellan equiripple FIR design.
//!
//! Designs symmetric (type I for odd lengths, type II for even lengths)
//! linear-phase filters with the Remez exchange algorithm:
//!
//! 1. Sample each band on a dense frequency grid.
//! 2. Fit the alternation polynomial through the current extremal set with
//!    barycentric Lagrange interpolation in `x = cos(2 pi f)`.
//! 3. Evaluate the weighted error on the grid and move the extremal set to
//!    its local maxima, keeping the error signs alternating.
//! 4. Stop when all extremal errors have the same magnitude.
//!
//! The impulse response is recovered from the final fit by frequency
//! sampling. Band edges are in cycles/sample, so they lie in `[0, 0.5]`.

use std::f64::consts::PI;

use tracing::{debug, warn};

use super::FilterDesignError;

/// Dense grid points per extremal.
pub const DEFAULT_GRID_DENSITY: usize = 16;

/// Iteration cap of the exchange loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 25;

/// Relative spread of the extremal errors below which the design is done.
const CONVERGENCE_TOLERANCE: f64 = 1e-4;

/// Interpolation node distance treated as an exact hit.
const NODE_HIT_TOLERANCE: f64 = 1e-7;

/// Smallest magnitude allowed for a barycentric denominator.
const MIN_DENOMINATOR: f64 = 1e-5;

/// Tuning knobs for [`remez_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemezOptions {
    /// Dense grid points per extremal.
    pub grid_density: usize,
    /// Iteration cap of the exchange loop.
    pub max_iterations: usize,
}

impl Default for RemezOptions {
    fn default() -> Self {
        Self {
            grid_density: DEFAULT_GRID_DENSITY,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Result of a Parks-McClellan design.
#[derive(Debug, Clone, PartialEq)]
pub struct RemezDesign {
    /// Symmetric impulse response.
    pub taps: Vec<f64>,
    /// Whether the exchange loop converged before the iteration cap.
    pub converged: bool,
    /// Exchange iterations run.
    pub iterations: usize,
    /// Final weighted ripple magnitude.
    pub deviation: f64,
}

/// Designs a linear-phase FIR filter with default options.
///
/// # Arguments
/// * `numtaps` - Filter length (at least 3)
/// * `bands` - Band edge pairs in cycles/sample, ascending, within `[0, 0.5]`
/// * `desired` - Desired gain per band
/// * `weights` - Relative error weight per band
///
/// # Example
/// ```
/// use siggen_backend::filter::remez;
///
/// let design = remez(31, &[0.0, 0.1, 0.2, 0.5], &[1.0, 0.0], &[1.0, 1.0]).unwrap();
/// assert_eq!(design.taps.len(), 31);
/// ```
pub fn remez(
    numtaps: usize,
    bands: &[f64],
    desired: &[f64],
    weights: &[f64],
) -> Result<RemezDesign, FilterDesignError> {
    remez_with_options(numtaps, bands, desired, weights, RemezOptions::default())
}

/// Designs a linear-phase FIR filter.
///
/// Running out of iterations is not an error: the taps of the last fit are
/// returned with `converged == false` and a warning is logged.
pub fn remez_with_options(
    numtaps: usize,
    bands: &[f64],
    desired: &[f64],
    weights: &[f64],
    options: RemezOptions,
) -> Result<RemezDesign, FilterDesignError> {
    check_band_layout(numtaps, bands, desired, weights, options)?;

    let even = numtaps % 2 == 0;
    let r = if even { numtaps / 2 } else { numtaps / 2 + 1 };
    let grid = DenseGrid::build(bands, desired, weights, r, options.grid_density, even);
    let gridsize = grid.len();
    if gridsize < r + 1 {
        return Err(FilterDesignError::GridTooCoarse {
            grid: gridsize,
            required: r + 1,
        });
    }

    let mut ext: Vec<usize> = (0..=r).map(|i| i * (gridsize - 1) / r).collect();
    let mut error = vec![0.0; gridsize];
    let mut converged = false;
    let mut iterations = 0;

    while iterations < options.max_iterations {
        iterations += 1;
        let fit = Interpolant::fit(&grid, &ext);
        for (i, e) in error.iter_mut().enumerate() {
            *e = grid.weight[i] * (grid.desired[i] - fit.eval(grid.freq[i]));
        }

        match search_extremals(&error, r) {
            Some(found) => ext = found,
            None => {
                warn!(
                    "Remez exchange lost alternation after {} iterations; keeping last fit",
                    iterations
                );
                break;
            }
        }

        if is_done(&error, &ext) {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            "Remez design of {} taps did not converge in {} iterations; results may be inaccurate",
            numtaps, iterations
        );
    }

    let fit = Interpolant::fit(&grid, &ext);
    let n = numtaps as f64;
    let amplitudes: Vec<f64> = (0..=numtaps / 2)
        .map(|i| {
            let f = i as f64 / n;
            let c = if even { (PI * f).cos() } else { 1.0 };
            fit.eval(f) * c
        })
        .collect();
    let taps = frequency_sample(numtaps, &amplitudes);

    debug!(
        "Remez design: {} taps, {} iterations, deviation {:e}",
        numtaps,
        iterations,
        fit.delta.abs()
    );

    Ok(RemezDesign {
        taps,
        converged,
        iterations,
        deviation: fit.delta.abs(),
    })
}

fn check_band_layout(
    numtaps: usize,
    bands: &[f64],
    desired: &[f64],
    weights: &[f64],
    options: RemezOptions,
) -> Result<(), FilterDesignError> {
    if numtaps < 3 {
        return Err(FilterDesignError::InvalidTapCount(numtaps));
    }
    if desired.is_empty() || bands.len() != 2 * desired.len() || weights.len() != desired.len() {
        return Err(FilterDesignError::BandCountMismatch {
            bands: bands.len(),
            desired: desired.len(),
            weights: weights.len(),
        });
    }
    if options.grid_density == 0 {
        return Err(FilterDesignError::InvalidBands(
            "grid density must be at least 1".to_string(),
        ));
    }
    if let Some(edge) = bands.iter().find(|b| !(0.0..=0.5).contains(*b)) {
        return Err(FilterDesignError::InvalidBands(format!(
            "band edge {} outside [0, 0.5] cycles/sample",
            edge
        )));
    }
    if bands.windows(2).any(|w| w[1] < w[0]) {
        return Err(FilterDesignError::InvalidBands(
            "band edges must be non-decreasing".to_string(),
        ));
    }
    if desired.iter().any(|d| !d.is_finite()) {
        return Err(FilterDesignError::InvalidBands(
            "desired gains must be finite".to_string(),
        ));
    }
    if weights.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
        return Err(FilterDesignError::InvalidBands(
            "weights must be positive and finite".to_string(),
        ));
    }
    Ok(())
}

/// Frequency grid with desired response and weight per point.
struct DenseGrid {
    freq: Vec<f64>,
    desired: Vec<f64>,
    weight: Vec<f64>,
}

impl DenseGrid {
    fn build(
        bands: &[f64],
        desired: &[f64],
        weights: &[f64],
        r: usize,
        density: usize,
        even: bool,
    ) -> Self {
        let delf = 0.5 / (density * r) as f64;
        let mut grid = DenseGrid {
            freq: Vec::new(),
            desired: Vec::new(),
            weight: Vec::new(),
        };

        for (band, edges) in bands.chunks_exact(2).enumerate() {
            let (low, high) = (edges[0], edges[1]);
            let points = (((high - low) / delf + 0.5) as usize).max(1);
            for i in 0..points {
                grid.freq.push(low + i as f64 * delf);
                grid.desired.push(desired[band]);
                grid.weight.push(weights[band]);
            }
            if let Some(last) = grid.freq.last_mut() {
                *last = high;
            }
        }

        if even {
            // Type II responses vanish at Nyquist.
            if let Some(last) = grid.freq.last_mut() {
                if *last > 0.5 - delf {
                    *last = 0.5 - delf;
                }
            }
            for i in 0..grid.freq.len() {
                let c = (PI * grid.freq[i]).cos();
                grid.desired[i] /= c;
                grid.weight[i] *= c;
            }
        }

        grid
    }

    fn len(&self) -> usize {
        self.freq.len()
    }
}

/// Barycentric form of the alternation polynomial through the extremals.
struct Interpolant {
    x: Vec<f64>,
    ad: Vec<f64>,
    y: Vec<f64>,
    delta: f64,
}

impl Interpolant {
    fn fit(grid: &DenseGrid, ext: &[usize]) -> Self {
        let r = ext.len() - 1;
        let x: Vec<f64> = ext.iter().map(|&e| (2.0 * PI * grid.freq[e]).cos()).collect();

        // Strided products keep the running denominator in range.
        let ld = (r.saturating_sub(1)) / 15 + 1;
        let ad: Vec<f64> = (0..=r)
            .map(|i| {
                let mut denom = 1.0;
                for j in 0..ld {
                    for k in (j..=r).step_by(ld) {
                        if k != i {
                            denom *= 2.0 * (x[i] - x[k]);
                        }
                    }
                }
                if denom.abs() < MIN_DENOMINATOR {
                    denom = MIN_DENOMINATOR;
                }
                1.0 / denom
            })
            .collect();

        let mut numer = 0.0;
        let mut denom = 0.0;
        let mut sign = 1.0;
        for (i, &e) in ext.iter().enumerate() {
            numer += ad[i] * grid.desired[e];
            denom += sign * ad[i] / grid.weight[e];
            sign = -sign;
        }
        let delta = numer / denom;

        let mut sign = 1.0;
        let y = ext
            .iter()
            .map(|&e| {
                let v = grid.desired[e] - sign * delta / grid.weight[e];
                sign = -sign;
                v
            })
            .collect();

        Self { x, ad, y, delta }
    }

    fn eval(&self, freq: f64) -> f64 {
        let xc = (2.0 * PI * freq).cos();
        let mut numer = 0.0;
        let mut denom = 0.0;
        for i in 0..self.x.len() {
            let c = xc - self.x[i];
            if c.abs() < NODE_HIT_TOLERANCE {
                return self.y[i];
            }
            let c = self.ad[i] / c;
            denom += c;
            numer += c * self.y[i];
        }
        numer / denom
    }
}

/// Finds `r + 1` alternating extrema of the error curve.
///
/// Returns `None` when fewer than `r + 1` extrema exist.
fn search_extremals(error: &[f64], r: usize) -> Option<Vec<usize>> {
    let n = error.len();
    let mut found = Vec::with_capacity(2 * (r + 1));

    if (error[0] > 0.0 && error[0] > error[1]) || (error[0] < 0.0 && error[0] < error[1]) {
        found.push(0);
    }
    for i in 1..n - 1 {
        let e = error[i];
        if (e >= error[i - 1] && e > error[i + 1] && e > 0.0)
            || (e <= error[i - 1] && e < error[i + 1] && e < 0.0)
        {
            found.push(i);
        }
    }
    let last = n - 1;
    if (error[last] > 0.0 && error[last] > error[last - 1])
        || (error[last] < 0.0 && error[last] < error[last - 1])
    {
        found.push(last);
    }

    while found.len() > r + 1 {
        let extra = found.len() - (r + 1);
        let mut up = error[found[0]] > 0.0;
        let mut smallest = 0;
        let mut alternating = true;

        for j in 1..found.len() {
            if error[found[j]].abs() < error[found[smallest]].abs() {
                smallest = j;
            }
            if up && error[found[j]] < 0.0 {
                up = false;
            } else if !up && error[found[j]] > 0.0 {
                up = true;
            } else {
                alternating = false;
                break;
            }
        }

        // With one surplus extremum and full alternation, drop an end.
        if alternating && extra == 1 {
            let tail = found.len() - 1;
            smallest = if error[found[tail]].abs() < error[found[0]].abs() {
                tail
            } else {
                0
            };
        }
        found.remove(smallest);
    }

    if found.len() < r + 1 {
        return None;
    }
    Some(found)
}

fn is_done(error: &[f64], ext: &[usize]) -> bool {
    let (min, max) = ext
        .iter()
        .map(|&i| error[i].abs())
        .fold((f64::INFINITY, 0.0f64), |(lo, hi), e| (lo.min(e), hi.max(e)));
    if max == 0.0 {
        return true;
    }
    (max - min) / max < CONVERGENCE_TOLERANCE
}

/// Inverts sampled amplitudes `A(k / N)` to a symmetric impulse response.
fn frequency_sample(numtaps: usize, amplitudes: &[f64]) -> Vec<f64> {
    let n = numtaps as f64;
    let m = (n - 1.0) / 2.0;
    let kmax = if numtaps % 2 == 0 {
        numtaps / 2 - 1
    } else {
        (numtaps - 1) / 2
    };

    (0..numtaps)
        .map(|idx| {
            let x = 2.0 * PI * (idx as f64 - m) / n;
            let mut val = amplitudes[0];
            for (k, &a) in amplitudes.iter().enumerate().take(kmax + 1).skip(1) {
                val += 2.0 * a * (x * k as f64).cos();
            }
            val / n
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FirFilter;

    fn assert_symmetric(taps: &[f64]) {
        let n = taps.len();
        for i in 0..n / 2 {
            assert!(
                (taps[i] - taps[n - 1 - i]).abs() < 1e-12,
                "tap {} = {} but tap {} = {}",
                i,
                taps[i],
                n - 1 - i,
                taps[n - 1 - i]
            );
        }
    }

    #[test]
    fn test_type_one_lowpass() {
        let design = remez(31, &[0.0, 0.1, 0.2, 0.5], &[1.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(design.taps.len(), 31);
        assert!(design.converged);
        assert_symmetric(&design.taps);

        let filter = FirFilter::new(design.taps);
        assert!((filter.frequency_response(0.0) - 1.0).abs() < 0.01);
        assert!((filter.frequency_response(0.05) - 1.0).abs() < 0.01);
        for f in [0.2, 0.3, 0.4, 0.5] {
            assert!(filter.frequency_response(f) < 0.01, "gain at {}", f);
        }
    }

    #[test]
    fn test_type_two_lowpass() {
        let design = remez(32, &[0.0, 0.1, 0.2, 0.5], &[1.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(design.taps.len(), 32);
        assert_symmetric(&design.taps);

        let filter = FirFilter::new(design.taps);
        assert!((filter.frequency_response(0.0) - 1.0).abs() < 0.01);
        assert!(filter.frequency_response(0.3) < 0.01);
        // Even-length symmetric filters have a zero at Nyquist.
        assert!(filter.frequency_response(0.5) < 1e-9);
    }

    #[test]
    fn test_weighting_trades_ripple() {
        let flat = remez(41, &[0.0, 0.1, 0.15, 0.5], &[1.0, 0.0], &[1.0, 1.0]).unwrap();
        let heavy = remez(41, &[0.0, 0.1, 0.15, 0.5], &[1.0, 0.0], &[1.0, 10.0]).unwrap();
        let stop_peak = |taps: &[f64]| {
            let filter = FirFilter::new(taps.to_vec());
            (0..=200)
                .map(|i| filter.frequency_response(0.15 + 0.35 * i as f64 / 200.0))
                .fold(0.0f64, f64::max)
        };
        assert!(stop_peak(&heavy.taps) < stop_peak(&flat.taps));
    }

    #[test]
    fn test_rejects_short_filters() {
        assert_eq!(
            remez(2, &[0.0, 0.1, 0.2, 0.5], &[1.0, 0.0], &[1.0, 1.0]).unwrap_err(),
            FilterDesignError::InvalidTapCount(2)
        );
    }

    #[test]
    fn test_rejects_mismatched_layout() {
        assert!(matches!(
            remez(31, &[0.0, 0.1, 0.2], &[1.0, 0.0], &[1.0, 1.0]),
            Err(FilterDesignError::BandCountMismatch { .. })
        ));
        assert!(matches!(
            remez(31, &[0.0, 0.1, 0.2, 0.5], &[1.0, 0.0], &[1.0]),
            Err(FilterDesignError::BandCountMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_edges() {
        assert!(matches!(
            remez(31, &[0.0, 0.1, 0.2, 1.0], &[1.0, 0.0], &[1.0, 1.0]),
            Err(FilterDesignError::InvalidBands(_))
        ));
        assert!(matches!(
            remez(31, &[0.0, 0.3, 0.2, 0.5], &[1.0, 0.0], &[1.0, 1.0]),
            Err(FilterDesignError::InvalidBands(_))
        ));
        assert!(matches!(
            remez(31, &[0.0, 0.1, 0.2, 0.5], &[1.0, 0.0], &[1.0, 0.0]),
            Err(FilterDesignError::InvalidBands(_))
        ));
    }

    #[test]
    fn test_search_keeps_alternation() {
        let error = [0.5, 0.2, -0.4, 0.1, 0.3, -0.6, 0.2, 0.7];
        let ext = search_extremals(&error, 3).unwrap();
        assert_eq!(ext.len(), 4);
        for w in ext.windows(2) {
            assert!(error[w[0]].signum() != error[w[1]].signum());
        }
    }

    #[test]
    fn test_frequency_sample_flat_response_is_impulse() {
        // A(f) = 1 everywhere is a centered unit impulse.
        let taps = frequency_sample(5, &[1.0, 1.0, 1.0]);
        for (i, &t) in taps.iter().enumerate() {
            let expected = if i == 2 { 1.0 } else { 0.0 };
            assert!((t - expected).abs() < 1e-12);
        }
    }
}
