//! Test data generators for creating synthetic GPD-like data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

/// Evenly spaced values from `start` to `end` inclusive.
///
/// # Example
///
/// ```
/// use test_utils::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Creates a flat 4D grid whose every sample equals its own flat offset.
///
/// With row-major storage, the sample at `(i, j, k, l)` is
/// `i*s0 + j*s1 + k*s2 + l` which makes stride mistakes easy to spot.
///
/// # Example
///
/// ```
/// use test_utils::create_ramp_gpd;
///
/// let grid = create_ramp_gpd([2, 3, 2, 2]);
/// assert_eq!(grid.len(), 24);
/// assert_eq!(grid[21], 21.0);
/// ```
pub fn create_ramp_gpd(shape: [usize; 4]) -> Vec<f64> {
    let len: usize = shape.iter().product();
    (0..len).map(|i| i as f64).collect()
}

/// Creates a smooth GPD-like surface over the given axes.
///
/// The shape mimics a valence distribution: falling with `x`, suppressed
/// towards `|xi| = 1`, exponentially damped in `t` and weakly rising with
/// `ln(Q2)`. Values are stored row-major in `(x, xi, t, Q2)` order.
pub fn create_gpd_surface(x: &[f64], xi: &[f64], t: &[f64], q2: &[f64]) -> Vec<f64> {
    let mut data = Vec::with_capacity(x.len() * xi.len() * t.len() * q2.len());
    for &xv in x {
        for &xiv in xi {
            for &tv in t {
                for &q2v in q2 {
                    let valence = (1.0 - xv).max(0.0).powi(3) * (1.0 + 2.0 * xv);
                    let skew = 1.0 - 0.5 * xiv * xiv;
                    let form_factor = (1.7 * tv).exp();
                    let evolution = 1.0 + 0.05 * q2v.max(1e-6).ln();
                    data.push(valence * skew * form_factor * evolution);
                }
            }
        }
    }
    data
}

/// Creates a grid where every sample has the same value.
pub fn create_constant_gpd(shape: [usize; 4], value: f64) -> Vec<f64> {
    vec![value; shape.iter().product()]
}

/// Encode samples as little-endian `f64` bytes, the on-disk format.
pub fn encode_f64_le(values: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 8);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}
