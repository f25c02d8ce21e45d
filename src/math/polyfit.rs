//! Degree-1 polynomial regression.

use nalgebra::{DMatrix, DVector};

use crate::math::solve_least_squares;

/// Fit `y = slope * x + intercept` by ordinary least squares.
///
/// Coefficients come back highest power first, like `polyfit(x, y, 1)`.
/// Returns `None` for mismatched lengths, fewer than two samples, non-finite
/// samples, or when all `x` are equal.
pub fn polyfit1(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    // Centre and scale x so both design columns are O(1) whatever the
    // magnitude of the samples; the coefficients are unscaled afterwards.
    let n = x.len();
    let mean = x.iter().sum::<f64>() / n as f64;
    let scale = x.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max);
    // Constant x is rank deficient; SVD would return a minimum-norm
    // solution, which is not a meaningful line.
    if !(scale > 0.0 && scale.is_finite()) {
        return None;
    }

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { (x[i] - mean) / scale } else { 1.0 });
    let rhs = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &rhs)?;
    let slope = beta[0] / scale;
    let intercept = beta[1] - slope * mean;
    (slope.is_finite() && intercept.is_finite()).then_some((slope, intercept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| -0.5 * v + 7.0).collect();
        let (m, b) = polyfit1(&x, &y).unwrap();
        assert!((m + 0.5).abs() < 1e-10);
        assert!((b - 7.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_on_noisy_points() {
        // Residuals +1, -1, -1, +1 around y = x cancel in the normal equations.
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 0.0, 1.0, 4.0];
        let (m, b) = polyfit1(&x, &y).unwrap();
        assert!((m - 1.0).abs() < 1e-10, "slope {m}");
        assert!(b.abs() < 1e-10, "intercept {b}");
    }

    #[test]
    fn tiny_and_offset_abscissae() {
        let x = [1e-13, 2e-13, 3e-13, 4e-13];
        let y: Vec<f64> = x.iter().map(|v| 2e12 * v + 1.0).collect();
        let (m, b) = polyfit1(&x, &y).unwrap();
        assert!((m / 2e12 - 1.0).abs() < 1e-9, "slope {m}");
        assert!((b - 1.0).abs() < 1e-9, "intercept {b}");

        let x = [1e6, 1e6 + 1.0, 1e6 + 2.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * (v - 1e6) - 2.0).collect();
        let (m, _) = polyfit1(&x, &y).unwrap();
        assert!((m - 3.0).abs() < 1e-6, "slope {m}");
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(polyfit1(&[1.0], &[1.0]).is_none());
        assert!(polyfit1(&[1.0, 2.0], &[1.0]).is_none());
        assert!(polyfit1(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(polyfit1(&[1.0, f64::NAN], &[1.0, 2.0]).is_none());
    }
}
