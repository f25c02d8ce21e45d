//! Ordinary least squares via SVD.
//!
//! nalgebra's `QR::solve` only accepts square systems, so tall design
//! matrices go through the SVD pseudo-inverse instead. Callers should scale
//! their columns to comparable magnitudes.

use nalgebra::{DMatrix, DVector};

/// Singular-value cutoffs relative to the largest singular value,
/// strictest first.
const TOLERANCES: [f64; 3] = [1e-12, 1e-10, 1e-8];

/// Least squares solution of `a * beta ≈ b`.
///
/// `None` when the shapes disagree, the system is underdetermined, any input
/// is non-finite, or no cutoff yields a finite solution.
pub fn solve_least_squares(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    // SVD iterations do not converge on NaN/inf input.
    let finite = a.iter().chain(b.iter()).all(|v| v.is_finite());
    if !finite || a.nrows() != b.len() || a.nrows() < a.ncols() {
        return None;
    }

    let svd = a.clone().svd(true, true);
    // `SVD::solve` takes an absolute cutoff.
    let sigma_max = svd.singular_values.max();
    if !(sigma_max > 0.0) {
        return None;
    }
    TOLERANCES.iter().find_map(|&rel| {
        svd.solve(b, rel * sigma_max)
            .ok()
            .filter(|beta| beta.iter().all(|v| v.is_finite()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_model_is_the_mean() {
        let a = DMatrix::from_element(4, 1, 1.0);
        let b = DVector::from_row_slice(&[1.0, 2.0, 3.0, 6.0]);
        let beta = solve_least_squares(&a, &b).unwrap();
        assert!((beta[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn underdetermined_and_mismatched_systems() {
        let wide = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        assert!(solve_least_squares(&wide, &DVector::from_row_slice(&[1.0])).is_none());

        let tall = DMatrix::from_element(3, 1, 1.0);
        assert!(solve_least_squares(&tall, &DVector::from_row_slice(&[1.0, 2.0])).is_none());
    }

    #[test]
    fn tiny_columns_are_not_truncated() {
        // Singular values near 1e-13: an absolute cutoff would zero them.
        let a = DMatrix::from_row_slice(3, 1, &[1e-13, 2e-13, 3e-13]);
        let b = DVector::from_row_slice(&[2.0, 4.0, 6.0]);
        let beta = solve_least_squares(&a, &b).unwrap();
        assert!((beta[0] / 2e13 - 1.0).abs() < 1e-9, "{}", beta[0]);
    }

    #[test]
    fn zero_matrix_has_no_solution() {
        let a = DMatrix::zeros(3, 2);
        let b = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(solve_least_squares(&a, &b).is_none());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, f64::NAN, 1.0, 1.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(solve_least_squares(&a, &b).is_none());
    }
}
