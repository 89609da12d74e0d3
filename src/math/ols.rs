//! Ordinary least squares.
//!
//! The L1 formulation needs a least-squares estimate only to size the box that
//! keeps the LP bounded, so the solve has to cope with tall, square, and
//! rank-deficient design matrices alike:
//!
//! - We solve via SVD, which yields the minimum-norm solution when `G` is rank
//!   deficient. (Nalgebra's `QR::solve` is intended for square systems and will
//!   panic for non-square matrices.)
//! - Truncation thresholds are relative to the largest singular value, so
//!   rescaling `G` by any positive factor rescales `m_ls` and nothing else.
//! - A matrix whose singular values all vanish carries no information about
//!   `m`; the fit is then undefined rather than "zero".

use nalgebra::{DMatrix, DVector, Dyn, SVD};

use crate::error::InversionError;

/// Singular values at or below `RANK_RTOL * σ_max` count as zero for the rank check.
const RANK_RTOL: f64 = 1e-12;

/// Relative truncation thresholds tried in order by the solve.
const SOLVE_RTOLS: [f64; 3] = [1e-10, 1e-8, 1e-6];

/// Least-squares fit of `G·m = d`, failing when the fit is undefined.
///
/// Inputs are expected to be finite; the SVD does not converge on NaN.
pub fn least_squares_fit(g: &DMatrix<f64>, d: &DVector<f64>) -> Result<DVector<f64>, InversionError> {
    if g.nrows() != d.len() {
        return Err(InversionError::DimensionMismatch(format!(
            "G has {} rows but d has {} entries",
            g.nrows(),
            d.len()
        )));
    }

    let svd = g.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    if !(sigma_max.is_finite() && sigma_max > 0.0) || svd.rank(RANK_RTOL * sigma_max) == 0 {
        return Err(InversionError::SingularSystem(
            "G has numerical rank 0; the least-squares fit is undefined".to_string(),
        ));
    }

    solve_relative(&svd, d, sigma_max)
}

fn solve_relative(
    svd: &SVD<f64, Dyn, Dyn>,
    d: &DVector<f64>,
    sigma_max: f64,
) -> Result<DVector<f64>, InversionError> {
    for &rtol in &SOLVE_RTOLS {
        let eps = rtol * sigma_max;
        // A threshold that drops every singular value would return the zero
        // vector, which is a substitute, not a fit.
        if svd.singular_values.iter().all(|&s| s <= eps) {
            break;
        }
        if let Ok(m) = svd.solve(d, eps) {
            if m.iter().all(|v| v.is_finite()) {
                return Ok(m);
            }
        }
    }

    Err(InversionError::SingularSystem(
        "least-squares solve produced no finite solution".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_line_is_recovered() {
        // d = 2 + 3t on t = [0, 1, 2]
        let g = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let d = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let m = least_squares_fit(&g, &d).unwrap();
        assert!((m[0] - 2.0).abs() < 1e-10);
        assert!((m[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_of_constant_model_is_the_mean() {
        let g = DMatrix::from_element(3, 1, 1.0);
        let d = DVector::from_row_slice(&[1.0, 1.0, 100.0]);
        let m = least_squares_fit(&g, &d).unwrap();
        assert!((m[0] - 34.0).abs() < 1e-10);
    }

    #[test]
    fn tiny_scale_design_is_not_truncated_to_zero() {
        // All singular values sit far below any absolute threshold.
        let g = DMatrix::from_element(3, 1, 1e-11);
        let d = DVector::from_row_slice(&[1e-11, 1e-11, 5e-11]);
        let m = least_squares_fit(&g, &d).unwrap();
        assert!((m[0] - 7.0 / 3.0).abs() < 1e-9, "m_ls = {}", m[0]);
    }

    #[test]
    fn fit_scales_inversely_with_design() {
        let g = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let d = DVector::from_row_slice(&[1.0, 2.5, 4.5]);
        let base = least_squares_fit(&g, &d).unwrap();
        for scale in [1e-9, 1e6] {
            let scaled = least_squares_fit(&(&g * scale), &d).unwrap();
            assert!((scaled * scale - &base).amax() < 1e-8 * base.amax());
        }
    }

    #[test]
    fn rank_deficient_system_gets_minimum_norm_solution() {
        // Two identical columns: any m0 + m1 = 2 fits; minimum norm is (1, 1).
        let g = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let d = DVector::from_row_slice(&[2.0, 2.0]);
        let m = least_squares_fit(&g, &d).unwrap();
        assert!((m[0] - 1.0).abs() < 1e-9);
        assert!((m[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_design_is_singular() {
        let g = DMatrix::<f64>::zeros(2, 1);
        let d = DVector::from_row_slice(&[1.0, 1.0]);
        let err = least_squares_fit(&g, &d).unwrap_err();
        assert!(matches!(err, InversionError::SingularSystem(_)));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let g = DMatrix::from_element(3, 1, 1.0);
        let d = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(matches!(
            least_squares_fit(&g, &d),
            Err(InversionError::DimensionMismatch(_))
        ));
    }
}
