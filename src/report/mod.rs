//! Reporting utilities: residuals, misfit statistics, and terminal output.

pub mod format;

pub use format::*;

use nalgebra::{DMatrix, DVector};

/// Residuals `r_i = d_i − (G·m)_i`.
pub fn compute_residuals(g: &DMatrix<f64>, d: &DVector<f64>, m: &DVector<f64>) -> DVector<f64> {
    d - g * m
}

/// Misfit of one estimate under both norms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Misfit {
    /// `Σ |r_i| / sd_i`
    pub weighted_l1: f64,
    /// `sqrt(Σ (r_i / sd_i)^2)`
    pub weighted_l2: f64,
    /// Largest `|r_i|`.
    pub max_abs: f64,
}

/// Misfit of `m` against `d`; `sd = None` means unit weights.
pub fn misfit(g: &DMatrix<f64>, d: &DVector<f64>, sd: Option<&DVector<f64>>, m: &DVector<f64>) -> Misfit {
    let r = compute_residuals(g, d, m);
    let scaled = match sd {
        Some(sd) => r.component_div(sd),
        None => r.clone(),
    };
    Misfit {
        weighted_l1: scaled.lp_norm(1),
        weighted_l2: scaled.norm(),
        max_abs: r.amax(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residuals_are_data_minus_prediction() {
        let g = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 1.0]);
        let d = DVector::from_row_slice(&[1.0, 4.0]);
        let m = DVector::from_row_slice(&[1.0, 2.0]);
        assert_eq!(compute_residuals(&g, &d, &m).as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn misfit_applies_weights() {
        let g = DMatrix::from_element(3, 1, 1.0);
        let d = DVector::from_row_slice(&[1.0, 1.0, 100.0]);
        let m = DVector::from_row_slice(&[1.0]);

        let unit = misfit(&g, &d, None, &m);
        assert!((unit.weighted_l1 - 99.0).abs() < 1e-12);
        assert!((unit.weighted_l2 - 99.0).abs() < 1e-12);
        assert!((unit.max_abs - 99.0).abs() < 1e-12);

        let sd = DVector::from_row_slice(&[1.0, 1.0, 9.0]);
        let weighted = misfit(&g, &d, Some(&sd), &m);
        assert!((weighted.weighted_l1 - 11.0).abs() < 1e-12);
        assert!((weighted.max_abs - 99.0).abs() < 1e-12);
    }
}
