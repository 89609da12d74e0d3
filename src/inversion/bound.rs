//! Model bound derived from ordinary least squares.
//!
//! Splitting `m = m⁺ − m⁻` leaves a flat direction whenever `G` has a
//! nullspace, so the LP caps every `m⁺_j, m⁻_j` at
//!
//! ```text
//! bound = multiplier * max_j |m_ls_j|
//! ```
//!
//! The cap is a heuristic; it is not proven to contain the L1 optimum.

use nalgebra::{DMatrix, DVector};

use crate::domain::DEFAULT_BOUND_MULTIPLIER;
use crate::error::InversionError;
use crate::math::least_squares_fit;

/// A derived bound together with the least-squares fit it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBound {
    pub least_squares: DVector<f64>,
    pub value: f64,
}

/// Fit `G·m = d` by least squares and scale its largest magnitude.
///
/// Failures of the fit are propagated as [`InversionError::SingularSystem`];
/// no fallback bound is substituted.
pub fn derive_bound(
    g: &DMatrix<f64>,
    d: &DVector<f64>,
    multiplier: f64,
) -> Result<ModelBound, InversionError> {
    let least_squares = least_squares_fit(g, d)?;
    let max_abs = least_squares.amax();
    let value = multiplier * max_abs;
    if !value.is_finite() {
        return Err(InversionError::SingularSystem(format!(
            "least-squares bound is not finite (max |m_ls| = {max_abs})"
        )));
    }
    Ok(ModelBound {
        least_squares,
        value,
    })
}

/// `10 × max|LeastSquaresFit(G, d)|`.
pub fn upper_bound(g: &DMatrix<f64>, d: &DVector<f64>) -> Result<f64, InversionError> {
    derive_bound(g, d, DEFAULT_BOUND_MULTIPLIER).map(|b| b.value)
}
