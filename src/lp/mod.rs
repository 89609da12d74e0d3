//! Dense linear programs and the pluggable solver seam.
//!
//! A [`LinearProgram`] is the standard dense form
//!
//! ```text
//! minimize    f·x
//! subject to  A_ub·x ≤ b_ub
//!             A_eq·x = b_eq
//! ```
//!
//! with every variable free unless the inequality rows say otherwise. The
//! inversion code only ever builds this structure; how it gets solved is up to
//! an [`LpSolver`] implementation, so back-ends can be swapped without touching
//! the formulation.

use std::fmt;

use nalgebra::{DMatrix, DVector};

pub mod microlp;

pub use microlp::MicroLpSolver;

/// A dense LP in inequality/equality standard form.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    pub objective: DVector<f64>,
    pub a_ub: DMatrix<f64>,
    pub b_ub: DVector<f64>,
    pub a_eq: DMatrix<f64>,
    pub b_eq: DVector<f64>,
}

impl LinearProgram {
    /// Number of decision variables.
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Check that every block agrees on the variable count and row counts.
    pub fn validate(&self) -> Result<(), LpError> {
        let n = self.num_vars();
        if self.a_ub.ncols() != n || self.a_eq.ncols() != n {
            return Err(LpError::Failed(format!(
                "constraint matrices have {} / {} columns for {n} variables",
                self.a_ub.ncols(),
                self.a_eq.ncols()
            )));
        }
        if self.a_ub.nrows() != self.b_ub.len() {
            return Err(LpError::Failed(format!(
                "A_ub has {} rows but b_ub has {} entries",
                self.a_ub.nrows(),
                self.b_ub.len()
            )));
        }
        if self.a_eq.nrows() != self.b_eq.len() {
            return Err(LpError::Failed(format!(
                "A_eq has {} rows but b_eq has {} entries",
                self.a_eq.nrows(),
                self.b_eq.len()
            )));
        }
        Ok(())
    }

    /// Objective value `f·x`.
    pub fn objective_value(&self, x: &DVector<f64>) -> f64 {
        self.objective.dot(x)
    }
}

/// Outcome of a failed LP solve.
///
/// Infeasibility and unboundedness are reported separately so callers can
/// tell a broken formulation from a back-end failure.
#[derive(Debug, Clone, PartialEq)]
pub enum LpError {
    Infeasible,
    Unbounded,
    Failed(String),
}

impl fmt::Display for LpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LpError::Infeasible => write!(f, "problem is infeasible"),
            LpError::Unbounded => write!(f, "problem is unbounded"),
            LpError::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for LpError {}

/// A dense LP solver back-end.
pub trait LpSolver {
    /// Return an optimal `x` for `lp`.
    fn solve(&self, lp: &LinearProgram) -> Result<DVector<f64>, LpError>;
}

impl<S: LpSolver + ?Sized> LpSolver for &S {
    fn solve(&self, lp: &LinearProgram) -> Result<DVector<f64>, LpError> {
        (**self).solve(lp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_lp() -> LinearProgram {
        LinearProgram {
            objective: DVector::from_row_slice(&[1.0, 2.0]),
            a_ub: DMatrix::from_row_slice(1, 2, &[-1.0, 0.0]),
            b_ub: DVector::from_row_slice(&[0.0]),
            a_eq: DMatrix::from_row_slice(1, 2, &[1.0, 1.0]),
            b_eq: DVector::from_row_slice(&[3.0]),
        }
    }

    #[test]
    fn validate_accepts_consistent_shapes() {
        let lp = tiny_lp();
        assert_eq!(lp.num_vars(), 2);
        assert!(lp.validate().is_ok());
        assert!((lp.objective_value(&DVector::from_row_slice(&[1.0, 2.0])) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_short_rhs() {
        let mut lp = tiny_lp();
        lp.b_eq = DVector::zeros(2);
        assert!(matches!(lp.validate(), Err(LpError::Failed(_))));
    }
}
