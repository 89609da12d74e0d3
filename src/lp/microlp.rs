//! LP back-end built on `good_lp` with the pure-Rust `microlp` simplex solver.
//!
//! Each dense row becomes one `good_lp` constraint. Zero coefficients are
//! skipped, which matters for the inversion LP: its nonnegativity block is
//! an identity matrix and would otherwise dominate the expression size.

use good_lp::{Expression, ProblemVariables, ResolutionError, Solution, SolverModel, constraint, variable};
use nalgebra::{DMatrix, DVector};

use super::{LinearProgram, LpError, LpSolver};

/// Default dense LP solver (`good_lp` + `microlp`).
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl LpSolver for MicroLpSolver {
    fn solve(&self, lp: &LinearProgram) -> Result<DVector<f64>, LpError> {
        lp.validate()?;

        let mut vars = ProblemVariables::new();
        // Variables are free; any sign restriction lives in the inequality rows.
        let x: Vec<_> = (0..lp.num_vars()).map(|_| vars.add(variable())).collect();

        let objective = row_expression(lp.objective.iter().copied(), &x);
        let mut problem = vars.minimise(objective).using(good_lp::microlp);

        for (i, rhs) in lp.b_ub.iter().copied().enumerate() {
            let lhs = matrix_row_expression(&lp.a_ub, i, &x);
            problem = problem.with(constraint!(lhs <= rhs));
        }
        for (i, rhs) in lp.b_eq.iter().copied().enumerate() {
            let lhs = matrix_row_expression(&lp.a_eq, i, &x);
            problem = problem.with(constraint!(lhs == rhs));
        }

        let solution = problem.solve().map_err(|e| match e {
            ResolutionError::Infeasible => LpError::Infeasible,
            ResolutionError::Unbounded => LpError::Unbounded,
            other => LpError::Failed(other.to_string()),
        })?;

        Ok(DVector::from_iterator(
            x.len(),
            x.iter().map(|&xi| solution.value(xi)),
        ))
    }
}

fn matrix_row_expression(a: &DMatrix<f64>, row: usize, x: &[good_lp::Variable]) -> Expression {
    row_expression(a.row(row).iter().copied(), x)
}

fn row_expression(coefs: impl Iterator<Item = f64>, x: &[good_lp::Variable]) -> Expression {
    coefs
        .zip(x.iter())
        .filter(|(c, _)| *c != 0.0)
        .fold(Expression::from(0.0), |acc, (c, &xi)| acc + c * xi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_bounded_lp() {
        // minimize -x0 - x1  s.t.  x0 + 2 x1 <= 4,  3 x0 + x1 <= 6,  x >= 0
        // Optimum at (1.6, 1.2).
        let lp = LinearProgram {
            objective: DVector::from_row_slice(&[-1.0, -1.0]),
            a_ub: DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 3.0, 1.0, -1.0, 0.0, 0.0, -1.0]),
            b_ub: DVector::from_row_slice(&[4.0, 6.0, 0.0, 0.0]),
            a_eq: DMatrix::zeros(0, 2),
            b_eq: DVector::zeros(0),
        };
        let x = MicroLpSolver.solve(&lp).unwrap();
        assert!((x[0] - 1.6).abs() < 1e-6, "x0 = {}", x[0]);
        assert!((x[1] - 1.2).abs() < 1e-6, "x1 = {}", x[1]);
    }

    #[test]
    fn honours_equality_rows() {
        // minimize x0 + 2 x1  s.t.  x0 + x1 = 3,  x >= 0  ->  (3, 0)
        let lp = LinearProgram {
            objective: DVector::from_row_slice(&[1.0, 2.0]),
            a_ub: -DMatrix::<f64>::identity(2, 2),
            b_ub: DVector::zeros(2),
            a_eq: DMatrix::from_row_slice(1, 2, &[1.0, 1.0]),
            b_eq: DVector::from_row_slice(&[3.0]),
        };
        let x = MicroLpSolver.solve(&lp).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-6);
        assert!(x[1].abs() < 1e-6);
    }

    #[test]
    fn reports_infeasible() {
        // x0 <= -1 and x0 >= 0
        let lp = LinearProgram {
            objective: DVector::from_row_slice(&[1.0]),
            a_ub: DMatrix::from_row_slice(2, 1, &[1.0, -1.0]),
            b_ub: DVector::from_row_slice(&[-1.0, 0.0]),
            a_eq: DMatrix::zeros(0, 1),
            b_eq: DVector::zeros(0),
        };
        assert_eq!(MicroLpSolver.solve(&lp), Err(LpError::Infeasible));
    }

    #[test]
    fn reports_unbounded() {
        // minimize -x0 with only x0 >= 0
        let lp = LinearProgram {
            objective: DVector::from_row_slice(&[-1.0]),
            a_ub: DMatrix::from_row_slice(1, 1, &[-1.0]),
            b_ub: DVector::from_row_slice(&[0.0]),
            a_eq: DMatrix::zeros(0, 1),
            b_eq: DVector::zeros(0),
        };
        assert_eq!(MicroLpSolver.solve(&lp), Err(LpError::Unbounded));
    }
}
