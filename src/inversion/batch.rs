//! Parallel solving of independent problems.
//!
//! Each solve is a pure function of its inputs, so problems fan out over the
//! rayon pool with no coordination. Results come back in input order.

use rayon::prelude::*;

use crate::domain::{InversionOutcome, InversionProblem};
use crate::error::InversionError;
use crate::inversion::solver::L1InversionSolver;
use crate::lp::LpSolver;

/// Result of one problem in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub name: String,
    pub result: Result<InversionOutcome, InversionError>,
}

/// Solve every problem; one failure does not abort the others.
pub fn solve_batch<S>(solver: &L1InversionSolver<S>, problems: &[InversionProblem]) -> Vec<BatchItem>
where
    S: LpSolver + Sync,
{
    problems
        .par_iter()
        .map(|p| BatchItem {
            name: p.name.clone(),
            result: solver.solve_detailed(&p.g, &p.d, p.sd.as_ref()),
        })
        .collect()
}
