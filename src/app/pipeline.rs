//! Shared solve workflow used by the CLI handlers.
//!
//! load problem(s) -> configure solver -> solve -> (optional) export

use std::path::Path;

use crate::domain::{InversionConfig, InversionOutcome, InversionProblem};
use crate::error::AppError;
use crate::inversion::{BatchItem, L1InversionSolver, solve_batch};

/// All computed outputs of a single `l1inv solve` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub problem: InversionProblem,
    pub outcome: InversionOutcome,
}

/// Solve a problem already in memory.
pub fn run_problem(problem: InversionProblem, config: &InversionConfig) -> Result<RunOutput, AppError> {
    let solver = L1InversionSolver::with_solver(crate::lp::MicroLpSolver, *config);
    tracing::info!(problem = %problem.name, rows = problem.g.nrows(), cols = problem.g.ncols(), "solving");
    let outcome = solver.solve_detailed(&problem.g, &problem.d, problem.sd.as_ref())?;
    Ok(RunOutput { problem, outcome })
}

/// Load a problem file, solve it, and optionally export the result.
pub fn run_solve(path: &Path, export: Option<&Path>, config: &InversionConfig) -> Result<RunOutput, AppError> {
    let problem = crate::io::read_problem_json(path)?;
    let run = run_problem(problem, config)?;

    if let Some(out) = export {
        let record = crate::io::result_file(&run.problem, &run.outcome, config);
        crate::io::write_result_json(out, &record)?;
        tracing::info!(path = %out.display(), "wrote result");
    }
    Ok(run)
}

/// Load a batch file and solve every entry.
pub fn run_batch(path: &Path, config: &InversionConfig) -> Result<Vec<BatchItem>, AppError> {
    let problems = crate::io::read_batch_json(path)?;
    tracing::info!(count = problems.len(), "solving batch");
    let solver = L1InversionSolver::with_solver(crate::lp::MicroLpSolver, *config);
    Ok(solve_batch(&solver, &problems))
}
