//! The L1 inversion solver.
//!
//! `solve(G, d, sd)` returns the model that minimizes
//!
//! ```text
//! Σ_i |(G·m)_i − d_i| / sd_i      subject to  |m_j| ≤ bound
//! ```
//!
//! where `bound` comes from [`derive_bound`]. The work is a pure function of
//! its inputs: matrices are allocated per call and nothing is cached, so a
//! solver can be shared across threads whenever its LP back-end can.

use nalgebra::{DMatrix, DVector};

use crate::domain::{InversionConfig, InversionOutcome};
use crate::error::InversionError;
use crate::inversion::bound::derive_bound;
use crate::inversion::formulation::{VariableLayout, build_l1_program};
use crate::lp::{LpSolver, MicroLpSolver};

/// L1-norm inversion over a pluggable LP back-end.
#[derive(Debug, Clone, Default)]
pub struct L1InversionSolver<S = MicroLpSolver> {
    lp: S,
    config: InversionConfig,
}

impl L1InversionSolver<MicroLpSolver> {
    /// Solver using the default back-end and settings.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: LpSolver> L1InversionSolver<S> {
    pub fn with_solver(lp: S, config: InversionConfig) -> Self {
        Self { lp, config }
    }

    pub fn config(&self) -> &InversionConfig {
        &self.config
    }

    /// Estimate `m` from `d = G·m`. `sd = None` weights every observation by 1.
    pub fn solve(
        &self,
        g: &DMatrix<f64>,
        d: &DVector<f64>,
        sd: Option<&DVector<f64>>,
    ) -> Result<DVector<f64>, InversionError> {
        self.solve_detailed(g, d, sd).map(|outcome| outcome.model)
    }

    /// Like [`solve`](Self::solve), but also returns the LP solution, the
    /// objective, and the bound that was applied.
    pub fn solve_detailed(
        &self,
        g: &DMatrix<f64>,
        d: &DVector<f64>,
        sd: Option<&DVector<f64>>,
    ) -> Result<InversionOutcome, InversionError> {
        self.config.validate()?;
        let sd = validate_inputs(g, d, sd)?;

        let bound = derive_bound(g, d, self.config.bound_multiplier)?;
        if d.amax() > 0.0 && bound.least_squares.amax() <= 1e-12 * d.amax() / g.amax() {
            // d ⟂ range(G): the box collapses to m = 0 whatever the multiplier.
            tracing::warn!("least-squares fit is zero for nonzero data; model box is [0, 0]");
        }

        // Rows of [G | d] are divided by a power of two so the LP sees O(1)
        // coefficients. α and the slacks scale with the rows; m does not.
        let scale = row_scale(g, d);
        let lp = build_l1_program(&(g / scale), &(d / scale), &sd, bound.value);
        tracing::debug!(
            n = g.nrows(),
            m = g.ncols(),
            vars = lp.num_vars(),
            eq_rows = lp.a_eq.nrows(),
            ub_rows = lp.a_ub.nrows(),
            bound = bound.value,
            scale,
            "assembled L1 inversion LP"
        );

        let mut x = self.lp.solve(&lp).map_err(|e| {
            tracing::warn!(error = %e, "LP solve failed");
            InversionError::from(e)
        })?;
        if x.len() != lp.num_vars() {
            return Err(InversionError::LpFailed(format!(
                "back-end returned {} values for {} variables",
                x.len(),
                lp.num_vars()
            )));
        }

        let layout = VariableLayout::new(g.nrows(), g.ncols());
        x.rows_mut(layout.alpha().start, 3 * layout.n).scale_mut(scale);
        let model = layout.decode(&x);
        let objective = lp.objective_value(&x);
        tracing::debug!(objective, "L1 inversion solved");

        Ok(InversionOutcome {
            model,
            lp_solution: x,
            objective,
            bound: bound.value,
            least_squares: bound.least_squares,
        })
    }
}

/// Solve with the default back-end and a bound multiplier of 10.
pub fn solve(
    g: &DMatrix<f64>,
    d: &DVector<f64>,
    sd: Option<&DVector<f64>>,
) -> Result<DVector<f64>, InversionError> {
    L1InversionSolver::new().solve(g, d, sd)
}

/// Power of two nearest to the largest magnitude in `G` and `d`.
///
/// Dividing by a power of two is exact in floating point, so the rescaled
/// rows describe exactly the same residual constraints on `m`.
fn row_scale(g: &DMatrix<f64>, d: &DVector<f64>) -> f64 {
    let peak = g.amax().max(d.amax());
    if peak > 0.0 && peak.is_finite() {
        2f64.powi(peak.log2().round() as i32)
    } else {
        1.0
    }
}

/// Check shapes, weights, and finiteness; return the effective `sd`.
pub fn validate_inputs(
    g: &DMatrix<f64>,
    d: &DVector<f64>,
    sd: Option<&DVector<f64>>,
) -> Result<DVector<f64>, InversionError> {
    let (n, m) = g.shape();
    if n < 1 || m < 1 {
        return Err(InversionError::DimensionMismatch(format!(
            "G must be at least 1x1, got {n}x{m}"
        )));
    }
    if d.len() != n {
        return Err(InversionError::DimensionMismatch(format!(
            "G has {n} rows but d has {} entries",
            d.len()
        )));
    }

    let sd = match sd {
        None => DVector::from_element(n, 1.0),
        Some(sd) => {
            if sd.len() != n {
                return Err(InversionError::InvalidWeight(format!(
                    "sd has {} entries, expected {n}",
                    sd.len()
                )));
            }
            if let Some((i, s)) = sd.iter().enumerate().find(|(_, s)| !(s.is_finite() && **s > 0.0)) {
                return Err(InversionError::InvalidWeight(format!(
                    "sd[{i}] = {s} is not a positive finite number"
                )));
            }
            sd.clone()
        }
    };

    if g.iter().any(|v| !v.is_finite()) {
        return Err(InversionError::NonFiniteInput("G contains NaN or infinity".to_string()));
    }
    if let Some((i, v)) = d.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(InversionError::NonFiniteInput(format!("d[{i}] = {v}")));
    }

    Ok(sd)
}
