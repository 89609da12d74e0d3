//! LP assembly for the weighted L1 misfit.
//!
//! Unknowns are laid out as
//!
//! ```text
//! x = [ m⁺ (M) | m⁻ (M) | α (N) | x1 (N) | x2 (N) ]      L = 2M + 3N
//! ```
//!
//! and the program is
//!
//! ```text
//! minimize   Σ α_i / sd_i
//! subject to G m⁺ − G m⁻ − α + x1 = d     (G·m − d ≤  α)
//!            G m⁺ − G m⁻ + α − x2 = d     (G·m − d ≥ −α)
//!            −x ≤ 0
//!            m⁺, m⁻ ≤ bound
//! ```
//!
//! At the optimum every `α_i` is pushed down to `|(G·m)_i − d_i|`, so the
//! objective equals the weighted L1 misfit.

use std::ops::Range;

use nalgebra::{DMatrix, DVector};

use crate::lp::LinearProgram;
use crate::math::{fill_segment, set_block, set_block_scaled, set_identity_block, set_segment};

/// Column layout of the LP vector for an `N × M` system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout {
    /// Observations (rows of `G`).
    pub n: usize,
    /// Model parameters (columns of `G`).
    pub m: usize,
}

impl VariableLayout {
    pub fn new(n: usize, m: usize) -> Self {
        Self { n, m }
    }

    /// Total LP variable count `2M + 3N`.
    pub fn len(&self) -> usize {
        2 * self.m + 3 * self.n
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn m_plus(&self) -> Range<usize> {
        0..self.m
    }

    pub fn m_minus(&self) -> Range<usize> {
        self.m..2 * self.m
    }

    pub fn alpha(&self) -> Range<usize> {
        2 * self.m..2 * self.m + self.n
    }

    /// Slack of the `G·m − d ≤ α` rows.
    pub fn slack_upper(&self) -> Range<usize> {
        2 * self.m + self.n..2 * self.m + 2 * self.n
    }

    /// Slack of the `G·m − d ≥ −α` rows.
    pub fn slack_lower(&self) -> Range<usize> {
        2 * self.m + 2 * self.n..self.len()
    }

    /// Recover `m = m⁺ − m⁻` from an LP vector.
    ///
    /// # Panics
    /// Panics if `x` is shorter than `2M`.
    pub fn decode(&self, x: &DVector<f64>) -> DVector<f64> {
        x.rows(self.m_plus().start, self.m) - x.rows(self.m_minus().start, self.m)
    }
}

/// Build the L1 inversion LP.
///
/// Shapes are not re-validated here: `g` is `N × M`, `d` and `sd` have `N`
/// entries, and every `sd_i > 0`.
pub fn build_l1_program(
    g: &DMatrix<f64>,
    d: &DVector<f64>,
    sd: &DVector<f64>,
    bound: f64,
) -> LinearProgram {
    let layout = VariableLayout::new(g.nrows(), g.ncols());
    let (n, m, l) = (layout.n, layout.m, layout.len());

    // Objective: inverse std on the α block.
    let mut objective = DVector::<f64>::zeros(l);
    set_segment(&mut objective, layout.alpha().start, &sd.map(|s| 1.0 / s));

    // Equalities: two stacked N-row blocks sharing the G m⁺ − G m⁻ term.
    let mut a_eq = DMatrix::<f64>::zeros(2 * n, l);
    let mut b_eq = DVector::<f64>::zeros(2 * n);
    for (row0, alpha_sign, slack_col, slack_sign) in [
        (0, -1.0, layout.slack_upper().start, 1.0),
        (n, 1.0, layout.slack_lower().start, -1.0),
    ] {
        set_block(&mut a_eq, row0, layout.m_plus().start, g);
        set_block_scaled(&mut a_eq, row0, layout.m_minus().start, g, -1.0);
        set_identity_block(&mut a_eq, row0, layout.alpha().start, n, alpha_sign);
        set_identity_block(&mut a_eq, row0, slack_col, n, slack_sign);
        set_segment(&mut b_eq, row0, d);
    }

    // Inequalities: nonnegativity on all L columns, then the model box.
    let mut a_ub = DMatrix::<f64>::zeros(l + 2 * m, l);
    let mut b_ub = DVector::<f64>::zeros(l + 2 * m);
    set_identity_block(&mut a_ub, 0, 0, l, -1.0);
    set_identity_block(&mut a_ub, l, 0, 2 * m, 1.0);
    fill_segment(&mut b_ub, l, 2 * m, bound);

    LinearProgram {
        objective,
        a_ub,
        b_ub,
        a_eq,
        b_eq,
    }
}
