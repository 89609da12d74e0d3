//! L1-norm linear inversion via linear programming.
//!
//! Responsibilities:
//!
//! - derive a model bound from a least-squares fit (`bound`)
//! - assemble the dense LP for a weighted L1 misfit (`formulation`)
//! - validate inputs, solve, and decode the model (`solver`)
//! - solve many independent problems in parallel (`batch`)
//!
//! Reference: W. Menke, *Geophysical Data Analysis: Discrete Inverse Theory*,
//! MATLAB edition, 3rd ed., §7 (L1 norms and linear programming).

pub mod batch;
pub mod bound;
pub mod formulation;
pub mod solver;

pub use batch::*;
pub use bound::*;
pub use formulation::*;
pub use solver::*;
