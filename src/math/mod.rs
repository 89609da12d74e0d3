//! Mathematical utilities: dense block assembly and least squares.

pub mod dense;
pub mod ols;

pub use dense::*;
pub use ols::*;
